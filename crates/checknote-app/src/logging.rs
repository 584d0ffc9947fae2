//! Subscriber setup for the binary.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::Command;
use crate::config::{self, CheckNoteConfig};

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Load (or create) the config while `writer` receives its log events.
///
/// Runs before the global subscriber exists: where the session logs
/// depends on the config itself.
pub fn load_config_with<W>(path: &Path, writer: W) -> eyre::Result<CheckNoteConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, || config::load_or_init(path))
}

/// Install the global subscriber. The interactive session owns the
/// terminal, so it logs to a file in the data directory; everything else
/// logs to stderr.
pub fn init(config: &CheckNoteConfig, command: &Command) -> eyre::Result<()> {
    if *command == Command::Run {
        let dir = config.data_dir()?;
        std::fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("checknote.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
