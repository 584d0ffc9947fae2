use clap::Parser;
use eyre::Result;

use checknote_app::app;
use checknote_app::cli::{Cli, Command};
use checknote_app::config;
use checknote_app::logging;
use checknote_export::render::RenderMode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = logging::load_config_with(&config_path, std::io::stderr)?;
    let command = cli.command.unwrap_or(Command::Run);
    logging::init(&config, &command)?;

    match command {
        Command::Run => app::run_interactive(&config).await?,
        Command::Print { rich } => {
            let mode = if rich { RenderMode::Rich } else { RenderMode::Plain };
            println!("{}", app::print_note(&config, mode)?);
        }
        Command::Reset => {
            app::reset(&config)?;
            println!("Saved answers cleared.");
        }
        Command::Questions => {
            let catalog = app::load_catalog(&config)?;
            print!("{}", app::list_questions(&catalog));
        }
    }

    Ok(())
}
