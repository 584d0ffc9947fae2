use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use checknote_core::catalog::QuestionCatalog;
use checknote_core::models::question::QuestionRole;
use checknote_export::footer::DEFAULT_FOOTER_TEMPLATE;
use checknote_export::render::{NoteRenderer, RenderMode};
use checknote_session::input;
use checknote_session::session::{Session, SessionPorts};
use checknote_session::store::AnswerStore;
use checknote_storage::file::FileStore;
use checknote_storage::state::SessionStore;

use crate::clipboard::SystemClipboard;
use crate::config::CheckNoteConfig;
use crate::tui::{ScrollViewport, TerminalGuard};

const INPUT_CAPACITY: usize = 64;

pub fn load_catalog(config: &CheckNoteConfig) -> eyre::Result<Arc<QuestionCatalog>> {
    let Some(path) = &config.questions_path else {
        return Ok(Arc::new(QuestionCatalog::builtin().clone()));
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read questions at {}: {e}", path.display()))?;
    let catalog = QuestionCatalog::parse(&text);
    tracing::info!(path = %path.display(), questions = catalog.len(), "question catalog loaded");
    Ok(Arc::new(catalog))
}

pub fn build_renderer(config: &CheckNoteConfig) -> eyre::Result<NoteRenderer> {
    Ok(NoteRenderer::from_template(
        DEFAULT_FOOTER_TEMPLATE,
        &config.footer_context(),
    )?)
}

pub fn session_dir(config: &CheckNoteConfig) -> eyre::Result<PathBuf> {
    Ok(config.data_dir()?.join("session"))
}

/// Render the note for whatever is saved, without starting a session.
pub fn print_note(config: &CheckNoteConfig, mode: RenderMode) -> eyre::Result<String> {
    let catalog = load_catalog(config)?;
    let renderer = build_renderer(config)?;
    let loaded = FileStore::new(session_dir(config)?).load()?;
    let store = match loaded.answers {
        Some(answers) => AnswerStore::with_answers(catalog, answers),
        None => AnswerStore::new(catalog),
    };
    Ok(renderer.render(store.catalog(), store.answers(), mode))
}

pub fn reset(config: &CheckNoteConfig) -> eyre::Result<()> {
    FileStore::new(session_dir(config)?).clear()?;
    Ok(())
}

pub fn list_questions(catalog: &QuestionCatalog) -> String {
    let mut out = String::new();
    for question in catalog.questions() {
        let letter = question.shortcut().unwrap_or('-');
        let kind = if question.is_multi_select { "multi" } else { "single" };
        let _ = write!(out, "{letter}  {} ({kind}", question.label);
        match question.role {
            QuestionRole::None => {}
            QuestionRole::ReproductiveStatus => out.push_str(", reproductive status"),
            QuestionRole::PrimaryExclusion => out.push_str(", first choice exclusive"),
        }
        out.push(')');
        for choice in &question.choices {
            let _ = write!(out, "\n     {} {}", choice.id + 1, choice.text);
        }
        out.push('\n');
    }
    out
}

pub async fn run_interactive(config: &CheckNoteConfig) -> eyre::Result<()> {
    let catalog = load_catalog(config)?;
    let renderer = build_renderer(config)?;
    let viewport = ScrollViewport::default();

    let ports = SessionPorts {
        store: Box::new(FileStore::new(session_dir(config)?)),
        clipboard: Box::new(SystemClipboard::new()),
        viewport: Box::new(viewport.clone()),
    };
    let mut session = Session::new(catalog, renderer, ports, config.session_config());

    let (publisher, subscription) = input::subscribe(INPUT_CAPACITY);
    let mut terminal = TerminalGuard::enter()?;
    let reader = crate::tui::spawn_input_reader(publisher);

    let result = session
        .run(subscription, |session| {
            if let Err(e) = terminal.draw(session, &viewport) {
                tracing::warn!(error = %e, "failed to draw");
            }
        })
        .await;

    drop(terminal);
    match reader.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "input reader failed"),
        Err(_) => tracing::warn!("input reader panicked"),
    }

    result?;
    Ok(())
}
