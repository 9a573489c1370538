mod config;
mod script;
mod store;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use planner::editor::{Editor, PersistError, Persistence};
use planner::engine::EngineCore;
use planner::project::{Project, ProjectError};
use planner::render::HeadlessRenderer;
use planner::room::RoomConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};
use crate::script::ScriptError;
use crate::store::FileStore;
use crate::ui::LogUi;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("cannot save project: {0}")]
    Persist(#[from] PersistError),
    #[error("replay failed at {0}")]
    Script(#[from] ScriptError),
}

#[derive(Parser, Debug)]
#[command(name = "roomplan", about = "Headless room layout planner")]
struct Cli {
    #[arg(long, env = "ROOMPLAN_PROJECT", default_value = "roomplan.json")]
    project: PathBuf,

    #[arg(long, env = "ROOMPLAN_VIEWPORT_WIDTH", default_value_t = 800.0)]
    viewport_width: f64,

    #[arg(long, env = "ROOMPLAN_VIEWPORT_HEIGHT", default_value_t = 600.0)]
    viewport_height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the room and item list.
    Show,
    /// Print the project as indented JSON.
    Export,
    /// Validate a project file and make it the current project.
    Import { file: PathBuf },
    /// Replay a JSON-lines event script against the current project.
    Replay { file: PathBuf },
}

type HostEditor = Editor<HeadlessRenderer, FileStore, LogUi>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "roomplan failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), HostError> {
    let config = Config::new(cli.project, cli.viewport_width, cli.viewport_height)?;
    let core = EngineCore::with_room(RoomConfig::default(), config.viewport, HeadlessRenderer::new());
    let mut editor = Editor::new(core, FileStore::new(&config.project_path), LogUi::default());

    match cli.command {
        Command::Show => {
            open(&mut editor);
            print!("{}", ui::describe(&editor.core));
        }
        Command::Export => {
            open(&mut editor);
            println!("{}", editor.export_json()?);
        }
        Command::Import { file } => {
            let text = read(&file)?;
            editor.import_json(&text)?;
            save(&mut editor)?;
            info!(path = %config.project_path.display(), items = editor.core.items.len(), "project imported");
        }
        Command::Replay { file } => {
            let text = read(&file)?;
            // Replay saves when done; never over an unreadable project.
            if editor.load_saved()? {
                info!(path = %config.project_path.display(), "project restored");
            }
            let applied = script::replay(&mut editor, &text)?;
            save(&mut editor)?;
            info!(events = applied, items = editor.core.items.len(), "replay finished");
        }
    }
    Ok(())
}

/// Restore the saved project, falling back to an empty default room.
fn open(editor: &mut HostEditor) {
    if editor.restore_saved() {
        info!(path = %editor.persistence.path().display(), "project restored");
    } else {
        info!("starting with an empty room");
    }
}

fn save(editor: &mut HostEditor) -> Result<(), HostError> {
    let project: Project = editor.core.project();
    editor.persistence.autosave(&project)?;
    Ok(())
}

fn read(path: &Path) -> Result<String, HostError> {
    fs::read_to_string(path).map_err(|source| HostError::Read { path: path.to_path_buf(), source })
}
