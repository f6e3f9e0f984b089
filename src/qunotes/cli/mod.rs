//! # CLI Layer
//!
//! One possible UI client for qunotes. This is the only place that:
//! - parses shell arguments (clap)
//! - knows about stdout, stderr and exit codes
//! - turns failure keys into localized text
//!
//! Each command maps to one [`QuNotesApi`] call; the resulting
//! [`qunotes::effect::Effect`] is handed to the [`print::Printer`].

mod args;
mod print;

use args::{Cli, Commands, NoteAction, NotebookAction};
use clap::Parser;
use directories::ProjectDirs;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use log::{debug, warn};
use print::Printer;
use qunotes::api::QuNotesApi;
use qunotes::config::QuNotesConfig;
use qunotes::error::{StoreError, UseCaseError};
use qunotes::failure::Localizable;
use qunotes::localization::Localizer;
use qunotes::store::fs::FileStore;
use qunotes::usecase::Outcome;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HOME_ENV: &str = "QUNOTES_HOME";

#[derive(Error, Debug)]
pub enum CliError {
    /// A rejected operation, already localized.
    #[error("{0}")]
    Failure(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Logger error: {0}")]
    Logger(#[from] FlexiLoggerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not determine a data directory; pass --data-dir or set QUNOTES_HOME")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, CliError>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    debug!("event=app_start data_dir={}", data_dir.display());

    let config = QuNotesConfig::load(&data_dir)?;
    let localizer = config.localizer()?;
    let printer = Printer::new(config.theme.clone(), localizer.clone());
    let mut api = QuNotesApi::new(FileStore::new(&data_dir));

    let result = dispatch(cli.command, &mut api, &printer, &localizer, &data_dir, config);
    if let Err(CliError::Failure(message)) = &result {
        printer.print_failure(message);
        std::process::exit(1);
    }
    result
}

fn init_logging(verbose: bool) -> Result<Option<LoggerHandle>> {
    if !verbose {
        return Ok(None);
    }
    let handle = Logger::try_with_env_or_str("debug")?
        .log_to_stderr()
        .start()?;
    Ok(Some(handle))
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "qunotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(CliError::NoDataDir)
}

/// Localizes a rejected use case, logging the underlying cause.
fn localize<F>(localizer: &Localizer, err: UseCaseError<F>) -> CliError
where
    F: Localizable + fmt::Debug + fmt::Display,
{
    warn!("event=operation status=failed error={}", err);
    CliError::Failure(localizer.message_for(&err))
}

fn dispatch(
    command: Commands,
    api: &mut QuNotesApi<FileStore>,
    printer: &Printer,
    localizer: &Localizer,
    data_dir: &Path,
    config: QuNotesConfig,
) -> Result<()> {
    match command {
        Commands::Notebooks => {
            let Outcome { effect, .. } = api.library().map_err(|e| localize(localizer, e))?;
            printer.print(&effect, "library_empty");
        }
        Commands::Notebook { action } => {
            let empty_key = match action {
                NotebookAction::Add { .. } | NotebookAction::Rm { .. } => "library_empty",
                _ => "notebook_empty",
            };
            let effect = match action {
                NotebookAction::Add { name } => {
                    api.create_notebook(&name).map_err(|e| localize(localizer, e))?.effect
                }
                NotebookAction::Rm { notebook } => {
                    api.delete_notebook(&notebook)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NotebookAction::Rename { notebook, name } => {
                    api.rename_notebook(&notebook, &name)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NotebookAction::Show { notebook, filter } => {
                    let outcome = match filter {
                        Some(query) => api.filter_notes(&notebook, &query),
                        None => api.notebook(&notebook),
                    };
                    outcome.map_err(|e| localize(localizer, e))?.effect
                }
            };
            printer.print(&effect, empty_key);
        }
        Commands::Note { action } => {
            let effect = match action {
                NoteAction::Add {
                    notebook,
                    title,
                    content,
                } => {
                    api.create_note(&notebook, &title, &content)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Rm { notebook, note } => {
                    api.delete_note(&notebook, &note)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Title {
                    notebook,
                    note,
                    title,
                } => {
                    api.retitle_note(&notebook, &note, &title)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Edit {
                    notebook,
                    note,
                    content,
                } => {
                    api.edit_note_content(&notebook, &note, &content)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Tag {
                    notebook,
                    note,
                    tag,
                } => {
                    api.tag_note(&notebook, &note, &tag)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Untag {
                    notebook,
                    note,
                    tag,
                } => {
                    api.untag_note(&notebook, &note, &tag)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
                NoteAction::Show { notebook, note } => {
                    api.note(&notebook, &note)
                        .map_err(|e| localize(localizer, e))?
                        .effect
                }
            };
            printer.print(&effect, "notebook_empty");
        }
        Commands::Config { key, value } => run_config(printer, data_dir, config, key, value)?,
    }
    Ok(())
}

fn run_config(
    printer: &Printer,
    data_dir: &Path,
    mut config: QuNotesConfig,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    const KEYS: [&str; 7] = [
        "language",
        "locales-dir",
        "theme.accent",
        "theme.muted",
        "theme.success",
        "theme.failure",
        "theme.tag",
    ];

    match (key, value) {
        (None, _) => {
            for key in KEYS {
                let value = config.get(key).unwrap_or_default();
                printer.print_info(&format!("{} = {}", key, value));
            }
        }
        (Some(key), None) => {
            let value = config
                .get(&key)
                .ok_or_else(|| CliError::Config(format!("Unknown config key: {}", key)))?;
            printer.print_info(&value);
        }
        (Some(key), Some(value)) => {
            config.set(&key, &value).map_err(CliError::Config)?;
            config.save(data_dir)?;
            debug!("event=config_set key={} value={}", key, value);
            printer.print_info(&format!("{} = {}", key, value));
        }
    }
    Ok(())
}
