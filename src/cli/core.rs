//! Shell context, dispatch, and error reporting.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::{commands, output};
use crate::config::{Config, ConfigManager};
use crate::core::{LedgerStore, SystemClock};
use crate::errors::LedgerError;
use crate::storage::TextStorage;

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Commands are read from stdin; confirmations are assumed.
    Script,
}

/// Fatal shell errors; these end the process.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Errors from a single command; most are reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: LedgerStore,
    pub(crate) config: Config,
}

impl ShellContext {
    /// Loads configuration and the ledger from the application home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let storage = TextStorage::new(manager.records_dir(&config))?;
        let store = LedgerStore::load(Box::new(storage), Box::new(SystemClock))?;
        Ok(Self::with_store(mode, store, config))
    }

    pub fn with_store(mode: CliMode, store: LedgerStore, config: Config) -> Self {
        let registry = CommandRegistry::new(commands::definitions());
        Self {
            mode,
            running: true,
            registry,
            store,
            config,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.words().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.resolve(name)
    }

    pub fn prompt(&self) -> String {
        format!("tcash ({})> ", self.store.records().len())
    }

    /// Tells the operator about lines that were dropped while loading.
    pub(crate) fn report_load(&self) {
        let skipped = self.store.skipped_lines();
        if skipped.is_empty() {
            return;
        }
        output::warning(format!(
            "Skipped {} malformed line(s) in {}",
            skipped.len(),
            self.store.ledger_path().display()
        ));
        for line in skipped {
            output::warning(format!("  line {}: {}", line.line_number, line.reason));
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.resolve(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!("Unknown command `{}`.", input));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .words()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= MAX_SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(ask(prompt, false)?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(ask("Exit shell?", true)?)
    }

    /// Prints recoverable errors; storage failures are returned as fatal.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err) if err.is_validation() => {
                output::error(err);
                Ok(())
            }
            CommandError::Core(err) => Err(CliError::Core(err)),
            CommandError::Dialoguer(err) => Err(CliError::Dialoguer(err)),
        }
    }
}

fn ask(prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
}
