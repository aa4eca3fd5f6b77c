//! Ledger shell command table: names, aliases, accepted argument forms.

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One accepted way of calling a command, e.g. `delete <number>`.
#[derive(Debug, Clone, Copy)]
pub struct CommandForm {
    pub usage: &'static str,
    pub effect: &'static str,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub forms: &'static [CommandForm],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }

    /// Every form's usage joined for one-line error hints.
    pub fn usage_line(&self) -> String {
        self.forms
            .iter()
            .map(|form| form.usage)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Commands in the order `help` lists them.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Finds the command answering to `word` by name or alias.
    pub fn resolve(&self, word: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(word))
    }

    /// Names and aliases, used for completion and suggestions.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
    }
}
