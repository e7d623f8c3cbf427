use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Shell commands in registration order. Names and aliases share one lookup.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing any earlier command with the same name.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.lookup.get(entry.name) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.lookup.insert(entry.name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Points `alias` at an already registered command. Unknown targets are ignored.
    pub fn alias(&mut self, alias: &'static str, target: &str) {
        if let Some(&slot) = self.lookup.get(target) {
            self.lookup.entry(alias).or_insert(slot);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Primary names only; aliases are not listed.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}
