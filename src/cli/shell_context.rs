use chrono::NaiveDate;

use crate::{
    config::{ConfigManager, InvoiceConfig},
    form::FormEditor,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything the shell needs between commands: the form being edited,
/// the date it is issued on and the loaded configuration.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub editor: FormEditor,
    pub config_manager: ConfigManager,
    pub config: InvoiceConfig,
    pub issued_on: NaiveDate,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, rows: {} }}",
            self.running,
            self.last_command,
            self.editor.form().len()
        )
    }
}
