//! Core CLI dispatch, shell context helpers and command errors.

use std::io;

use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    calculator::{InvoiceCalculator, PreviewResult},
    config::ConfigManager,
    errors::{CliError, InvoiceError},
    export::ExportGate,
    form::{FormEditor, RowId},
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
use super::render;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::from_env()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            editor: FormEditor::new(),
            config_manager,
            config,
            issued_on: Local::now().date_naive(),
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let name = self.editor.form().customer_name.trim();
        if name.is_empty() {
            "invoice> ".to_string()
        } else {
            format!("invoice({})> ", name)
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, args = args.len(), "dispatching shell command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(InvoiceError::MissingDescription { rows }) => {
                self.print_error(crate::errors::MISSING_DESCRIPTION_MESSAGE);
                let listed = rows
                    .iter()
                    .map(|row| row.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                output::hint(format!("Item rows without a description: {}", listed));
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn calculator(&self) -> InvoiceCalculator {
        InvoiceCalculator::new(self.config.preview_settings())
    }

    pub(crate) fn preview(&self) -> PreviewResult {
        self.calculator().preview(self.editor.form(), self.issued_on)
    }

    pub(crate) fn export_gate(&self) -> ExportGate {
        ExportGate::from_config(&self.config)
    }

    /// Prints the live totals, as the page does after every keystroke.
    pub(crate) fn refresh(&self) {
        output::info(render::totals_line(&self.preview()));
    }

    pub(crate) fn refresh_bill_to(&self) {
        let preview = self.preview();
        if preview.bill_to_line.is_empty() {
            output::info("Bill To: (no customer)");
        } else {
            output::info(preview.bill_to_line);
        }
    }

    /// Resolves a one-based row number (optionally written `#n`).
    pub(crate) fn resolve_row(&self, token: &str) -> Result<RowId, CommandError> {
        let digits = token.trim().trim_start_matches('#');
        let position: usize = digits.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a row number", token))
        })?;
        position
            .checked_sub(1)
            .and_then(|index| self.editor.form().row_at(index))
            .map(|row| row.id)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "row {} does not exist ({} rows on the form)",
                    position,
                    self.editor.form().len()
                ))
            })
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] InvoiceError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let manager = ConfigManager::with_base_dir(base.to_path_buf())?;
    let mut app = ShellContext::with_config_manager(CliMode::Script, manager)?;
    app.issued_on = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DiscountKind, LineItem, NumericField};
    use tempfile::tempdir;

    #[test]
    fn script_builds_form_and_totals() {
        let dir = tempdir().expect("tempdir");
        let app = process_script(
            dir.path(),
            &[
                "customer 'jane doe'",
                "phone 555-0199",
                "add-item Chair 2 150",
                "add-charge Delivery 50",
                "discount 10 percent",
            ],
        )
        .expect("script");

        let preview = app.preview();
        assert_eq!(preview.bill_to_line, "Bill To: Jane doe (555-0199)");
        assert_eq!(preview.subtotal, 350);
        assert_eq!(preview.discount_amount, 35);
        assert_eq!(preview.grand_total, 315);
        assert_eq!(app.editor.form().discount.kind, DiscountKind::Percent);
    }

    #[test]
    fn rejected_numeric_edit_keeps_previous_value() {
        let dir = tempdir().expect("tempdir");
        let app = process_script(dir.path(), &["add-item lamp 3 20", "set 1 qty 0"])
            .expect("script");
        let row = app.editor.form().row_at(0).expect("row");
        assert_eq!(row.item.numeric(NumericField::Quantity), Some("3"));
        assert_eq!(row.item.description(), "Lamp");
    }

    #[test]
    fn remove_drops_row_by_position() {
        let dir = tempdir().expect("tempdir");
        let app = process_script(
            dir.path(),
            &["add-item A 1 1", "add-charge B 2", "remove 1"],
        )
        .expect("script");
        let rows: Vec<&LineItem> = app.editor.form().line_items().collect();
        assert_eq!(rows, vec![&LineItem::charge("B", "2")]);
    }

    #[test]
    fn exit_stops_processing() {
        let dir = tempdir().expect("tempdir");
        let app = process_script(dir.path(), &["add-charge Fee 5", "exit", "add-charge X 1"])
            .expect("script");
        assert_eq!(app.editor.form().len(), 1);
    }

    #[test]
    fn resolve_row_rejects_out_of_range() {
        let dir = tempdir().expect("tempdir");
        let app = process_script(dir.path(), &["add-charge Fee 5"]).expect("script");
        assert!(app.resolve_row("#1").is_ok());
        assert!(app.resolve_row("0").is_err());
        assert!(app.resolve_row("2").is_err());
        assert!(app.resolve_row("first").is_err());
    }

    #[test]
    fn config_set_persists() {
        let dir = tempdir().expect("tempdir");
        process_script(dir.path(), &["config set export-suffix _BILL"]).expect("script");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        assert_eq!(manager.load().expect("load").export.name_suffix, "_BILL");
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert!(parse_date("2025-02-28").is_ok());
        assert!(parse_date("28/02/2025").is_err());
    }
}
