//! One-shot commands: a `FormState` JSON document in, JSON out.

use std::io::{self, Read, Write};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::{
    calculator::InvoiceCalculator,
    config::{ConfigManager, InvoiceConfig},
    errors::CliError,
    export::ExportGate,
    form::FormState,
};

use super::core::parse_date;

const USAGE: &str = "usage: invoice_core_cli <preview|export> [YYYY-MM-DD] < form.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommand {
    Preview,
    Export,
}

impl BatchCommand {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preview" => Some(Self::Preview),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

/// Runs a one-shot command against stdin/stdout with the stored configuration.
pub fn run(args: &[String]) -> Result<(), CliError> {
    let config = ConfigManager::from_env()?.load()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, &config, stdin.lock(), &mut out)
}

pub fn execute<R: Read, W: Write>(
    args: &[String],
    config: &InvoiceConfig,
    input: R,
    output: &mut W,
) -> Result<(), CliError> {
    let (command, issued_on) = parse_args(args)?;
    let form: FormState = serde_json::from_reader(input)?;
    debug!(?command, rows = form.len(), %issued_on, "running batch command");

    match command {
        BatchCommand::Preview => {
            let preview =
                InvoiceCalculator::new(config.preview_settings()).preview(&form, issued_on);
            write_json(output, &preview)
        }
        BatchCommand::Export => {
            let plan = ExportGate::from_config(config).prepare(&form, issued_on)?;
            write_json(output, &plan)
        }
    }
}

fn parse_args(args: &[String]) -> Result<(BatchCommand, NaiveDate), CliError> {
    let (command, date) = match args {
        [command] => (command, None),
        [command, date] => (command, Some(date)),
        _ => return Err(CliError::Input(USAGE.to_string())),
    };
    let command = BatchCommand::parse(command)
        .ok_or_else(|| CliError::Input(format!("unknown command `{}`; {}", command, USAGE)))?;
    let issued_on = match date {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    Ok((command, issued_on))
}

fn write_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}
