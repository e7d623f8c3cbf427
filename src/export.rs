//! Checks that run before the preview is handed to the document exporter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    calculator::{capitalize_first, InvoiceCalculator, PreviewResult},
    config::InvoiceConfig,
    errors::{InvoiceError, Result},
    form::{FormState, LineItem},
};

pub const PDF_EXTENSION: &str = "pdf";
pub const DEFAULT_FALLBACK_STEM: &str = "invoice";

/// File naming rules for exported documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportSettings {
    /// Stem used when no customer name is entered.
    #[serde(default = "ExportSettings::default_fallback_stem")]
    pub fallback_stem: String,
    /// Appended to the customer-name stem, e.g. `_BILL`.
    #[serde(default)]
    pub name_suffix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fallback_stem: Self::default_fallback_stem(),
            name_suffix: String::new(),
        }
    }
}

impl ExportSettings {
    pub fn default_fallback_stem() -> String {
        DEFAULT_FALLBACK_STEM.into()
    }
}

/// Validated input for the exporter: the fresh preview and the file name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportPlan {
    pub file_name: String,
    pub preview: PreviewResult,
}

/// Gatekeeper between the form and the document exporter.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    calculator: InvoiceCalculator,
    settings: ExportSettings,
}

impl ExportGate {
    pub fn new(calculator: InvoiceCalculator, settings: ExportSettings) -> Self {
        Self {
            calculator,
            settings,
        }
    }

    pub fn from_config(config: &InvoiceConfig) -> Self {
        Self::new(
            InvoiceCalculator::new(config.preview_settings()),
            config.export.clone(),
        )
    }

    /// Recomputes the preview and refuses to export while any item row
    /// lacks a description. Additional charges are not checked.
    pub fn prepare(&self, form: &FormState, issued_on: NaiveDate) -> Result<ExportPlan> {
        let preview = self.calculator.preview(form, issued_on);

        let missing = missing_item_descriptions(form);
        if !missing.is_empty() {
            warn!(rows = ?missing, "export blocked: item rows without description");
            return Err(InvoiceError::MissingDescription { rows: missing });
        }

        let file_name = export_file_name(&capitalize_first(&form.customer_name), &self.settings);
        info!(file = %file_name, rows = preview.rows.len(), "export ready");
        Ok(ExportPlan { file_name, preview })
    }
}

/// One-based positions of item rows whose description is blank.
pub fn missing_item_descriptions(form: &FormState) -> Vec<usize> {
    form.rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            matches!(&row.item, LineItem::Item { description, .. } if description.trim().is_empty())
        })
        .map(|(index, _)| index + 1)
        .collect()
}

/// Customer name with whitespace runs turned into `_`, plus suffix and
/// extension. Falls back to the configured stem when the name is blank.
pub fn export_file_name(customer_name: &str, settings: &ExportSettings) -> String {
    let stem = customer_name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        format!("{}.{}", settings.fallback_stem, PDF_EXTENSION)
    } else {
        format!("{}{}.{}", stem, settings.name_suffix, PDF_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_collapses_whitespace() {
        let settings = ExportSettings::default();
        assert_eq!(
            export_file_name("  Mary  Ann\tLee ", &settings),
            "Mary_Ann_Lee.pdf"
        );
        assert_eq!(export_file_name("   ", &settings), "invoice.pdf");
    }

    #[test]
    fn suffix_applies_only_to_named_files() {
        let settings = ExportSettings {
            fallback_stem: "BILL".into(),
            name_suffix: "_BILL".into(),
        };
        assert_eq!(export_file_name("Joe", &settings), "Joe_BILL.pdf");
        assert_eq!(export_file_name("", &settings), "BILL.pdf");
    }

    #[test]
    fn missing_descriptions_ignore_charges() {
        let mut form = FormState::new();
        form.push(LineItem::item("Desk", "1", "10"));
        form.push(LineItem::charge("  ", "5"));
        form.push(LineItem::item(" ", "1", "1"));
        assert_eq!(missing_item_descriptions(&form), vec![3]);
    }
}
