use serde::{Deserialize, Serialize};

use crate::{
    calculator::{PreviewSettings, DEFAULT_DATE_FORMAT},
    errors::{InvoiceError, Result},
    export::ExportSettings,
};

/// Keys accepted by [`InvoiceConfig::apply_setting`].
pub const SETTING_KEYS: &[&str] = &["date-format", "export-fallback", "export-suffix", "color"];

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceConfig {
    #[serde(default = "InvoiceConfig::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default = "InvoiceConfig::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            date_format: Self::default_date_format(),
            export: ExportSettings::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl InvoiceConfig {
    pub fn default_date_format() -> String {
        DEFAULT_DATE_FORMAT.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            date_format: self.date_format.clone(),
        }
    }

    /// Updates one setting from its textual form.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim().to_ascii_lowercase().as_str() {
            "date-format" => {
                if value.trim().is_empty() {
                    return Err(InvoiceError::ConfigError(
                        "date format cannot be empty".into(),
                    ));
                }
                self.date_format = value.to_string();
            }
            "export-fallback" => {
                let stem = value.trim();
                if stem.is_empty() {
                    return Err(InvoiceError::ConfigError(
                        "fallback file name cannot be empty".into(),
                    ));
                }
                self.export.fallback_stem = stem.to_string();
            }
            "export-suffix" => self.export.name_suffix = value.trim().to_string(),
            "color" => self.ui_color_enabled = parse_flag(value)?,
            other => {
                return Err(InvoiceError::ConfigError(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(InvoiceError::ConfigError(format!(
            "expected on/off, got `{}`",
            other
        ))),
    }
}
