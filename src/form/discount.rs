use std::fmt;

use serde::{Deserialize, Serialize};

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    Percent,
    Flat,
}

impl DiscountKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "percent" | "%" | "pct" => Some(DiscountKind::Percent),
            "flat" | "amount" => Some(DiscountKind::Flat),
            _ => None,
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiscountKind::Percent => "percent",
            DiscountKind::Flat => "flat",
        };
        f.write_str(label)
    }
}

/// Raw discount input: the typed value plus the selected kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscountSpec {
    #[serde(default, rename = "value")]
    pub value_raw: String,
    #[serde(default)]
    pub kind: DiscountKind,
}

impl DiscountSpec {
    pub fn new(value: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            value_raw: value.into(),
            kind,
        }
    }

    pub fn percent(value: impl Into<String>) -> Self {
        Self::new(value, DiscountKind::Percent)
    }

    pub fn flat(value: impl Into<String>) -> Self {
        Self::new(value, DiscountKind::Flat)
    }
}
