//! Persistent user preferences for the invoice front end.

mod manager;
mod model;

pub use manager::ConfigManager;
pub use model::{InvoiceConfig, SETTING_KEYS};
