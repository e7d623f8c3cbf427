#![allow(dead_code)]

use chrono::NaiveDate;
use invoice_core::{config::ConfigManager, DiscountSpec, FormState, LineItem};
use tempfile::TempDir;

pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

/// Chair 2 x 150 plus a 50 delivery charge, 10% off.
pub fn sample_form() -> FormState {
    let mut form = FormState::with_customer("jane doe", "555-0199");
    form.push(LineItem::item("Chair", "2", "150"));
    form.push(LineItem::charge("Delivery", "50"));
    form.discount = DiscountSpec::percent("10");
    form
}

/// Config manager rooted in a fresh temporary directory. Keep the guard alive.
pub fn temp_config() -> (TempDir, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let manager =
        ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("create config manager");
    (temp, manager)
}
