#![doc(test(attr(deny(warnings))))]

//! Invoice Core computes the live preview of an invoice form: validated line
//! amounts, subtotal, discount and grand total, plus the checks that gate
//! exporting the document.

pub mod calculator;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod form;
pub mod utils;

pub use calculator::{compute_preview, InvoiceCalculator, PreviewResult, PreviewSettings};
pub use errors::{InvoiceError, Result};
pub use export::{ExportGate, ExportPlan, ExportSettings};
pub use form::{DiscountKind, DiscountSpec, FormEditor, FormState, LineItem};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Invoice Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
