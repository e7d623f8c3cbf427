//! Preview computation: field validation, row classification, discount and totals.
//!
//! Everything here is a pure function of the [`FormState`](crate::form::FormState)
//! it is given plus the caller-supplied issue date.

pub mod discount;
pub mod preview;
pub mod validation;

pub use discount::discount_amount;
pub use preview::{
    bill_to_line, compute_preview, FieldCheck, InvoiceCalculator, PreviewResult, PreviewSettings,
    RenderedRow, TotalsDisplay, DEFAULT_DATE_FORMAT,
};
pub use validation::{
    capitalize_first, is_valid_positive_int, parse_discount_value, parse_positive_int,
};
