use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::{DiscountSpec, FormState, LineItem, NumericField, RowId, RowKind};

use super::{
    discount::discount_amount,
    validation::{capitalize_first, parse_discount_value, parse_positive_int},
};

/// Matches the `M/D/YYYY` shape of an en-US short date.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// One line of the preview table. Each display field is either a valid
/// number or empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedRow {
    pub row_id: RowId,
    pub kind: RowKind,
    pub description: String,
    pub quantity_display: String,
    pub rate_display: String,
    pub amount_display: String,
}

/// Validity of a single numeric input, reported for every row including
/// rows left out of the table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldCheck {
    pub row_id: RowId,
    pub field: NumericField,
    pub valid: bool,
}

/// Summary labels ready to paint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub discount: String,
    pub grand_total: String,
    pub discount_row_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewResult {
    pub bill_to_line: String,
    pub bill_date_line: String,
    pub rows: Vec<RenderedRow>,
    pub field_checks: Vec<FieldCheck>,
    pub discount_valid: bool,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub grand_total: u64,
    pub totals: TotalsDisplay,
}

impl PreviewResult {
    /// Checks that failed, for re-rendering the offending inputs.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldCheck> + '_ {
        self.field_checks.iter().filter(|check| !check.valid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSettings {
    pub date_format: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Derives the invoice preview from raw form state.
#[derive(Debug, Clone, Default)]
pub struct InvoiceCalculator {
    settings: PreviewSettings,
}

impl InvoiceCalculator {
    pub fn new(settings: PreviewSettings) -> Self {
        Self { settings }
    }

    /// Computes the preview. Never fails: malformed fields are left out of
    /// the totals and shown blank.
    pub fn preview(&self, form: &FormState, issued_on: NaiveDate) -> PreviewResult {
        let mut rows = Vec::with_capacity(form.rows.len());
        let mut field_checks = Vec::new();
        let mut subtotal: u64 = 0;

        for row in &form.rows {
            let outcome = evaluate_row(row.id, &row.item);
            field_checks.extend(outcome.checks);
            if let Some(rendered) = outcome.rendered {
                subtotal = subtotal.saturating_add(outcome.amount);
                rows.push(rendered);
            }
        }

        let discount = discount_amount(subtotal, &form.discount);
        let grand_total = subtotal - discount;

        PreviewResult {
            bill_to_line: bill_to_line(&form.customer_name, &form.customer_phone),
            bill_date_line: format!(
                "Date: {}",
                format_date(issued_on, &self.settings.date_format)
            ),
            rows,
            field_checks,
            discount_valid: discount_is_valid(&form.discount),
            subtotal,
            discount_amount: discount,
            grand_total,
            totals: TotalsDisplay {
                subtotal: positive_display(subtotal),
                discount: positive_display(discount),
                grand_total: positive_display(grand_total),
                discount_row_visible: discount > 0,
            },
        }
    }
}

/// Computes the preview with default settings.
pub fn compute_preview(form: &FormState, issued_on: NaiveDate) -> PreviewResult {
    InvoiceCalculator::default().preview(form, issued_on)
}

/// `"Bill To: Name (phone)"`, or empty when no name is entered.
pub fn bill_to_line(name: &str, phone: &str) -> String {
    let name = capitalize_first(name);
    if name.is_empty() {
        return String::new();
    }
    let phone = phone.trim();
    if phone.is_empty() {
        format!("Bill To: {name}")
    } else {
        format!("Bill To: {name} ({phone})")
    }
}

struct RowOutcome {
    rendered: Option<RenderedRow>,
    amount: u64,
    checks: Vec<FieldCheck>,
}

fn evaluate_row(row_id: RowId, item: &LineItem) -> RowOutcome {
    let description = item.description().trim();
    let check = |field, valid| FieldCheck {
        row_id,
        field,
        valid,
    };

    match item {
        LineItem::Item {
            quantity_raw,
            rate_raw,
            ..
        } => {
            let quantity = parse_positive_int(quantity_raw);
            let rate = parse_positive_int(rate_raw);
            let amount = match (quantity, rate) {
                (Some(q), Some(r)) => q.checked_mul(r),
                _ => None,
            };
            let checks = vec![
                check(NumericField::Quantity, quantity.is_some()),
                check(NumericField::Rate, rate.is_some()),
            ];
            if description.is_empty() {
                return RowOutcome {
                    rendered: None,
                    amount: 0,
                    checks,
                };
            }
            RowOutcome {
                rendered: Some(RenderedRow {
                    row_id,
                    kind: RowKind::Item,
                    description: description.to_string(),
                    quantity_display: display(quantity),
                    rate_display: display(rate),
                    amount_display: display(amount),
                }),
                amount: amount.unwrap_or(0),
                checks,
            }
        }
        LineItem::AdditionalCharge { price_raw, .. } => {
            let price = parse_positive_int(price_raw);
            let checks = vec![check(NumericField::Price, price.is_some())];
            if description.is_empty() {
                return RowOutcome {
                    rendered: None,
                    amount: 0,
                    checks,
                };
            }
            RowOutcome {
                rendered: Some(RenderedRow {
                    row_id,
                    kind: RowKind::AdditionalCharge,
                    description: description.to_string(),
                    quantity_display: String::new(),
                    rate_display: String::new(),
                    amount_display: display(price),
                }),
                amount: price.unwrap_or(0),
                checks,
            }
        }
    }
}

fn discount_is_valid(spec: &DiscountSpec) -> bool {
    spec.value_raw.trim().is_empty() || parse_discount_value(&spec.value_raw).is_some()
}

fn display(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn positive_display(value: u64) -> String {
    if value > 0 {
        value.to_string()
    } else {
        String::new()
    }
}

fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out = date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    out
}
