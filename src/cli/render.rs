//! Plain-text painting of a [`PreviewResult`] for the shell.

use crate::{
    calculator::{PreviewResult, RenderedRow},
    form::RowKind,
};

const HEADERS: [&str; 4] = ["Description", "Qty", "Rate", "Amount"];
const NOT_APPLICABLE: &str = "NA";

pub fn render_preview(preview: &PreviewResult) -> String {
    let mut lines = Vec::new();
    if !preview.bill_to_line.is_empty() {
        lines.push(preview.bill_to_line.clone());
    }
    lines.push(preview.bill_date_line.clone());
    lines.push(String::new());
    lines.extend(render_table(&preview.rows));
    lines.push(String::new());
    lines.extend(render_totals(preview));
    lines.join("\n")
}

/// One-line summary printed after every edit.
pub fn totals_line(preview: &PreviewResult) -> String {
    let totals = &preview.totals;
    let mut parts = vec![format!("Subtotal: {}", or_dash(&totals.subtotal))];
    if totals.discount_row_visible {
        parts.push(format!("Discount: -{}", totals.discount));
    }
    parts.push(format!("Grand Total: {}", or_dash(&totals.grand_total)));
    parts.join(" | ")
}

fn render_table(rows: &[RenderedRow]) -> Vec<String> {
    let cells: Vec<[String; 4]> = rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![format_row(&HEADERS.map(String::from), &widths)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    if cells.is_empty() {
        lines.push("(no items)".to_string());
    }
    lines.extend(cells.iter().map(|row| format_row(row, &widths)));
    lines
}

fn row_cells(row: &RenderedRow) -> [String; 4] {
    let (quantity, rate) = match row.kind {
        RowKind::Item => (row.quantity_display.clone(), row.rate_display.clone()),
        RowKind::AdditionalCharge => (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string()),
    };
    [
        row.description.clone(),
        quantity,
        rate,
        row.amount_display.clone(),
    ]
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let description = format!("{:<width$}", cells[0], width = widths[0]);
    let numbers = cells[1..]
        .iter()
        .zip(&widths[1..])
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>();
    let mut parts = vec![description];
    parts.extend(numbers);
    parts.join(" | ").trim_end().to_string()
}

fn render_totals(preview: &PreviewResult) -> Vec<String> {
    let totals = &preview.totals;
    let mut lines = vec![format!("Subtotal: {}", totals.subtotal)];
    if totals.discount_row_visible {
        lines.push(format!("Discount: -{}", totals.discount));
    }
    lines.push(format!("Grand Total: {}", totals.grand_total));
    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        calculator::compute_preview,
        form::{DiscountSpec, FormState, LineItem},
    };
    use chrono::NaiveDate;

    fn preview(form: &FormState) -> PreviewResult {
        compute_preview(form, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
    }

    #[test]
    fn charges_show_not_applicable_columns() {
        let mut form = FormState::with_customer("zoe", "");
        form.push(LineItem::item("Chair", "2", "150"));
        form.push(LineItem::charge("Delivery", "50"));
        let text = render_preview(&preview(&form));

        assert!(text.starts_with("Bill To: Zoe\nDate: 1/2/2025"));
        let delivery = text
            .lines()
            .find(|line| line.starts_with("Delivery"))
            .expect("delivery row");
        assert_eq!(delivery.matches(NOT_APPLICABLE).count(), 2);
        assert!(text.contains("Grand Total: 350"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn totals_line_hides_zero_values() {
        let mut form = FormState::new();
        form.push(LineItem::charge("Fee", "20"));
        form.discount = DiscountSpec::flat("20");
        assert_eq!(
            totals_line(&preview(&form)),
            "Subtotal: 20 | Discount: -20 | Grand Total: -"
        );
    }

    #[test]
    fn empty_form_renders_placeholder_row() {
        let text = render_preview(&preview(&FormState::new()));
        assert!(text.contains("(no items)"));
        assert!(text.ends_with("Grand Total:"));
    }
}
