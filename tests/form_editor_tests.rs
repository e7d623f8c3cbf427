use chrono::NaiveDate;
use invoice_core::{
    calculator::compute_preview,
    form::{Acceptance, FieldId, NumericField},
    DiscountKind, FormEditor, FormState, InvoiceError, LineItem,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

#[test]
fn new_item_rows_start_with_quantity_one() {
    let mut editor = FormEditor::new();
    let id = editor.add_item();
    let row = editor.form().row(id).expect("row");
    assert_eq!(row.item.numeric(NumericField::Quantity), Some("1"));
    assert_eq!(row.item.numeric(NumericField::Rate), Some(""));
    assert_eq!(
        editor.cache().last_valid(FieldId::row(id, NumericField::Quantity)),
        "1"
    );
}

#[test]
fn invalid_numeric_input_reverts_to_last_valid() {
    let mut editor = FormEditor::new();
    let id = editor.add_item();
    editor.set_description(id, "widget").unwrap();
    assert_eq!(
        editor.set_numeric(id, NumericField::Rate, "25").unwrap(),
        Acceptance::Accepted("25".into())
    );
    for rejected in ["0", "-3", "2.5", "07", "abc"] {
        let outcome = editor.set_numeric(id, NumericField::Rate, rejected).unwrap();
        assert_eq!(outcome, Acceptance::Reverted("25".into()));
    }
    let preview = compute_preview(editor.form(), date());
    assert_eq!(preview.rows[0].description, "Widget");
    assert_eq!(preview.subtotal, 25);
}

#[test]
fn clearing_a_field_is_allowed() {
    let mut editor = FormEditor::new();
    let id = editor.add_charge();
    editor.set_numeric(id, NumericField::Price, "40").unwrap();
    let outcome = editor.set_numeric(id, NumericField::Price, "").unwrap();
    assert_eq!(outcome, Acceptance::Accepted(String::new()));
    // The blank value is now the one to fall back to.
    let outcome = editor.set_numeric(id, NumericField::Price, "x").unwrap();
    assert_eq!(outcome, Acceptance::Reverted(String::new()));
}

#[test]
fn discount_value_accepts_zero_but_not_signs() {
    let mut editor = FormEditor::new();
    assert!(!editor.set_discount_value("0").was_reverted());
    assert!(!editor.set_discount_value("15").was_reverted());
    assert_eq!(editor.set_discount_value("-5").value(), "15");
    assert_eq!(editor.set_discount_value("1.5").value(), "15");
    editor.set_discount_kind(DiscountKind::Flat);
    assert_eq!(editor.form().discount.kind, DiscountKind::Flat);
    assert_eq!(editor.form().discount.value_raw, "15");
}

#[test]
fn removing_a_row_forgets_its_cache_entries() {
    let mut editor = FormEditor::new();
    let first = editor.add_item();
    let second = editor.add_charge();
    let before = editor.cache().len();
    editor.remove_row(first).unwrap();
    assert!(editor.cache().len() < before);
    assert!(editor.form().row(first).is_none());
    assert!(editor.form().row(second).is_some());
    assert!(matches!(
        editor.remove_row(first),
        Err(InvoiceError::RowNotFound(_))
    ));
}

#[test]
fn charge_rows_reject_item_fields() {
    let mut editor = FormEditor::new();
    let id = editor.add_charge();
    assert!(matches!(
        editor.set_numeric(id, NumericField::Quantity, "2"),
        Err(InvoiceError::InvalidInput(_))
    ));
}

#[test]
fn insert_runs_values_through_edit_rules() {
    let mut editor = FormEditor::new();
    let id = editor
        .insert(LineItem::item("  lamp", "0", "30"))
        .expect("insert");
    let row = editor.form().row(id).unwrap();
    assert_eq!(row.item.description(), "Lamp");
    assert_eq!(row.item.numeric(NumericField::Quantity), Some("1"));
    assert_eq!(row.item.numeric(NumericField::Rate), Some("30"));
}

#[test]
fn from_form_seeds_cache_with_acceptable_values() {
    let mut form = FormState::with_customer("Bob", "");
    let id = form.push(LineItem::item("Saw", "3", "bad"));
    let mut editor = FormEditor::from_form(form);
    assert_eq!(
        editor.set_numeric(id, NumericField::Quantity, "x").unwrap(),
        Acceptance::Reverted("3".into())
    );
    assert_eq!(
        editor.set_numeric(id, NumericField::Rate, "x").unwrap(),
        Acceptance::Reverted(String::new())
    );
}

#[test]
fn customer_name_is_capitalized_on_edit() {
    let mut editor = FormEditor::new();
    editor.set_customer_name("  zoë ");
    editor.set_customer_phone("555");
    assert_eq!(editor.form().customer_name, "Zoë");
    assert_eq!(
        compute_preview(editor.form(), date()).bill_to_line,
        "Bill To: Zoë (555)"
    );
}
