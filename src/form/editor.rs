use tracing::debug;

use super::{
    discount::DiscountKind,
    field_cache::{Acceptance, FieldId, LastValidCache},
    line_item::{LineItem, NumericField, RowId, RowKind},
    state::FormState,
};
use crate::{
    calculator::capitalize_first,
    errors::{InvoiceError, Result},
};

/// Applies per-keystroke editing rules to a [`FormState`].
///
/// Descriptions and the customer name are capitalized as they are typed.
/// Numeric inputs go through a [`LastValidCache`] so a rejected value is
/// replaced by the last accepted one instead of reaching the form.
#[derive(Debug, Clone, Default)]
pub struct FormEditor {
    form: FormState,
    cache: LastValidCache,
}

impl FormEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing form, remembering every currently acceptable value.
    pub fn from_form(form: FormState) -> Self {
        let mut cache = LastValidCache::new();
        for row in &form.rows {
            for field in row.item.numeric_fields() {
                if let Some(raw) = row.item.numeric(*field) {
                    cache.seed(FieldId::row(row.id, *field), raw);
                }
            }
        }
        cache.seed(FieldId::DiscountValue, &form.discount.value_raw);
        Self { form, cache }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn into_form(self) -> FormState {
        self.form
    }

    pub fn cache(&self) -> &LastValidCache {
        &self.cache
    }

    pub fn set_customer_name(&mut self, raw: &str) {
        self.form.set_customer_name(capitalize_first(raw));
    }

    pub fn set_customer_phone(&mut self, raw: &str) {
        self.form.set_customer_phone(raw);
    }

    pub fn add_item(&mut self) -> RowId {
        let id = self.form.add_item();
        self.seed_row(id);
        id
    }

    pub fn add_charge(&mut self) -> RowId {
        let id = self.form.add_charge();
        self.seed_row(id);
        id
    }

    /// Inserts a fully typed row, running each field through the edit rules.
    pub fn insert(&mut self, item: LineItem) -> Result<RowId> {
        let id = match item.kind() {
            RowKind::Item => self.add_item(),
            RowKind::AdditionalCharge => self.add_charge(),
        };
        self.set_description(id, item.description())?;
        for field in item.numeric_fields() {
            if let Some(raw) = item.numeric(*field) {
                self.set_numeric(id, *field, raw)?;
            }
        }
        Ok(id)
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<()> {
        self.form.remove_row(id)?;
        self.cache.forget_row(id);
        debug!(row = %id, "row removed");
        Ok(())
    }

    pub fn set_description(&mut self, id: RowId, raw: &str) -> Result<()> {
        let row = self
            .form
            .row_mut(id)
            .ok_or_else(|| InvoiceError::RowNotFound(id.to_string()))?;
        row.item.set_description(capitalize_first(raw));
        Ok(())
    }

    /// Offers `raw` to a numeric input and writes back whatever the cache keeps.
    pub fn set_numeric(&mut self, id: RowId, field: NumericField, raw: &str) -> Result<Acceptance> {
        let row = self
            .form
            .row_mut(id)
            .ok_or_else(|| InvoiceError::RowNotFound(id.to_string()))?;
        if row.item.numeric(field).is_none() {
            return Err(InvoiceError::InvalidInput(format!(
                "{} rows have no `{}` field",
                kind_label(&row.item),
                field.label()
            )));
        }
        let outcome = self.cache.accept(FieldId::row(id, field), raw);
        if outcome.was_reverted() {
            debug!(row = %id, field = field.label(), rejected = raw, "numeric edit reverted");
        }
        row.item.set_numeric(field, outcome.value());
        Ok(outcome)
    }

    pub fn set_discount_value(&mut self, raw: &str) -> Acceptance {
        let outcome = self.cache.accept(FieldId::DiscountValue, raw);
        if outcome.was_reverted() {
            debug!(rejected = raw, "discount edit reverted");
        }
        self.form.set_discount_value(outcome.value());
        outcome
    }

    pub fn set_discount_kind(&mut self, kind: DiscountKind) {
        self.form.set_discount_kind(kind);
    }

    fn seed_row(&mut self, id: RowId) {
        if let Some(row) = self.form.row(id) {
            for field in row.item.numeric_fields() {
                if let Some(raw) = row.item.numeric(*field) {
                    self.cache.seed(FieldId::row(id, *field), raw);
                }
            }
        }
    }
}

fn kind_label(item: &LineItem) -> &'static str {
    match item {
        LineItem::Item { .. } => "item",
        LineItem::AdditionalCharge { .. } => "additional charge",
    }
}
