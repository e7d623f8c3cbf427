use serde::{Deserialize, Serialize};

use crate::errors::{InvoiceError, Result};

use super::{
    discount::{DiscountKind, DiscountSpec},
    line_item::{FormRow, LineItem, RowId, DEFAULT_ITEM_QUANTITY},
};

/// Snapshot of every input on the invoice form.
///
/// This is the only input of the calculator. It holds raw text exactly as
/// typed; nothing here is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormState {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub rows: Vec<FormRow>,
    #[serde(default)]
    pub discount: DiscountSpec,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            customer_name: name.into(),
            customer_phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.customer_phone = phone.into();
    }

    pub fn set_discount_value(&mut self, value: impl Into<String>) {
        self.discount.value_raw = value.into();
    }

    pub fn set_discount_kind(&mut self, kind: DiscountKind) {
        self.discount.kind = kind;
    }

    /// Appends an empty item row with the default quantity pre-filled.
    pub fn add_item(&mut self) -> RowId {
        self.push(LineItem::item("", DEFAULT_ITEM_QUANTITY, ""))
    }

    /// Appends an empty additional-charge row.
    pub fn add_charge(&mut self) -> RowId {
        self.push(LineItem::charge("", ""))
    }

    pub fn push(&mut self, item: LineItem) -> RowId {
        let row = FormRow::new(item);
        let id = row.id;
        self.rows.push(row);
        id
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<FormRow> {
        let index = self
            .index_of(id)
            .ok_or_else(|| InvoiceError::RowNotFound(id.to_string()))?;
        Ok(self.rows.remove(index))
    }

    pub fn row(&self, id: RowId) -> Option<&FormRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut FormRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    pub fn row_at(&self, index: usize) -> Option<&FormRow> {
        self.rows.get(index)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.rows.iter().map(|row| &row.item)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
