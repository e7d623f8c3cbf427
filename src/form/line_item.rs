use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a form row, independent of its position.
pub type RowId = Uuid;

/// Quantity pre-filled into freshly added item rows.
pub const DEFAULT_ITEM_QUANTITY: &str = "1";

/// A billable row as typed into the form. All values are raw field text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineItem {
    Item {
        #[serde(default)]
        description: String,
        #[serde(default, rename = "quantity")]
        quantity_raw: String,
        #[serde(default, rename = "rate")]
        rate_raw: String,
    },
    #[serde(rename = "additional")]
    AdditionalCharge {
        #[serde(default)]
        description: String,
        #[serde(default, rename = "price")]
        price_raw: String,
    },
}

impl LineItem {
    pub fn item(
        description: impl Into<String>,
        quantity: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        LineItem::Item {
            description: description.into(),
            quantity_raw: quantity.into(),
            rate_raw: rate.into(),
        }
    }

    pub fn charge(description: impl Into<String>, price: impl Into<String>) -> Self {
        LineItem::AdditionalCharge {
            description: description.into(),
            price_raw: price.into(),
        }
    }

    pub fn kind(&self) -> RowKind {
        match self {
            LineItem::Item { .. } => RowKind::Item,
            LineItem::AdditionalCharge { .. } => RowKind::AdditionalCharge,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LineItem::Item { description, .. } | LineItem::AdditionalCharge { description, .. } => {
                description
            }
        }
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        match self {
            LineItem::Item { description, .. } | LineItem::AdditionalCharge { description, .. } => {
                *description = value.into();
            }
        }
    }

    /// Numeric inputs this row exposes, in display order.
    pub fn numeric_fields(&self) -> &'static [NumericField] {
        match self {
            LineItem::Item { .. } => &[NumericField::Quantity, NumericField::Rate],
            LineItem::AdditionalCharge { .. } => &[NumericField::Price],
        }
    }

    /// Raw text of a numeric input, or `None` when the row kind has no such field.
    pub fn numeric(&self, field: NumericField) -> Option<&str> {
        match (self, field) {
            (LineItem::Item { quantity_raw, .. }, NumericField::Quantity) => {
                Some(quantity_raw.as_str())
            }
            (LineItem::Item { rate_raw, .. }, NumericField::Rate) => Some(rate_raw.as_str()),
            (LineItem::AdditionalCharge { price_raw, .. }, NumericField::Price) => {
                Some(price_raw.as_str())
            }
            _ => None,
        }
    }

    /// Writes a numeric input. Returns `false` when the row kind has no such field.
    pub fn set_numeric(&mut self, field: NumericField, value: impl Into<String>) -> bool {
        let slot = match (self, field) {
            (LineItem::Item { quantity_raw, .. }, NumericField::Quantity) => quantity_raw,
            (LineItem::Item { rate_raw, .. }, NumericField::Rate) => rate_raw,
            (LineItem::AdditionalCharge { price_raw, .. }, NumericField::Price) => price_raw,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Item,
    #[serde(rename = "additional")]
    AdditionalCharge,
}

/// Numeric inputs a row can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Quantity,
    Rate,
    Price,
}

impl NumericField {
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Quantity => "qty",
            NumericField::Rate => "rate",
            NumericField::Price => "price",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "qty" | "quantity" => Some(NumericField::Quantity),
            "rate" => Some(NumericField::Rate),
            "price" => Some(NumericField::Price),
            _ => None,
        }
    }
}

/// A line item together with its row identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormRow {
    #[serde(default = "Uuid::new_v4")]
    pub id: RowId,
    #[serde(flatten)]
    pub item: LineItem,
}

impl FormRow {
    pub fn new(item: LineItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_deserialize_by_kind_tag() {
        let json = r#"[
            {"kind": "item", "description": "Chair", "quantity": "2", "rate": "150"},
            {"kind": "additional", "description": "Delivery", "price": "50"}
        ]"#;
        let rows: Vec<FormRow> = serde_json::from_str(json).expect("rows");
        assert_eq!(rows[0].item, LineItem::item("Chair", "2", "150"));
        assert_eq!(rows[1].item, LineItem::charge("Delivery", "50"));
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[test]
    fn numeric_access_follows_row_kind() {
        let mut charge = LineItem::charge("Delivery", "50");
        assert_eq!(charge.numeric(NumericField::Price), Some("50"));
        assert_eq!(charge.numeric(NumericField::Quantity), None);
        assert!(!charge.set_numeric(NumericField::Rate, "3"));
        assert!(charge.set_numeric(NumericField::Price, "75"));
        assert_eq!(charge.numeric(NumericField::Price), Some("75"));
    }
}
