use std::collections::HashMap;

use super::line_item::{NumericField, RowId};
use crate::calculator::is_valid_positive_int;

/// Identity of an editable numeric input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Row { row: RowId, field: NumericField },
    DiscountValue,
}

impl FieldId {
    pub fn row(row: RowId, field: NumericField) -> Self {
        FieldId::Row { row, field }
    }

    /// Whether `raw` may replace the current value of this field.
    ///
    /// Clearing a field is always allowed. Row inputs take positive integers
    /// only; the discount also takes zero.
    pub fn accepts(&self, raw: &str) -> bool {
        if raw.is_empty() {
            return true;
        }
        match self {
            FieldId::Row { .. } => is_valid_positive_int(raw),
            FieldId::DiscountValue => raw.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Outcome of offering a new value to [`LastValidCache::accept`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptance {
    Accepted(String),
    /// The edit was rejected; the field should be written back to this value.
    Reverted(String),
}

impl Acceptance {
    pub fn value(&self) -> &str {
        match self {
            Acceptance::Accepted(value) | Acceptance::Reverted(value) => value,
        }
    }

    pub fn was_reverted(&self) -> bool {
        matches!(self, Acceptance::Reverted(_))
    }
}

/// Remembers the last accepted text of each numeric input so rejected
/// keystrokes can be undone.
#[derive(Debug, Clone, Default)]
pub struct LastValidCache {
    values: HashMap<FieldId, String>,
}

impl LastValidCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, id: FieldId, raw: &str) -> Acceptance {
        if id.accepts(raw) {
            self.values.insert(id, raw.to_string());
            Acceptance::Accepted(raw.to_string())
        } else {
            Acceptance::Reverted(self.last_valid(id).to_string())
        }
    }

    /// Records the text of a pre-filled input if the field would accept it.
    pub fn seed(&mut self, id: FieldId, raw: &str) {
        if id.accepts(raw) {
            self.values.insert(id, raw.to_string());
        }
    }

    pub fn last_valid(&self, id: FieldId) -> &str {
        self.values.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn forget_row(&mut self, row: RowId) {
        self.values
            .retain(|id, _| !matches!(id, FieldId::Row { row: owner, .. } if *owner == row));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
