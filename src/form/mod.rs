//! Raw invoice form state and the editing rules the form applies on input.

pub mod discount;
pub mod editor;
pub mod field_cache;
pub mod line_item;
pub mod state;

pub use discount::{DiscountKind, DiscountSpec};
pub use editor::FormEditor;
pub use field_cache::{Acceptance, FieldId, LastValidCache};
pub use line_item::{FormRow, LineItem, NumericField, RowId, RowKind, DEFAULT_ITEM_QUANTITY};
pub use state::FormState;
