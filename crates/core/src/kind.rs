//! Field value kinds.
//!
//! The kind tag is dispatched once at cell registration and drives which
//! keystrokes a cell accepts and whether the cell shows the read overlay
//! over its input.

use serde::{Deserialize, Serialize};

/// Value kind of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Select,
    Boolean,
}

impl FieldKind {
    /// True if the cell renders an editable text input underneath the overlay.
    /// Select and boolean cells render their native control directly.
    pub fn has_input(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Number)
    }

    /// True if the cell shows the non-interactive overlay until the user
    /// requests direct editing. Pure function of the kind: boolean and select
    /// cells never show it, regardless of selection state.
    pub fn shows_overlay(&self) -> bool {
        !matches!(self, FieldKind::Boolean | FieldKind::Select)
    }

    /// True if a typed character is acceptable as the first keystroke of a
    /// direct edit on this kind. Number cells accept digits only; signs and
    /// decimal points are typed after the input already has focus.
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            FieldKind::Text => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit(),
            FieldKind::Select | FieldKind::Boolean => false,
        }
    }
}
