//! Event types for grid state change notifications.
//!
//! The coordinator emits these so a host view layer can re-render affected
//! cells without polling. They're also used by the test harness to verify
//! invariants about transition ordering.

use editgrid_core::{CellCoords, CellRange};

/// Events emitted by `GridState` during interaction transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// The anchor or the active range changed.
    SelectionChanged {
        anchor: CellCoords,
        range: CellRange,
    },

    /// The editing flag flipped (an input gained or lost focus).
    EditingChanged(bool),

    /// A cell's value changed through its registered field.
    CellEdited {
        field: String,
        value: String,
    },

    /// A cell registration was replaced by a re-mount or a coords/field/kind
    /// change.
    RegistrationReplaced {
        coords: CellCoords,
    },
}

/// Callback type for receiving grid events.
pub type EventCallback = Box<dyn FnMut(GridEvent)>;

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
