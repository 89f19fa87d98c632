//! Grid coordinator state.
//!
//! One `GridState` exists per grid instance and holds the only shared mutable
//! interaction state: the current selection (anchor + active range), the
//! selecting/editing flags, and the per-cell registrations. It is constructed
//! explicitly and passed by `&mut` reference to each cell controller - never
//! ambient or global. All transitions are synchronous, so a write is visible
//! to every cell before the next event is handled.

use editgrid_core::{CellCoords, CellId, CellRange, FieldKind, Selection};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::InteractError;
use crate::events::{EventCallback, GridEvent};

/// Per-cell registration metadata, created on mount.
///
/// Replaced (not merged) whenever the coords/field/kind triple changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRegistration {
    pub coords: CellCoords,
    pub field: String,
    pub kind: FieldKind,
}

#[derive(Default)]
pub struct GridState {
    selection: Option<Selection>,
    is_selecting: bool,
    is_editing: bool,
    registrations: FxHashMap<CellCoords, CellRegistration>,
    on_event: Option<EventCallback>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the event sink that receives change notifications.
    pub fn set_event_callback(&mut self, callback: EventCallback) {
        self.on_event = Some(callback);
    }

    fn emit(&mut self, event: GridEvent) {
        if let Some(cb) = self.on_event.as_mut() {
            cb(event);
        }
    }

    fn emit_selection_changed(&mut self) {
        if let Some(sel) = self.selection {
            self.emit(GridEvent::SelectionChanged {
                anchor: sel.anchor(),
                range: sel.range(),
            });
        }
    }

    // =========================================================================
    // Identity & Registration
    // =========================================================================

    /// Stable identity for a cell. Pure derivation from coordinates.
    pub fn register(&self, coords: CellCoords) -> CellId {
        CellId::from(coords)
    }

    /// Register a cell's field and kind. A second registration for the same
    /// coordinates replaces the previous entry.
    pub fn register_cell(&mut self, coords: CellCoords, field: impl Into<String>, kind: FieldKind) {
        let registration = CellRegistration { coords, field: field.into(), kind };
        if let Some(old) = self.registrations.insert(coords, registration) {
            debug!(cell = %CellId::from(coords), field = %old.field, "registration replaced");
            self.emit(GridEvent::RegistrationReplaced { coords });
        }
    }

    pub fn registration(&self, coords: CellCoords) -> Option<&CellRegistration> {
        self.registrations.get(&coords)
    }

    pub fn field_kind(&self, coords: CellCoords) -> Option<FieldKind> {
        self.registrations.get(&coords).map(|r| r.kind)
    }

    pub fn registrations(&self) -> impl Iterator<Item = &CellRegistration> {
        self.registrations.values()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The current anchor cell, if any selection exists.
    pub fn anchor(&self) -> Option<CellCoords> {
        self.selection.map(|s| s.anchor())
    }

    /// The active range, if any selection exists.
    pub fn range(&self) -> Option<CellRange> {
        self.selection.map(|s| s.range())
    }

    /// The range's end cell (opposite corner from the anchor), if any.
    pub fn selection_end(&self) -> Option<CellCoords> {
        self.selection.map(|s| s.end())
    }

    /// Set a fresh single-cell range: anchor = end = coords.
    pub fn set_single_range(&mut self, coords: CellCoords) {
        self.selection = Some(Selection::new(coords));
        self.emit_selection_changed();
    }

    /// Move the active range's end, keeping the anchor. Without an existing
    /// selection this degenerates to a fresh single-cell range.
    pub fn set_range_end(&mut self, coords: CellCoords) {
        match self.selection.as_mut() {
            Some(sel) => {
                sel.extend_to(coords);
                self.emit_selection_changed();
            }
            None => self.set_single_range(coords),
        }
    }

    pub fn set_selecting(&mut self, selecting: bool) {
        self.is_selecting = selecting;
    }

    pub fn is_selecting(&self) -> bool {
        self.is_selecting
    }

    pub fn set_editing(&mut self, editing: bool) {
        if self.is_editing != editing {
            self.is_editing = editing;
            self.emit(GridEvent::EditingChanged(editing));
        }
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_cell_selected(&self, coords: CellCoords) -> bool {
        self.selection.is_some_and(|s| s.contains(coords))
    }

    /// Inside the active range while a drag-selection gesture is in progress.
    pub fn is_cell_drag_selected(&self, coords: CellCoords) -> bool {
        self.is_selecting && self.is_cell_selected(coords)
    }

    // =========================================================================
    // Per-cell handler factories
    // =========================================================================

    /// Container focus: colocate the selection with the newly focused cell,
    /// unless it already falls inside the active range (a drag may legally
    /// end with focus on a covered cell).
    pub fn on_cell_focus(&mut self, coords: CellCoords) {
        if !self.is_cell_selected(coords) {
            self.set_single_range(coords);
        }
    }

    /// Mouse-over during a drag gesture extends the range end.
    pub fn on_cell_mouse_over(&mut self, coords: CellCoords) {
        if !self.is_selecting {
            return;
        }
        // Only update if the end cell changed, to avoid redundant re-renders.
        if self.selection.map(|s| s.end()) != Some(coords) {
            self.set_range_end(coords);
        }
    }

    /// Route a value change for a registered field to the event sink.
    pub fn on_input_change(&mut self, field: &str, value: &str) -> Result<(), InteractError> {
        if !self.registrations.values().any(|r| r.field == field) {
            return Err(InteractError::UnregisteredField { field: field.to_string() });
        }
        self.emit(GridEvent::CellEdited {
            field: field.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    /// End a drag gesture - called on mouse-up anywhere in the grid.
    pub fn end_drag(&mut self) {
        self.is_selecting = false;
    }

    /// Full reset for unrelated state changes (e.g. row-set reload).
    /// Selection, flags, and registrations do not survive.
    pub fn clear(&mut self) {
        self.selection = None;
        self.is_selecting = false;
        self.set_editing(false);
        self.registrations.clear();
    }
}
