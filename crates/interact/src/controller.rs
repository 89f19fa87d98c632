//! Per-cell controller.
//!
//! Each mounted cell owns one `CellController`. It derives a stable identity
//! from its coordinates, keeps the cell's registration in sync with the
//! coordinator, classifies raw pointer/keyboard events into coordinator
//! transitions, and runs the cell's display-mode machine (overlay shown vs.
//! input focused). Host effects (focus moves, key re-dispatch) go through
//! the `CellHost` seam.

use editgrid_core::{CellCoords, CellId, FieldKind};
use tracing::trace;

use crate::host::CellHost;
use crate::input::{KeyInput, PointerInput};
use crate::state::GridState;

/// Display state of one cell.
///
/// `Overlay` shows a non-interactive layer over the input; the cell is not
/// directly editable. `DirectEdit` hides the overlay and the input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Overlay,
    DirectEdit,
}

/// How a pointer-down on the cell was classified. Every gesture consumes the
/// event (the host analog of preventDefault + stopPropagation) so native
/// text selection and row-level handlers never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Double-click entered direct editing. Range and anchor untouched.
    Edit,
    /// Shift-click in the anchor's column extended the range end.
    Extend,
    /// Plain click set a fresh single-cell range and started selecting.
    Select,
    /// Consumed without effect (double-click on a cell with no input).
    Consumed,
}

/// How a key-down on the cell container was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRouting {
    /// Forwarded to the input: overlay hidden, input focused, key re-dispatched.
    Forwarded,
    /// Undo/copy/paste shortcut left for the host to handle natively.
    Exempt,
    /// Not a type-to-edit trigger for this cell in its current state.
    Ignored,
}

/// Behavior knobs, sourced from user settings.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// A printable keystroke on the overlaid anchor cell starts an edit.
    pub type_to_edit: bool,
    /// Select the input's existing content on a type-to-edit transition so
    /// typing replaces it (text inputs only).
    pub select_on_edit: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { type_to_edit: true, select_on_edit: true }
    }
}

/// Flags the view layer derives its styling from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    pub is_anchor: bool,
    pub is_selected: bool,
    pub is_drag_selected: bool,
    pub show_overlay: bool,
}

/// Attributes for the cell's outer container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerProps {
    pub id: CellId,
    pub coords: CellCoords,
    pub flags: RenderFlags,
}

/// Attributes for the cell's inner input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProps {
    pub id: CellId,
    pub coords: CellCoords,
    pub field: String,
}

pub struct CellController {
    coords: CellCoords,
    field: String,
    kind: FieldKind,
    id: CellId,
    mode: DisplayMode,
    options: ControllerOptions,
    /// Last (coords, field, kind) triple registered with the coordinator.
    /// Guards against duplicate registrations for an unchanged triple.
    registered: Option<(CellCoords, String, FieldKind)>,
}

impl CellController {
    pub fn new(coords: CellCoords, field: impl Into<String>, kind: FieldKind) -> Self {
        Self::with_options(coords, field, kind, ControllerOptions::default())
    }

    pub fn with_options(
        coords: CellCoords,
        field: impl Into<String>,
        kind: FieldKind,
        options: ControllerOptions,
    ) -> Self {
        Self {
            coords,
            field: field.into(),
            kind,
            id: CellId::from(coords),
            mode: DisplayMode::Overlay,
            options,
            registered: None,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn coords(&self) -> CellCoords {
        self.coords
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Register with the coordinator exactly once per distinct
    /// (coords, field, kind) triple. Call on mount and after any change.
    pub fn sync_registration(&mut self, state: &mut GridState) {
        let triple = (self.coords, self.field.clone(), self.kind);
        if self.registered.as_ref() == Some(&triple) {
            return;
        }
        state.register_cell(self.coords, self.field.clone(), self.kind);
        self.registered = Some(triple);
    }

    /// Rebind the controller to new coordinates/field/kind (cell re-mount).
    /// The next `sync_registration` replaces the coordinator entry.
    pub fn rebind(&mut self, coords: CellCoords, field: impl Into<String>, kind: FieldKind) {
        self.coords = coords;
        self.field = field.into();
        self.kind = kind;
        self.id = CellId::from(coords);
        self.mode = DisplayMode::Overlay;
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    /// Classify a pointer-down on the cell's outer container. Mutually
    /// exclusive gestures, tested in priority order: double-click, then
    /// same-column shift-click, then plain click.
    pub fn on_container_mouse_down(
        &mut self,
        state: &mut GridState,
        host: &mut dyn CellHost,
        event: &PointerInput,
    ) -> Gesture {
        if event.click_count >= 2 {
            // Double-click never falls through to range logic.
            if !self.kind.has_input() {
                return Gesture::Consumed;
            }
            trace!(cell = %self.id, "double-click edit");
            self.enter_direct_edit(state, host);
            return Gesture::Edit;
        }

        if event.modifiers.shift {
            // Only a click in the anchor's own column extends; otherwise
            // shift is ignored and the click behaves like a plain click.
            if let Some(anchor) = state.anchor() {
                if anchor.col == self.coords.col {
                    state.set_range_end(self.coords);
                    return Gesture::Extend;
                }
            }
        }

        state.set_single_range(self.coords);
        state.set_selecting(true);
        host.focus_container(self.id);
        Gesture::Select
    }

    /// Pointer-down on a boolean cell's inner control follows the same
    /// classification as the container.
    pub fn on_control_mouse_down(
        &mut self,
        state: &mut GridState,
        host: &mut dyn CellHost,
        event: &PointerInput,
    ) -> Gesture {
        self.on_container_mouse_down(state, host, event)
    }

    // =========================================================================
    // Keystroke forwarding
    // =========================================================================

    /// Classify a key-down on the cell's outer container. A keystroke is
    /// forwarded to the input only when the cell has an input, the overlay is
    /// showing, this cell is the anchor, and the key is a single printable
    /// character the cell's kind accepts. Ctrl/platform + z/c/v stay native.
    pub fn on_container_key_down(
        &mut self,
        state: &mut GridState,
        host: &mut dyn CellHost,
        event: &KeyInput,
    ) -> KeyRouting {
        if event.is_native_shortcut() {
            return KeyRouting::Exempt;
        }
        if !self.options.type_to_edit
            || !self.kind.has_input()
            || self.mode != DisplayMode::Overlay
            || state.anchor() != Some(self.coords)
        {
            return KeyRouting::Ignored;
        }
        let Some(c) = event.printable_char() else {
            return KeyRouting::Ignored;
        };
        if !self.kind.accepts_char(c) {
            return KeyRouting::Ignored;
        }

        trace!(cell = %self.id, key = %event.key, "type-to-edit");
        self.mode = DisplayMode::DirectEdit;
        state.set_editing(true);
        host.focus_input(self.id);
        if self.options.select_on_edit && self.kind == FieldKind::Text {
            host.select_input_contents(self.id);
        }
        host.redispatch_key(self.id, event);
        KeyRouting::Forwarded
    }

    // =========================================================================
    // Input focus transitions
    // =========================================================================

    /// Gaining input focus by any means forces direct editing.
    pub fn on_input_focus(&mut self, state: &mut GridState) {
        self.mode = DisplayMode::DirectEdit;
        state.set_editing(true);
    }

    /// Losing input focus returns the cell to the overlay.
    pub fn on_input_blur(&mut self, state: &mut GridState) {
        self.mode = DisplayMode::Overlay;
        state.set_editing(false);
    }

    fn enter_direct_edit(&mut self, state: &mut GridState, host: &mut dyn CellHost) {
        self.mode = DisplayMode::DirectEdit;
        state.set_editing(true);
        host.focus_input(self.id);
    }

    // =========================================================================
    // Anchor-focus sync & render output
    // =========================================================================

    /// Whenever this cell is the anchor and its container does not already
    /// contain the focused element, pull focus to the container. Guarantees
    /// keyboard navigation always has a focus target colocated with the
    /// logical anchor.
    pub fn sync_anchor_focus(&self, state: &GridState, host: &mut dyn CellHost) {
        if state.anchor() == Some(self.coords) && !host.container_contains_focus(self.id) {
            host.focus_container(self.id);
        }
    }

    pub fn render_flags(&self, state: &GridState) -> RenderFlags {
        RenderFlags {
            is_anchor: state.anchor() == Some(self.coords),
            is_selected: state.is_cell_selected(self.coords),
            is_drag_selected: state.is_cell_drag_selected(self.coords),
            show_overlay: self.kind.shows_overlay() && self.mode == DisplayMode::Overlay,
        }
    }

    /// Render-props bundle consumed by the view layer to build the cell.
    pub fn render_props(&self, state: &GridState) -> (ContainerProps, InputProps) {
        (
            ContainerProps {
                id: self.id,
                coords: self.coords,
                flags: self.render_flags(state),
            },
            InputProps {
                id: self.id,
                coords: self.coords,
                field: self.field.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{key, pointer, shift_click, shortcut_key, RecordingHost, HostEffect};
    use crate::input::Modifiers;
    use editgrid_core::CellRange;

    fn controller(row: usize, col: usize, kind: FieldKind) -> CellController {
        CellController::new(CellCoords::new(row, col), format!("field_{col}"), kind)
    }

    #[test]
    fn test_plain_click_selects_and_focuses() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(2, 3, FieldKind::Text);

        let gesture = cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));

        assert_eq!(gesture, Gesture::Select);
        assert_eq!(state.anchor(), Some(CellCoords::new(2, 3)));
        assert_eq!(state.range(), Some(CellRange::single(CellCoords::new(2, 3))));
        assert!(state.is_selecting());
        assert_eq!(host.effects(), &[HostEffect::FocusContainer(cell.id())]);
    }

    #[test]
    fn test_shift_click_same_column_extends() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut anchor_cell = controller(1, 2, FieldKind::Text);
        let mut other_cell = controller(4, 2, FieldKind::Text);

        anchor_cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        let gesture = other_cell.on_container_mouse_down(&mut state, &mut host, &shift_click());

        assert_eq!(gesture, Gesture::Extend);
        assert_eq!(state.anchor(), Some(CellCoords::new(1, 2)));
        assert!(state.is_cell_selected(CellCoords::new(3, 2)));
        // Extending does not move container focus.
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_shift_click_other_column_is_plain_click() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut anchor_cell = controller(1, 2, FieldKind::Text);
        let mut other_cell = controller(4, 5, FieldKind::Text);

        anchor_cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));

        let gesture = other_cell.on_container_mouse_down(&mut state, &mut host, &shift_click());

        assert_eq!(gesture, Gesture::Select);
        assert_eq!(state.anchor(), Some(CellCoords::new(4, 5)));
        assert_eq!(state.range(), Some(CellRange::single(CellCoords::new(4, 5))));
    }

    #[test]
    fn test_double_click_edits_without_touching_range() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut anchor_cell = controller(0, 0, FieldKind::Text);
        let mut clicked = controller(5, 1, FieldKind::Text);

        anchor_cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        let gesture = clicked.on_container_mouse_down(&mut state, &mut host, &pointer(2, Modifiers::NONE));

        assert_eq!(gesture, Gesture::Edit);
        assert_eq!(clicked.mode(), DisplayMode::DirectEdit);
        assert!(state.is_editing());
        // Anchor and range are untouched by a double-click.
        assert_eq!(state.anchor(), Some(CellCoords::new(0, 0)));
        assert_eq!(host.effects(), &[HostEffect::FocusInput(clicked.id())]);
    }

    #[test]
    fn test_double_click_without_input_is_consumed() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(0, 0, FieldKind::Select);

        let gesture = cell.on_container_mouse_down(&mut state, &mut host, &pointer(2, Modifiers::NONE));

        assert_eq!(gesture, Gesture::Consumed);
        assert_eq!(cell.mode(), DisplayMode::Overlay);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_boolean_control_click_selects() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(3, 0, FieldKind::Boolean);

        let gesture = cell.on_control_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));

        assert_eq!(gesture, Gesture::Select);
        assert_eq!(state.anchor(), Some(CellCoords::new(3, 0)));
    }

    #[test]
    fn test_type_to_edit_forwards_digit_on_number_cell() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(1, 1, FieldKind::Number);

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        let routing = cell.on_container_key_down(&mut state, &mut host, &key("7"));

        assert_eq!(routing, KeyRouting::Forwarded);
        assert_eq!(cell.mode(), DisplayMode::DirectEdit);
        assert!(state.is_editing());
        // Number inputs do not get their contents selected.
        assert_eq!(
            host.effects(),
            &[
                HostEffect::FocusInput(cell.id()),
                HostEffect::Redispatch(cell.id(), "7".into()),
            ]
        );
    }

    #[test]
    fn test_type_to_edit_selects_text_contents() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(1, 1, FieldKind::Text);

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        let routing = cell.on_container_key_down(&mut state, &mut host, &key("x"));

        assert_eq!(routing, KeyRouting::Forwarded);
        assert_eq!(
            host.effects(),
            &[
                HostEffect::FocusInput(cell.id()),
                HostEffect::SelectContents(cell.id()),
                HostEffect::Redispatch(cell.id(), "x".into()),
            ]
        );
    }

    #[test]
    fn test_non_digits_not_forwarded_on_number_cell() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(1, 1, FieldKind::Number);

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        // Digits only: letters, sign, and decimal point all stay with the
        // overlay instead of starting an edit.
        for k in ["x", "-", "."] {
            assert_eq!(cell.on_container_key_down(&mut state, &mut host, &key(k)), KeyRouting::Ignored);
        }
        assert_eq!(cell.mode(), DisplayMode::Overlay);
        assert!(!state.is_editing());
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_native_shortcuts_exempt() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(1, 1, FieldKind::Text);

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        for k in ["z", "c", "v"] {
            assert_eq!(
                cell.on_container_key_down(&mut state, &mut host, &shortcut_key(k)),
                KeyRouting::Exempt
            );
        }
        assert_eq!(cell.mode(), DisplayMode::Overlay);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_no_forward_when_not_anchor() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut anchor_cell = controller(0, 0, FieldKind::Text);
        let mut other = controller(2, 2, FieldKind::Text);

        anchor_cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));

        assert_eq!(other.on_container_key_down(&mut state, &mut host, &key("a")), KeyRouting::Ignored);
    }

    #[test]
    fn test_no_forward_while_direct_edit() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut cell = controller(0, 0, FieldKind::Text);

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        cell.on_input_focus(&mut state);
        host.clear();

        assert_eq!(cell.on_container_key_down(&mut state, &mut host, &key("a")), KeyRouting::Ignored);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_no_forward_for_select_and_boolean() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();

        for kind in [FieldKind::Select, FieldKind::Boolean] {
            let mut cell = controller(0, 0, kind);
            cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
            assert_eq!(cell.on_container_key_down(&mut state, &mut host, &key("a")), KeyRouting::Ignored);
        }
    }

    #[test]
    fn test_type_to_edit_disabled_by_option() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let options = ControllerOptions { type_to_edit: false, select_on_edit: true };
        let mut cell = CellController::with_options(
            CellCoords::new(0, 0), "name", FieldKind::Text, options,
        );

        cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        host.clear();

        assert_eq!(cell.on_container_key_down(&mut state, &mut host, &key("a")), KeyRouting::Ignored);
    }

    #[test]
    fn test_focus_blur_transitions() {
        let mut state = GridState::new();
        let mut cell = controller(0, 0, FieldKind::Text);

        cell.on_input_focus(&mut state);
        assert_eq!(cell.mode(), DisplayMode::DirectEdit);
        assert!(state.is_editing());

        cell.on_input_blur(&mut state);
        assert_eq!(cell.mode(), DisplayMode::Overlay);
        assert!(!state.is_editing());
    }

    #[test]
    fn test_boolean_keeps_editing_bookkeeping_without_overlay() {
        let mut state = GridState::new();
        let mut cell = controller(0, 0, FieldKind::Boolean);

        cell.on_input_focus(&mut state);
        assert!(state.is_editing());
        assert!(!cell.render_flags(&state).show_overlay);

        cell.on_input_blur(&mut state);
        assert!(!state.is_editing());
        assert!(!cell.render_flags(&state).show_overlay);
    }

    #[test]
    fn test_sync_registration_once_per_triple() {
        let mut state = GridState::new();
        let mut cell = controller(0, 0, FieldKind::Text);

        cell.sync_registration(&mut state);
        cell.sync_registration(&mut state);
        assert_eq!(state.registrations().count(), 1);

        cell.rebind(CellCoords::new(0, 0), "field_0", FieldKind::Number);
        cell.sync_registration(&mut state);
        assert_eq!(state.registrations().count(), 1);
        assert_eq!(state.field_kind(CellCoords::new(0, 0)), Some(FieldKind::Number));
    }

    #[test]
    fn test_sync_anchor_focus_pulls_focus() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let cell = controller(2, 2, FieldKind::Text);

        state.set_single_range(CellCoords::new(2, 2));
        cell.sync_anchor_focus(&state, &mut host);
        assert_eq!(host.effects(), &[HostEffect::FocusContainer(cell.id())]);

        // Already focused: no redundant pull.
        host.clear();
        cell.sync_anchor_focus(&state, &mut host);
        assert!(host.effects().is_empty());

        // Not the anchor: nothing happens.
        state.set_single_range(CellCoords::new(9, 9));
        host.clear();
        cell.sync_anchor_focus(&state, &mut host);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_render_flags_and_props() {
        let mut state = GridState::new();
        let mut host = RecordingHost::new();
        let mut anchor_cell = controller(0, 0, FieldKind::Text);
        let covered = controller(2, 0, FieldKind::Text);

        anchor_cell.on_container_mouse_down(&mut state, &mut host, &pointer(1, Modifiers::NONE));
        state.set_range_end(CellCoords::new(3, 0));

        let flags = anchor_cell.render_flags(&state);
        assert!(flags.is_anchor && flags.is_selected && flags.is_drag_selected);
        assert!(flags.show_overlay);

        let flags = covered.render_flags(&state);
        assert!(!flags.is_anchor && flags.is_selected && flags.is_drag_selected);

        state.end_drag();
        assert!(!covered.render_flags(&state).is_drag_selected);

        let (container, input) = covered.render_props(&state);
        assert_eq!(container.id, covered.id());
        assert_eq!(container.coords, CellCoords::new(2, 0));
        assert_eq!(input.field, "field_0");
    }
}
