//! The imperative seam between controllers and the rendering host.
//!
//! Controllers never touch elements directly; they request focus moves and
//! key re-dispatch through this trait so the same logic drives any frontend
//! (and the test harness records the effects instead).

use editgrid_core::CellId;

use crate::input::KeyInput;

pub trait CellHost {
    /// Move focus to the cell's outer container.
    fn focus_container(&mut self, id: CellId);

    /// Move focus to the cell's inner input.
    fn focus_input(&mut self, id: CellId);

    /// Select the input's existing content so the next keystroke replaces it.
    fn select_input_contents(&mut self, id: CellId);

    /// Re-dispatch a keyboard event to the input so the triggering character
    /// of a type-to-edit transition is not lost.
    fn redispatch_key(&mut self, id: CellId, key: &KeyInput);

    /// True if the focused element lives inside this cell's container.
    fn container_contains_focus(&self, id: CellId) -> bool;
}
