//! Test harness for controller interactions.
//!
//! Provides `RecordingHost`, a `CellHost` that records imperative effects and
//! tracks a notional focused element, plus input-event builders. Use this to
//! test gesture and keystroke transitions without any UI dependencies.

use editgrid_core::CellId;

use crate::host::CellHost;
use crate::input::{KeyInput, Modifiers, PointerInput};

/// One recorded host effect, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    FocusContainer(CellId),
    FocusInput(CellId),
    SelectContents(CellId),
    Redispatch(CellId, String),
}

#[derive(Default)]
pub struct RecordingHost {
    effects: Vec<HostEffect>,
    focused: Option<CellId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn focused(&self) -> Option<CellId> {
        self.focused
    }
}

impl CellHost for RecordingHost {
    fn focus_container(&mut self, id: CellId) {
        self.focused = Some(id);
        self.effects.push(HostEffect::FocusContainer(id));
    }

    fn focus_input(&mut self, id: CellId) {
        self.focused = Some(id);
        self.effects.push(HostEffect::FocusInput(id));
    }

    fn select_input_contents(&mut self, id: CellId) {
        self.effects.push(HostEffect::SelectContents(id));
    }

    fn redispatch_key(&mut self, id: CellId, key: &KeyInput) {
        self.effects.push(HostEffect::Redispatch(id, key.key.clone()));
    }

    fn container_contains_focus(&self, id: CellId) -> bool {
        self.focused == Some(id)
    }
}

/// Pointer-down with the given repeat count and modifiers.
pub fn pointer(click_count: u32, modifiers: Modifiers) -> PointerInput {
    PointerInput { click_count, modifiers }
}

/// Single click with shift held.
pub fn shift_click() -> PointerInput {
    PointerInput { click_count: 1, modifiers: Modifiers { shift: true, ..Modifiers::NONE } }
}

/// Plain key press.
pub fn key(k: &str) -> KeyInput {
    KeyInput::new(k, Modifiers::NONE)
}

/// Key press with ctrl held (the primary shortcut modifier).
pub fn shortcut_key(k: &str) -> KeyInput {
    KeyInput::new(k, Modifiers { control: true, ..Modifiers::NONE })
}
