//! Raw input event shapes delivered by the host.
//!
//! These mirror what UI toolkits hand to per-cell listeners: a pointer event
//! carrying a click repeat count and modifier flags, and a key event carrying
//! the key string plus modifiers. Double-click detection rides on the host's
//! repeat count rather than any timing logic here.

/// Modifier key state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    /// Cmd on macOS, Win elsewhere.
    pub platform: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, control: false, alt: false, platform: false };

    /// True if the primary shortcut modifier (ctrl or platform) is held.
    pub fn shortcut(&self) -> bool {
        self.control || self.platform
    }
}

/// A pointer-down event on a cell container (or a boolean cell's inner control).
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    /// Host-reported repeat count: 1 = click, 2 = double-click, ...
    pub click_count: u32,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn click(modifiers: Modifiers) -> Self {
        Self { click_count: 1, modifiers }
    }

    pub fn double_click() -> Self {
        Self { click_count: 2, modifiers: Modifiers::NONE }
    }
}

/// A key-down event on a cell container.
#[derive(Debug, Clone)]
pub struct KeyInput {
    /// Key string as reported by the host ("a", "7", "enter", "escape").
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers }
    }

    /// The typed character, if this event is a single printable character.
    pub fn printable_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        let c = chars.next()?;
        if chars.next().is_some() || c.is_control() {
            return None;
        }
        Some(c)
    }

    /// True for the literal undo/copy/paste set the host handles natively:
    /// z, c or v with ctrl or the platform key held. These are exempt from
    /// type-to-edit forwarding.
    pub fn is_native_shortcut(&self) -> bool {
        self.modifiers.shortcut() && matches!(self.key.as_str(), "z" | "c" | "v")
    }
}
