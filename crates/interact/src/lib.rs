pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod query;
pub mod state;

#[cfg(test)]
pub mod harness;

pub use controller::{CellController, ControllerOptions, DisplayMode, Gesture, KeyRouting};
pub use error::InteractError;
pub use events::{EventCallback, GridEvent};
pub use host::CellHost;
pub use input::{KeyInput, Modifiers, PointerInput};
pub use query::{CellContainer, QueryTool};
pub use state::{CellRegistration, GridState};
