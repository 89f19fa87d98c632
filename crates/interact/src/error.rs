//! Interaction errors.
//!
//! Everything here is a misuse of the API surface, not a runtime condition:
//! errors are fatal, descriptive, surfaced immediately to the caller, and
//! never retried.

use editgrid_core::CellId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractError {
    /// A value change was routed for a field no mounted cell registered.
    #[error("no registered cell for field `{field}`")]
    UnregisteredField { field: String },

    /// An operation referenced a cell that was never registered.
    #[error("cell {id} is not registered with the grid")]
    UnregisteredCell { id: CellId },

    /// A query tool outlived its container: the container was rebuilt and
    /// the tool must be reconstructed against it.
    #[error("query tool is stale: built for container generation {expected}, container is at {found}")]
    StaleContainer { expected: u64, found: u64 },
}
