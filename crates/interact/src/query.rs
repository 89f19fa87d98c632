//! Imperative cell lookup.
//!
//! The query tool resolves a cell's host element by identity or coordinates
//! so focus/scroll operations can run outside the normal render cycle. It is
//! a lookup indirection only - no selection logic lives here.
//!
//! A tool is built once per container lifetime. Containers advance a
//! generation when rebuilt; a tool whose generation no longer matches its
//! container fails with a descriptive error so the caller reconstructs it.

use editgrid_core::{CellCoords, CellId};

use crate::error::InteractError;

/// A host-side container that can resolve cell elements by identity.
pub trait CellContainer {
    /// Handle to the underlying element (DOM node, screen rect, widget id).
    type Handle;

    /// Monotonic generation, advanced whenever the container is rebuilt.
    fn generation(&self) -> u64;

    fn handle_for(&self, id: CellId) -> Option<Self::Handle>;
}

pub struct QueryTool<'a, C: CellContainer> {
    container: &'a C,
    generation: u64,
}

impl<'a, C: CellContainer> QueryTool<'a, C> {
    /// Bind a tool to a container, capturing its current generation.
    pub fn new(container: &'a C) -> Self {
        Self { container, generation: container.generation() }
    }

    fn check_fresh(&self) -> Result<(), InteractError> {
        let found = self.container.generation();
        if found != self.generation {
            return Err(InteractError::StaleContainer { expected: self.generation, found });
        }
        Ok(())
    }

    /// Resolve the element for a cell identity.
    pub fn element_by_id(&self, id: CellId) -> Result<C::Handle, InteractError> {
        self.check_fresh()?;
        self.container
            .handle_for(id)
            .ok_or(InteractError::UnregisteredCell { id })
    }

    /// Resolve the element at the given coordinates.
    pub fn element_at(&self, coords: CellCoords) -> Result<C::Handle, InteractError> {
        self.element_by_id(CellId::from(coords))
    }
}
