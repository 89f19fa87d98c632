pub mod cell_id;
pub mod coords;
pub mod kind;
pub mod range;
pub mod selection;

pub use cell_id::CellId;
pub use coords::CellCoords;
pub use kind::FieldKind;
pub use range::CellRange;
pub use selection::Selection;
