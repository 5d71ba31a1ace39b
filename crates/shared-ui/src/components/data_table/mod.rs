mod component;
pub mod view;

pub use component::*;
pub use view::{CellRenderer, CellValue, ColumnDef, Row, SortDirection, SortKind};
