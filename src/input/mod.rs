mod arms;
mod groups;
mod matrix;
mod positions;

pub use arms::ArmBreakpoints;
pub use groups::{read_cell_list, read_cell_list_path, CellGroups};
pub use matrix::{ExpressionMatrix, MAX_LOG_EXPRESSION};
pub use positions::{GenePosition, GenePositions};
