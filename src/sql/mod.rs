pub mod column_map;
pub mod error;
pub mod partial_update;

pub use column_map::ColumnMapper;
pub use error::SqlBuildError;
pub use partial_update::{build_partial_update, AssignmentClause, SparseUpdate};
