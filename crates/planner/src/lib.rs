pub mod address;
pub mod error;
pub mod filter;
pub mod join;
pub mod options;
pub mod predicate;
pub mod query;
pub mod resolve;
pub mod search;
pub mod sort;

pub use error::PlanError;
pub use options::{CompileOptions, FieldPolicy, SearchMode};
pub use predicate::{CompareOp, Predicate};
pub use resolve::{FieldMap, FieldMapCache, FieldTarget};
pub use sort::OrderBy;
