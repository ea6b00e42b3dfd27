pub mod error;
pub mod filter;
pub mod update;

pub use error::SqlBuildError;
pub use filter::{build_filter_clause, FieldSpec, FilterSpec, Predicate, COMPANY_FILTERS, JOB_FILTERS};
pub use update::build_set_clause;

/// A SQL text fragment using positional placeholders (`$1`, `$2`, ...)
/// plus the values bound to them. Placeholder `$k` refers to
/// `params[k - 1]`; the two always have matching length and order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<serde_json::Value>,
}
