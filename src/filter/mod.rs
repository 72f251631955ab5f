pub mod error;
pub mod query;

pub use query::{capped_limit, HierarchyParams, ScopedWhere};
