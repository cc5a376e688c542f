//! Dynamic predicates: search criteria, query-by-example, sorting and pagination.
//!
//! Search criteria are ordered `(key, value, operation)` triples. Keys resolve through a
//! per-entity [`FieldTable`]; values are strings coerced to the field's [`FieldKind`]. The
//! [`PredicateCompiler`] turns a criteria list into one `AND` condition, and the
//! [`ExampleMatcher`] derives criteria from a partially populated probe.

pub mod conditions;
pub mod criteria;
pub mod example;
pub mod fields;
pub mod pagination;
pub mod sort;

pub use conditions::{DEFAULT_IN_DELIMITER, PredicateCompiler};
pub use criteria::{Criteria, SearchFieldCriteria, SearchOperation, UnknownOperation};
pub use example::ExampleMatcher;
pub use fields::{FieldKind, FieldTable, SearchField};
pub use pagination::{Page, PageParams, Pageable, calculate_content_range};
pub use sort::{SortDirection, SortOrder, parse_sort, resolve_order};
