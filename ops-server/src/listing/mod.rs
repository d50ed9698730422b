//! Order listing pipeline
//!
//! - [`filter`]: view → SQL predicate construction
//! - [`flatten`]: nested order graph → flat grid rows
//! - [`search`]: cross-bucket search aggregation

pub mod filter;
pub mod flatten;
pub mod search;

pub use filter::{OrderListQuery, OrderListView, SearchBucket, SortField, UnifiedView};
pub use flatten::{FlatOrderRow, flatten_orders};
