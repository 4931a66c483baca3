//! # urlfilter
//!
//! Build query strings for APIs that read filters as `field=operator:value`.
//!
//! ```rust
//! use urlfilter::FilterBuilder;
//!
//! let mut filters = FilterBuilder::new();
//! filters
//!     .equals("status", "active")
//!     .not_in("role", ["guest"])
//!     .between("price", [10, 100])?;
//!
//! assert_eq!(
//!     filters.to_string(),
//!     "status=active&role=!in%3Aguest&price=%3E%3C%3A10%2C100"
//! );
//! # Ok::<(), urlfilter::FilterError>(())
//! ```
//!
//! ## Operators
//!
//! | Method | Written as |
//! |---|---|
//! | `equals` | `value` |
//! | `greater_than` / `greater_than_or_equal` | `>:value` / `>=:value` |
//! | `less_than` / `less_than_or_equal` | `<:value` / `<=:value` |
//! | `not_equals` | `!=:value` |
//! | `like` / `not_like` | `~:value` / `!~:value` |
//! | `is_in` / `not_in` | `in:a,b` / `!in:a,b` |
//! | `between` | `><:low,high` |
//!
//! ## Features
//!
//! - `json` (default): `TryFrom<serde_json::Value>` for filter values
//! - `uuid`: `uuid::Uuid` as a filter value
//! - `chrono`: `chrono` dates and timestamps as filter values

pub mod builder;
pub mod encoding;
pub mod errors;
pub mod operator;
pub mod tagged;
pub mod value;

pub use builder::FilterBuilder;
pub use errors::FilterError;
pub use operator::FilterOperator;
pub use tagged::TaggedValue;
pub use value::{FilterArg, FilterValue};
