//! # LoomDB Order
//!
//! Record-ordering engine for LoomDB query results.
//!
//! A query names one or more sort keys, each with a direction, an empty
//! placement policy, and format-specific comparison semantics (dates,
//! tag/status labels, locale-aware text). This crate turns that
//! specification into a single deterministic comparator usable by any
//! generic sort:
//!
//! - [`KeyOrder`] compares two records on one key
//! - [`SetOrder`] chains key orders in priority order
//! - [`CustomOrder`] overrides a key order with an explicit value ranking
//!
//! Comparison never fails: missing fields compare as null, and a failed
//! option-store lookup degrades tag/status labels to empty strings. The
//! engine decides relative order only; which records match a query is the
//! query pipeline's concern.
//!
//! ## Example
//!
//! ```
//! use loomdb_order::{order_from_keys, sort_records, InMemoryOptions, SortKey};
//! use loomdb_value::Record;
//!
//! let mut records = vec![
//!     Record::new().with("name", "banana"),
//!     Record::new().with("name", "Apple"),
//! ];
//!
//! let order = order_from_keys("space-1", &[SortKey::asc("name")], &InMemoryOptions::default());
//! sort_records(&mut records, &order.into());
//!
//! assert_eq!(records[0].get("name"), Some(&"Apple".into()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collate;
mod error;
pub mod keys;
mod normalize;
mod order;
mod sorter;
mod sorts;
mod store;

pub use collate::Collation;
pub use error::{StoreError, StoreResult};
pub use order::{CustomOrder, KeyOrder, Order, SetOrder};
pub use sorter::{order_from_keys, sort_records};
pub use sorts::{EmptyPlacement, RelationFormat, SortDirection, SortKey};
pub use store::{InMemoryOptions, OptionStore};
