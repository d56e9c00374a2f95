//! # LoomDB Value
//!
//! Dynamic value and record types for LoomDB.
//!
//! This crate provides:
//! - [`Value`], a dynamically typed field value (null, bool, number, text,
//!   list, struct)
//! - [`ValueKind`], the total order over value kinds used as a comparison
//!   tiebreak
//! - [`Record`], one query result row: a mapping from field keys to values
//!
//! Values bridge to and from `serde_json::Value`, so records can be built
//! from JSON documents returned by the object store.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod record;
mod value;

pub use record::Record;
pub use value::{Value, ValueKind};
