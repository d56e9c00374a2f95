//! # LoomDB Testkit
//!
//! Test utilities for LoomDB.
//!
//! Currently this is property-based test generators for random values and
//! records, used by the ordering engine's total-preorder law tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod generators;

pub use generators::{record_strategy, value_strategy};
