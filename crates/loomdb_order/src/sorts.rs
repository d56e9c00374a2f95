//! Sort specification types.
//!
//! A query's sort specification arrives from the query layer already
//! validated; these types only carry it to the ordering engine.

use serde::{Deserialize, Serialize};

use loomdb_value::Value;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest value first.
    #[default]
    Ascending,
    /// Largest value first.
    Descending,
}

/// Placement policy for null and empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPlacement {
    /// No special routing; empties order by the regular comparison.
    #[default]
    Unspecified,
    /// Null and empty values sort before everything else.
    Start,
    /// Null and empty values sort after everything else.
    End,
}

/// Format tag of a relation, controlling value normalization.
///
/// Only [`Date`](RelationFormat::Date), [`Tag`](RelationFormat::Tag), and
/// [`Status`](RelationFormat::Status) change how values are compared; the
/// remaining formats compare by the generic value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationFormat {
    /// Plain text.
    #[default]
    Text,
    /// Number.
    Number,
    /// Date, stored as a Unix timestamp in seconds.
    Date,
    /// Checkbox.
    Checkbox,
    /// Multi-valued tag option identifiers.
    Tag,
    /// Single-valued status option identifier.
    Status,
    /// Reference to another object.
    Object,
}

/// One key of a query's sort specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortKey {
    /// The record field to sort on.
    pub key: String,
    /// Relation format of the field.
    #[serde(default)]
    pub format: RelationFormat,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
    /// Placement of null and empty values.
    #[serde(default)]
    pub empty_placement: EmptyPlacement,
    /// For date relations, whether time-of-day participates in comparison.
    #[serde(default)]
    pub include_time: bool,
    /// Explicit value ranking overriding the automatic ordering.
    #[serde(default)]
    pub custom_order: Vec<Value>,
}

impl SortKey {
    /// Creates an ascending sort key.
    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Creates a descending sort key.
    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
            ..Self::default()
        }
    }

    /// Sets the relation format.
    #[must_use]
    pub fn with_format(mut self, format: RelationFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the empty placement policy.
    #[must_use]
    pub fn with_empty_placement(mut self, placement: EmptyPlacement) -> Self {
        self.empty_placement = placement;
        self
    }

    /// Sets whether time-of-day participates in date comparison.
    #[must_use]
    pub fn with_include_time(mut self, include_time: bool) -> Self {
        self.include_time = include_time;
        self
    }

    /// Sets an explicit value ranking for this key.
    #[must_use]
    pub fn with_custom_order(mut self, sequence: Vec<Value>) -> Self {
        self.custom_order = sequence;
        self
    }
}
