//! Well-known record field keys.

/// Display name of an object.
pub const NAME: &str = "name";

/// Extracted text snippet of an object's body.
pub const SNIPPET: &str = "snippet";

/// Numeric layout discriminant of an object.
pub const LAYOUT: &str = "layout";

/// Layout discriminant for note-like objects.
///
/// Notes have no standalone name; when sorting by [`NAME`] their snippet
/// stands in for a missing or empty name.
pub const LAYOUT_NOTE: i64 = 9;
