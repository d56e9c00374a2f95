//! External option store boundary.

use std::collections::HashMap;

use crate::error::StoreResult;

/// Resolves tag and status option identifiers to display labels.
///
/// The engine performs at most one lookup per sort key, at order
/// construction time, and never per comparison. Implementations are
/// expected to bound the lookup with the same read deadline as other store
/// reads; a failure or timeout degrades to an empty label set on the
/// caller's side, so the store can never abort a sort.
pub trait OptionStore {
    /// Returns the option identifier to display label mapping for one
    /// relation key within a space.
    fn relation_options(&self, space_id: &str, key: &str) -> StoreResult<HashMap<String, String>>;
}

/// A `HashMap`-backed [`OptionStore`] keyed by `(space_id, key)`.
///
/// Useful for embedders that already hold option labels in memory, and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOptions {
    options: HashMap<(String, String), HashMap<String, String>>,
}

impl InMemoryOptions {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the labels for one relation key within a space.
    pub fn insert<I, S>(&mut self, space_id: &str, key: &str, labels: I)
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        self.options.insert(
            (space_id.to_owned(), key.to_owned()),
            labels
                .into_iter()
                .map(|(id, label)| (id.into(), label.into()))
                .collect(),
        );
    }
}

impl OptionStore for InMemoryOptions {
    fn relation_options(&self, space_id: &str, key: &str) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .options
            .get(&(space_id.to_owned(), key.to_owned()))
            .cloned()
            .unwrap_or_default())
    }
}
