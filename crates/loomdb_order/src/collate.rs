//! Locale-aware text collation.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};

/// Locale-aware, case-insensitive string comparator.
///
/// Backed by the ICU root collation at strength `Secondary`: case
/// differences are ignored, accents are significant. Built once per key
/// order at construction time; comparisons are pure after that.
///
/// If collator data cannot be loaded the comparison degrades to a
/// lowercase byte-wise ordering rather than failing.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    /// Builds the root-locale, case-insensitive collation.
    #[must_use]
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Self {
            collator: Collator::try_new(&Default::default(), options).ok(),
        }
    }

    /// Compares two strings under this collation.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("loaded", &self.collator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_is_ignored() {
        let collation = Collation::new();
        assert_eq!(collation.compare("Apple", "apple"), Ordering::Equal);
        assert_eq!(collation.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(collation.compare("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn accents_are_significant() {
        let collation = Collation::new();
        assert_ne!(collation.compare("resume", "résumé"), Ordering::Equal);
    }

    #[test]
    fn accented_letters_collate_near_base_letters() {
        let collation = Collation::new();
        // Byte-wise ordering would put "é" after "z"
        assert_eq!(collation.compare("étude", "zebra"), Ordering::Less);
    }
}
