//! Item names

use std::fmt;

/// Normalized item name used as the key for catalog, offer and purchase lookups.
///
/// Normalization trims surrounding whitespace and lower-cases the name, so
/// `"Milk"`, `" MILK "` and `"milk"` all produce the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemName(String);

impl ItemName {
    /// Normalizes a raw name.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_lowercase()))
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with its first character upper-cased, for display.
    #[must_use]
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();

        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
