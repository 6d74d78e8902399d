//! Credit rating label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit rating as carried by the source data (e.g. `AAA`, `AA`, `BBB`).
///
/// Ratings are matched by exact label; no agency mapping or notching is
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(String);

impl Rating {
    /// Creates a rating from its label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the rating label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Rating {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Rating {
    fn from(label: String) -> Self {
        Self(label)
    }
}
