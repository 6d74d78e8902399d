//! Four-level hierarchical classification of a bond.
//!
//! Each bond carries exactly one string tag per level, from the broadest
//! grouping (level 1) to the most specific (level 4). [`ClassLevel`] is the
//! typed accessor used wherever a single level has to be chosen, e.g. the
//! field that drives per-category concentration limits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// One of the four classification levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassLevel {
    /// Broadest grouping (`CLASS_1`).
    #[serde(rename = "CLASS_1")]
    One,
    /// Second level (`CLASS_2`), the default concentration field.
    #[serde(rename = "CLASS_2")]
    Two,
    /// Third level (`CLASS_3`).
    #[serde(rename = "CLASS_3")]
    Three,
    /// Most specific grouping (`CLASS_4`).
    #[serde(rename = "CLASS_4")]
    Four,
}

impl ClassLevel {
    /// All levels, broadest first.
    pub const ALL: [ClassLevel; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Column name used by tabular sources.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::One => "CLASS_1",
            Self::Two => "CLASS_2",
            Self::Three => "CLASS_3",
            Self::Four => "CLASS_4",
        }
    }

    /// Zero-based position in [`Classification`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
            Self::Four => 3,
        }
    }

    /// Level for a 1-based number.
    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }
}

impl Default for ClassLevel {
    fn default() -> Self {
        Self::Two
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for ClassLevel {
    type Err = CoreError;

    /// Accepts `CLASS_2`, `class_2` or a bare `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CLASS_")
            .or_else(|| trimmed.strip_prefix("class_"))
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| {
                CoreError::unknown_field(s, &["CLASS_1", "CLASS_2", "CLASS_3", "CLASS_4"])
            })
    }
}

/// The four classification tags of a bond.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification {
    levels: [String; 4],
}

impl Classification {
    /// Creates a classification from its four levels, broadest first.
    #[must_use]
    pub fn new(
        class_1: impl Into<String>,
        class_2: impl Into<String>,
        class_3: impl Into<String>,
        class_4: impl Into<String>,
    ) -> Self {
        Self {
            levels: [
                class_1.into(),
                class_2.into(),
                class_3.into(),
                class_4.into(),
            ],
        }
    }

    /// Creates a classification from an array of levels.
    #[must_use]
    pub fn from_levels(levels: [String; 4]) -> Self {
        Self { levels }
    }

    /// Returns the tag at the given level.
    #[must_use]
    pub fn level(&self, level: ClassLevel) -> &str {
        &self.levels[level.index()]
    }

    /// Returns all four tags, broadest first.
    #[must_use]
    pub fn levels(&self) -> &[String; 4] {
        &self.levels
    }
}
