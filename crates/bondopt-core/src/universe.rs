//! The immutable bond universe.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Bond, ClassLevel, Date};

/// An ordered, immutable snapshot of bonds.
///
/// Created once from an external source and never mutated afterwards, so
/// a single instance can be shared across concurrent requests behind an
/// `Arc` without locking. Aliases are unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Universe {
    bonds: Vec<Bond>,
}

impl Universe {
    /// Creates a universe, preserving the input order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateAlias` if two records share an alias.
    pub fn new(bonds: Vec<Bond>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(bonds.len());
        for bond in &bonds {
            if !seen.insert(bond.alias.as_str()) {
                return Err(CoreError::duplicate_alias(&bond.alias));
            }
        }
        Ok(Self { bonds })
    }

    /// Returns the bonds in source order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Iterates over the bonds in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bond> {
        self.bonds.iter()
    }

    /// Number of bonds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// Returns true if the universe holds no bonds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Looks up a bond by alias.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.alias == alias)
    }

    /// Distinct tags at a classification level, in first-appearance order.
    #[must_use]
    pub fn distinct_classes(&self, level: ClassLevel) -> Vec<&str> {
        distinct(self.bonds.iter().map(|b| b.class(level)))
    }

    /// Distinct rating labels, in first-appearance order.
    #[must_use]
    pub fn distinct_ratings(&self) -> Vec<&str> {
        distinct(self.bonds.iter().map(|b| b.rating.as_str()))
    }

    /// Distinct effective dates, ascending.
    #[must_use]
    pub fn effective_dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.bonds.iter().map(|b| b.effective_date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

impl<'a> IntoIterator for &'a Universe {
    type Item = &'a Bond;
    type IntoIter = std::slice::Iter<'a, Bond>;

    fn into_iter(self) -> Self::IntoIter {
        self.bonds.iter()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
