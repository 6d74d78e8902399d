//! Segment selection over a universe.
//!
//! A segment is identified by a full classification path, a rating label and
//! an open duration interval. Filtering borrows the matching bonds in their
//! original order; the universe itself is never touched.

use std::collections::BTreeMap;

use bondopt_core::{Bond, ClassLevel, Classification, Rating, Universe};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Open interval of effective durations, `lower < duration < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBand {
    /// Exclusive lower bound, in years.
    pub lower: f64,
    /// Exclusive upper bound, in years.
    pub upper: f64,
}

impl DurationBand {
    /// Creates a band.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either bound is NaN. Infinite bounds are
    /// allowed and leave that side open.
    pub fn new(lower: f64, upper: f64) -> PortfolioResult<Self> {
        if lower.is_nan() {
            return Err(PortfolioError::validation("duration_lower", "must be a number"));
        }
        if upper.is_nan() {
            return Err(PortfolioError::validation("duration_upper", "must be a number"));
        }
        Ok(Self { lower, upper })
    }

    /// A band admitting every finite duration.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Returns true if the duration lies strictly inside the band.
    #[must_use]
    pub fn contains(&self, duration: f64) -> bool {
        self.lower < duration && duration < self.upper
    }

    /// Returns true if no duration can satisfy the band.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }
}

/// Predicate identifying one segment of the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSelector {
    /// Required value at each of the four classification levels.
    pub classification: Classification,
    /// Required rating label (exact match).
    pub rating: Rating,
    /// Duration band.
    pub duration: DurationBand,
}

impl SegmentSelector {
    /// Creates a selector.
    #[must_use]
    pub fn new(
        classification: Classification,
        rating: impl Into<Rating>,
        duration: DurationBand,
    ) -> Self {
        Self {
            classification,
            rating: rating.into(),
            duration,
        }
    }

    /// Returns true if the bond belongs to the segment.
    #[must_use]
    pub fn matches(&self, bond: &Bond) -> bool {
        ClassLevel::ALL
            .iter()
            .all(|&level| bond.class(level) == self.classification.level(level))
            && bond.rating == self.rating
            && self.duration.contains(bond.effective_duration)
    }
}

/// Bonds selected from a universe, in universe order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subset<'a> {
    bonds: Vec<&'a Bond>,
}

impl<'a> Subset<'a> {
    /// Wraps an already-selected list of bonds.
    #[must_use]
    pub fn from_bonds(bonds: Vec<&'a Bond>) -> Self {
        Self { bonds }
    }

    /// Number of bonds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Selected bonds.
    #[must_use]
    pub fn bonds(&self) -> &[&'a Bond] {
        &self.bonds
    }

    /// Iterates over the selected bonds.
    pub fn iter(&self) -> impl Iterator<Item = &'a Bond> + '_ {
        self.bonds.iter().copied()
    }

    /// Aliases of the selected bonds.
    #[must_use]
    pub fn aliases(&self) -> Vec<&'a str> {
        self.bonds.iter().map(|b| b.alias.as_str()).collect()
    }

    /// Returns true if a bond with this alias was selected.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.bonds.iter().any(|b| b.alias == alias)
    }

    /// Applies a further selector to this subset.
    #[must_use]
    pub fn refine(&self, selector: &SegmentSelector) -> Subset<'a> {
        filter(self.iter(), selector)
    }
}

impl<'s, 'a> IntoIterator for &'s Subset<'a> {
    type Item = &'s &'a Bond;
    type IntoIter = std::slice::Iter<'s, &'a Bond>;

    fn into_iter(self) -> Self::IntoIter {
        self.bonds.iter()
    }
}

/// Selects the bonds matching a segment selector.
///
/// All four classification levels and the rating must match exactly, and
/// the effective duration must lie strictly inside the band. Relative order
/// is preserved. No match yields an empty subset, not an error.
///
/// # Example
///
/// ```rust
/// use bondopt_core::{Bond, Classification, Date, Universe};
/// use bondopt_portfolio::screening::{filter, DurationBand, SegmentSelector};
/// use rust_decimal_macros::dec;
///
/// let bond = Bond::builder()
///     .alias("B1")
///     .classification(Classification::new("Corp", "Energy", "Oil", "Senior"))
///     .rating("AA")
///     .effective_date(Date::from_ymd(2023, 3, 31).unwrap())
///     .effective_duration(5.0)
///     .market_value(dec!(100))
///     .oas(1.2)
///     .ytm(4.1)
///     .build()
///     .unwrap();
/// let universe = Universe::new(vec![bond]).unwrap();
///
/// let selector = SegmentSelector::new(
///     Classification::new("Corp", "Energy", "Oil", "Senior"),
///     "AA",
///     DurationBand::new(4.0, 6.0).unwrap(),
/// );
/// assert_eq!(filter(&universe, &selector).aliases(), vec!["B1"]);
///
/// let edge = SegmentSelector { duration: DurationBand::new(5.0, 6.0).unwrap(), ..selector };
/// assert!(filter(&universe, &edge).is_empty());
/// ```
pub fn filter<'a>(
    bonds: impl IntoIterator<Item = &'a Bond>,
    selector: &SegmentSelector,
) -> Subset<'a> {
    Subset {
        bonds: bonds.into_iter().filter(|b| selector.matches(b)).collect(),
    }
}

/// Distinct values available for segment selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryListing {
    /// Distinct tags per classification level, in first-appearance order.
    pub classes: BTreeMap<ClassLevel, Vec<String>>,
    /// Distinct rating labels, in first-appearance order.
    pub ratings: Vec<String>,
}

impl CategoryListing {
    /// Distinct tags at one level.
    #[must_use]
    pub fn level(&self, level: ClassLevel) -> &[String] {
        self.classes.get(&level).map_or(&[][..], Vec::as_slice)
    }
}

/// Lists the distinct classification tags and ratings of a universe.
#[must_use]
pub fn list_categories(universe: &Universe) -> CategoryListing {
    let classes = ClassLevel::ALL
        .iter()
        .map(|&level| {
            let values = universe
                .distinct_classes(level)
                .into_iter()
                .map(str::to_string)
                .collect();
            (level, values)
        })
        .collect();

    CategoryListing {
        classes,
        ratings: universe
            .distinct_ratings()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
