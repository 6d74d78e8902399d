//! One-hot exposure columns derived from a classification level.
//!
//! Every distinct tag at the chosen level becomes a 0/1 indicator column
//! named after the tag. The optimizer turns each column into one
//! concentration constraint, so the expansion is what makes "no more than
//! X in any single category" expressible generically.

use bondopt_core::{Bond, ClassLevel};

use crate::error::{PortfolioError, PortfolioResult};

/// Bonds paired with their indicator columns for one classification level.
///
/// Columns are not materialised: each row stores the index of the single
/// category it belongs to, and indicator values are derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorView<'a> {
    bonds: Vec<&'a Bond>,
    field: ClassLevel,
    categories: Vec<&'a str>,
    membership: Vec<usize>,
}

/// Expands a classification level into indicator columns.
///
/// Categories are ordered by first appearance. The input is only borrowed.
///
/// # Errors
///
/// - `PortfolioError::MissingClassification` if a bond has an empty tag at
///   `field`.
/// - `PortfolioError::IndicatorCollision` if a tag equals one of the base
///   column names in [`Bond::COLUMNS`].
pub fn expand_indicators<'a>(
    bonds: impl IntoIterator<Item = &'a Bond>,
    field: ClassLevel,
) -> PortfolioResult<IndicatorView<'a>> {
    let bonds: Vec<&'a Bond> = bonds.into_iter().collect();
    let mut categories: Vec<&'a str> = Vec::new();
    let mut membership = Vec::with_capacity(bonds.len());

    for bond in &bonds {
        let tag = bond.class(field);
        if tag.trim().is_empty() {
            return Err(PortfolioError::MissingClassification {
                alias: bond.alias.clone(),
                level: field,
            });
        }

        let index = match categories.iter().position(|c| *c == tag) {
            Some(index) => index,
            None => {
                if Bond::COLUMNS.contains(&tag) {
                    return Err(PortfolioError::IndicatorCollision {
                        name: tag.to_string(),
                    });
                }
                categories.push(tag);
                categories.len() - 1
            }
        };
        membership.push(index);
    }

    tracing::debug!(
        field = %field,
        rows = bonds.len(),
        categories = categories.len(),
        "expanded classification indicators"
    );

    Ok(IndicatorView {
        bonds,
        field,
        categories,
        membership,
    })
}

impl<'a> IndicatorView<'a> {
    /// Classification level the columns were derived from.
    #[must_use]
    pub fn field(&self) -> ClassLevel {
        self.field
    }

    /// Indicator column names, in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> &[&'a str] {
        &self.categories
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Rows of the view.
    #[must_use]
    pub fn bonds(&self) -> &[&'a Bond] {
        &self.bonds
    }

    /// Category of a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn category_of(&self, row: usize) -> &'a str {
        self.categories[self.membership[row]]
    }

    /// Index into [`categories`](Self::categories) of a row's category.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn category_index(&self, row: usize) -> usize {
        self.membership[row]
    }

    /// Indicator value of a row for a category; 0 for unknown categories.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn indicator(&self, row: usize, category: &str) -> u8 {
        u8::from(self.category_of(row) == category)
    }

    /// A whole indicator column, or `None` for an unknown category.
    #[must_use]
    pub fn column(&self, category: &str) -> Option<Vec<u8>> {
        let index = self.categories.iter().position(|c| *c == category)?;
        Some(
            self.membership
                .iter()
                .map(|&m| u8::from(m == index))
                .collect(),
        )
    }

    /// Keeps the rows matching a predicate.
    ///
    /// The column set is unchanged, so categories whose rows were all
    /// dropped remain as all-zero columns.
    #[must_use]
    pub fn restrict(&self, mut keep: impl FnMut(&Bond) -> bool) -> IndicatorView<'a> {
        let (bonds, membership): (Vec<&'a Bond>, Vec<usize>) = self
            .bonds
            .iter()
            .zip(&self.membership)
            .filter(|&(bond, _)| keep(*bond))
            .map(|(bond, &m)| (*bond, m))
            .unzip();

        IndicatorView {
            bonds,
            field: self.field,
            categories: self.categories.clone(),
            membership,
        }
    }
}
