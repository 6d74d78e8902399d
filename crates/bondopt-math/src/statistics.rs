//! Descriptive statistics over samples of metric values.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use crate::error::{MathError, MathResult};

/// Location and range of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Sample size.
    pub count: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (average of the two middle values for even sizes).
    pub median: f64,
}

impl DescriptiveStats {
    /// Computes statistics of a sample.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientData` for an empty sample and
    /// `MathError::InvalidInput` if any value is NaN.
    pub fn from_values(values: &[f64]) -> MathResult<Self> {
        if values.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(MathError::invalid_input("sample contains NaN"));
        }

        Ok(Self {
            count: values.len(),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            mean: values.iter().mean(),
            median: Data::new(values.to_vec()).median(),
        })
    }

    /// Like [`from_values`](Self::from_values) but maps an empty sample to `None`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` if any value is NaN.
    pub fn try_from_sample(values: &[f64]) -> MathResult<Option<Self>> {
        if values.is_empty() {
            return Ok(None);
        }
        Self::from_values(values).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_odd_sample() {
        let stats = DescriptiveStats::from_values(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.min, 1.0);
        assert_relative_eq!(stats.max, 3.0);
        assert_relative_eq!(stats.mean, 2.0);
        assert_relative_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_even_sample_median() {
        let stats = DescriptiveStats::from_values(&[4.0, 1.0, 3.0, 10.0]).unwrap();
        assert_relative_eq!(stats.median, 3.5);
        assert_relative_eq!(stats.mean, 4.5);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::from_values(&[1.25]).unwrap();
        assert_relative_eq!(stats.min, 1.25);
        assert_relative_eq!(stats.max, 1.25);
        assert_relative_eq!(stats.median, 1.25);
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(
            DescriptiveStats::from_values(&[]).unwrap_err(),
            MathError::insufficient_data(1, 0)
        );
        assert_eq!(DescriptiveStats::try_from_sample(&[]).unwrap(), None);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(DescriptiveStats::from_values(&[1.0, f64::NAN]).is_err());
    }
}
