use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fraction of a series' value range added as margin on both sides of the
/// chart axis limits.
const BOUNDS_MARGIN: f64 = 0.05;

/// The complete output of one comparison request.
///
/// All six value sequences run parallel to `dates`. Annualized returns are
/// `None` where the figure is not available for that point (non-finite
/// result or zero base); a missing point never fails the whole comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub dates: Vec<NaiveDate>,
    pub fund_normalized: Vec<f64>,
    pub index_normalized: Vec<f64>,
    pub fund_actual: Vec<f64>,
    pub index_actual: Vec<f64>,
    pub fund_annualized_return: Vec<Option<f64>>,
    pub index_annualized_return: Vec<Option<f64>>,
    pub fund_bounds: ValueBounds,
    pub index_bounds: ValueBounds,
}

impl ComparisonResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Suggested chart axis limits for one series: the min/max of its actual
/// values, widened by a margin of the value range on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    pub fn of(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
        }
        if values.is_empty() {
            return Self { min: 0.0, max: 0.0 };
        }

        let margin = (max - min) * BOUNDS_MARGIN;
        Self {
            min: min - margin,
            max: max + margin,
        }
    }
}
