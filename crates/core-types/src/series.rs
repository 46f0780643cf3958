use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (date, value) observation in an instrument's price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// The ordered price history of one instrument over some date domain.
///
/// `Series::new` is the ingestion boundary: points are sorted by date,
/// duplicate dates are rejected, and every value must be finite and strictly
/// positive. Once constructed, a series is never mutated in place; every
/// engine transformation returns a new `Series`.
///
/// Deliberately not `Deserialize`: loosely-typed payloads must pass through
/// `Series::new` to get validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, CoreError> {
        points.sort_by_key(|p| p.date);

        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(CoreError::DuplicateDate(pair[1].date));
            }
        }

        for point in &points {
            if !point.value.is_finite() || point.value <= 0.0 {
                return Err(CoreError::InvalidValue {
                    date: point.date,
                    value: point.value,
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Returns a new series restricted to observations in `[start, end]`,
    /// inclusive on both ends.
    pub fn clamp_to(&self, start: NaiveDate, end: NaiveDate) -> Series {
        Series {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| p.date >= start && p.date <= end)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_sorts_points_by_date() {
        let series = Series::new(vec![
            PricePoint::new(date(2023, 3, 1), 99.0),
            PricePoint::new(date(2023, 1, 1), 100.0),
            PricePoint::new(date(2023, 2, 1), 110.0),
        ])
        .unwrap();

        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2023, 1, 1), date(2023, 2, 1), date(2023, 3, 1)]
        );
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let result = Series::new(vec![
            PricePoint::new(date(2023, 1, 1), 100.0),
            PricePoint::new(date(2023, 1, 1), 101.0),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateDate(_))));
    }

    #[test]
    fn new_rejects_non_positive_values() {
        let zero = Series::new(vec![PricePoint::new(date(2023, 1, 1), 0.0)]);
        assert!(matches!(zero, Err(CoreError::InvalidValue { .. })));

        let negative = Series::new(vec![PricePoint::new(date(2023, 1, 1), -5.0)]);
        assert!(matches!(negative, Err(CoreError::InvalidValue { .. })));

        let nan = Series::new(vec![PricePoint::new(date(2023, 1, 1), f64::NAN)]);
        assert!(matches!(nan, Err(CoreError::InvalidValue { .. })));
    }

    #[test]
    fn clamp_to_is_inclusive_on_both_ends() {
        let series = Series::new(vec![
            PricePoint::new(date(2023, 1, 1), 100.0),
            PricePoint::new(date(2023, 2, 1), 110.0),
            PricePoint::new(date(2023, 3, 1), 99.0),
        ])
        .unwrap();

        let clamped = series.clamp_to(date(2023, 1, 1), date(2023, 2, 1));
        assert_eq!(clamped.len(), 2);
        assert_eq!(clamped.first().unwrap().date, date(2023, 1, 1));
        assert_eq!(clamped.last().unwrap().date, date(2023, 2, 1));
    }
}
