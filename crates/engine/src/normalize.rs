use crate::error::EngineError;
use core_types::{PricePoint, Series};

/// Rebases a series so its first value becomes exactly 100.
///
/// Ordering and length are preserved. The zero-baseline case is precluded by
/// the `Series` construction invariant, but it is still guarded here so the
/// function reports an error instead of emitting `NaN`/`Infinity`.
pub fn normalize(series: &Series) -> Result<Series, EngineError> {
    let first = series.first().ok_or(EngineError::EmptySeries)?;
    if first.value == 0.0 || !first.value.is_finite() {
        return Err(EngineError::ZeroBaseline);
    }

    let base = first.value;
    let points = series
        .iter()
        .map(|p| PricePoint::new(p.date, p.value / base * 100.0))
        .collect();

    Ok(Series::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Series {
        Series::new(
            points
                .iter()
                .map(|&(date, value)| PricePoint::new(date, value))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn first_value_becomes_exactly_100() {
        let input = series(&[
            (date(2023, 1, 1), 43.21),
            (date(2023, 2, 1), 47.53),
            (date(2023, 3, 1), 39.99),
        ]);

        let normalized = normalize(&input).unwrap();
        assert_eq!(normalized.first().unwrap().value, 100.0);
        assert_eq!(normalized.len(), input.len());
    }

    #[test]
    fn preserves_relative_magnitudes() {
        let input = series(&[(date(2023, 1, 1), 50.0), (date(2023, 2, 1), 55.0)]);

        let normalized = normalize(&input).unwrap();
        assert!((normalized.points()[1].value - 110.0).abs() < 1e-12);
    }

    #[test]
    fn renormalizing_is_a_near_identity() {
        let input = series(&[
            (date(2023, 1, 1), 812.5),
            (date(2023, 2, 1), 799.1),
            (date(2023, 3, 1), 845.0),
        ]);

        let once = normalize(&input).unwrap();
        let twice = normalize(&once).unwrap();

        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.value - b.value).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_series_is_an_error() {
        let empty = Series::new(vec![]).unwrap();
        assert!(matches!(normalize(&empty), Err(EngineError::EmptySeries)));
    }
}
