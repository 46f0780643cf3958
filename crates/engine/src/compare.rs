use crate::align::align;
use crate::error::EngineError;
use crate::normalize::normalize;
use crate::result::{ComparisonResult, ValueBounds};
use chrono::NaiveDate;
use core_types::Series;
use std::collections::HashMap;

/// Elapsed-time denominator for the annualized-return calculation.
const DAYS_PER_YEAR: f64 = 365.0;

/// Runs a full fund-versus-index comparison.
///
/// The fund drives the emitted cadence: the result's `dates` follow the
/// fund's sampling, and index values are taken only at exactly coincident
/// dates, with no resampling or interpolation. A fund date the index has no
/// record for is omitted from the paired output, so point counts depend on
/// how the two calendars line up.
///
/// Alignment and normalization failures abort the whole comparison; a
/// per-point annualized-return failure only degrades that point to `None`.
pub fn compare(fund: &Series, index: &Series) -> Result<ComparisonResult, EngineError> {
    let pair = align(fund, index)?;
    let fund_norm = normalize(&pair.fund)?;
    let index_norm = normalize(&pair.index)?;

    let index_by_date: HashMap<NaiveDate, (f64, f64)> = pair
        .index
        .iter()
        .zip(index_norm.iter())
        .map(|(actual, norm)| (actual.date, (actual.value, norm.value)))
        .collect();

    let mut dates = Vec::new();
    let mut fund_normalized = Vec::new();
    let mut index_normalized = Vec::new();
    let mut fund_actual = Vec::new();
    let mut index_actual = Vec::new();

    for (actual, norm) in pair.fund.iter().zip(fund_norm.iter()) {
        if let Some(&(idx_actual, idx_norm)) = index_by_date.get(&actual.date) {
            dates.push(actual.date);
            fund_actual.push(actual.value);
            fund_normalized.push(norm.value);
            index_actual.push(idx_actual);
            index_normalized.push(idx_norm);
        }
    }

    // The window overlapped, but the two calendars never coincide on a
    // single date.
    if dates.is_empty() {
        return Err(EngineError::NoOverlap);
    }

    tracing::debug!(
        points = dates.len(),
        start = %pair.start,
        end = %pair.end,
        "comparison computed"
    );

    let fund_annualized_return = annualized_series(&dates, &fund_actual);
    let index_annualized_return = annualized_series(&dates, &index_actual);
    let fund_bounds = ValueBounds::of(&fund_actual);
    let index_bounds = ValueBounds::of(&index_actual);

    Ok(ComparisonResult {
        dates,
        fund_normalized,
        index_normalized,
        fund_actual,
        index_actual,
        fund_annualized_return,
        index_annualized_return,
        fund_bounds,
        index_bounds,
    })
}

fn annualized_series(dates: &[NaiveDate], values: &[f64]) -> Vec<Option<f64>> {
    let start = dates[0];
    let base = values[0];
    dates
        .iter()
        .zip(values)
        .map(|(&date, &value)| annualized_return(base, value, start, date))
        .collect()
}

/// The compound annual growth rate implied by the move from `base` at
/// `start` to `value` at `end`, as a percentage.
///
/// Zero elapsed time is defined as 0% growth. A zero base or a non-finite
/// result yields `None` ("not available") rather than a numeric error.
pub fn annualized_return(
    base: f64,
    value: f64,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<f64> {
    let years = (end - start).num_days() as f64 / DAYS_PER_YEAR;
    if years == 0.0 {
        return Some(0.0);
    }
    if base == 0.0 {
        return None;
    }

    let growth = ((value / base).powf(1.0 / years) - 1.0) * 100.0;
    growth.is_finite().then_some(growth)
}

/// Percentage change of `value` against the first exported value, used for
/// the report's performance columns. Guarded the same way as
/// [`annualized_return`].
pub fn baseline_change_pct(base: f64, value: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let pct = (value - base) / base * 100.0;
    pct.is_finite().then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PricePoint;

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
    fn end_to_end_scenario() {
        let fund = series(&[
            (date(2023, 1, 1), 100.0),
            (date(2023, 2, 1), 110.0),
            (date(2023, 3, 1), 99.0),
        ]);
        let index = series(&[
            (date(2023, 1, 1), 1000.0),
            (date(2023, 2, 1), 1050.0),
            (date(2023, 3, 1), 1100.0),
        ]);

        let result = compare(&fund, &index).unwrap();

        assert_eq!(result.dates.first(), Some(&date(2023, 1, 1)));
        assert_eq!(result.dates.last(), Some(&date(2023, 3, 1)));
        assert!((result.fund_normalized[2] - 99.0).abs() < 1e-9);
        assert!((result.index_normalized[2] - 110.0).abs() < 1e-9);

        let fund_perf =
            baseline_change_pct(result.fund_actual[0], result.fund_actual[2]).unwrap();
        let index_perf =
            baseline_change_pct(result.index_actual[0], result.index_actual[2]).unwrap();
        assert!((fund_perf - (-1.0)).abs() < 1e-9);
        assert!((index_perf - 10.0).abs() < 1e-9);
    }

    #[test]
    fn all_sequences_share_one_length() {
        let fund = series(&[
            (date(2023, 1, 2), 10.0),
            (date(2023, 1, 3), 10.5),
            (date(2023, 1, 4), 10.2),
            (date(2023, 1, 5), 10.9),
        ]);
        let index = series(&[
            (date(2023, 1, 2), 100.0),
            (date(2023, 1, 4), 101.0),
            (date(2023, 1, 5), 103.0),
            (date(2023, 1, 6), 104.0),
        ]);

        let result = compare(&fund, &index).unwrap();
        let n = result.dates.len();
        assert_eq!(result.fund_normalized.len(), n);
        assert_eq!(result.index_normalized.len(), n);
        assert_eq!(result.fund_actual.len(), n);
        assert_eq!(result.index_actual.len(), n);
        assert_eq!(result.fund_annualized_return.len(), n);
        assert_eq!(result.index_annualized_return.len(), n);
    }

    #[test]
    fn fund_dates_without_an_index_record_are_omitted() {
        let fund = series(&[
            (date(2023, 1, 2), 10.0),
            (date(2023, 1, 3), 10.5),
            (date(2023, 1, 4), 10.2),
        ]);
        let index = series(&[(date(2023, 1, 2), 100.0), (date(2023, 1, 4), 101.0)]);

        let result = compare(&fund, &index).unwrap();
        assert_eq!(result.dates, vec![date(2023, 1, 2), date(2023, 1, 4)]);
    }

    #[test]
    fn no_coincident_dates_fails_with_no_overlap() {
        // Window overlaps but the sampling never lines up.
        let fund = series(&[(date(2023, 1, 2), 10.0), (date(2023, 1, 4), 10.5)]);
        let index = series(&[(date(2023, 1, 3), 100.0), (date(2023, 1, 5), 101.0)]);

        assert!(matches!(
            compare(&fund, &index),
            Err(EngineError::NoOverlap)
        ));
    }

    #[test]
    fn annualized_return_of_a_doubling_over_one_year_is_100_pct() {
        let growth =
            annualized_return(50.0, 100.0, date(2023, 1, 1), date(2024, 1, 1)).unwrap();
        assert!((growth - 100.0).abs() < 0.5);
    }

    #[test]
    fn annualized_return_at_the_first_point_is_zero() {
        let growth = annualized_return(50.0, 50.0, date(2023, 1, 1), date(2023, 1, 1));
        assert_eq!(growth, Some(0.0));
    }

    #[test]
    fn annualized_return_with_zero_base_is_not_available() {
        assert_eq!(
            annualized_return(0.0, 100.0, date(2023, 1, 1), date(2024, 1, 1)),
            None
        );
    }

    #[test]
    fn annualized_returns_start_at_zero_in_the_result() {
        let fund = series(&[(date(2023, 1, 1), 10.0), (date(2024, 1, 1), 20.0)]);
        let index = series(&[(date(2023, 1, 1), 100.0), (date(2024, 1, 1), 110.0)]);

        let result = compare(&fund, &index).unwrap();
        assert_eq!(result.fund_annualized_return[0], Some(0.0));
        // The fund doubled over exactly one 365-day year.
        let fund_growth = result.fund_annualized_return[1].unwrap();
        assert!((fund_growth - 100.0).abs() < 0.5);
    }
}
