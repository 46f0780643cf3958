use crate::error::EngineError;
use chrono::NaiveDate;
use core_types::Series;

/// Two series filtered to their shared date window.
///
/// Only the window is shared: fund and index need not trade on identical
/// calendars, so each series keeps its own native sampling inside the
/// window. The window may collapse to a single day (`start == end`).
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub fund: Series,
    pub index: Series,
}

/// Intersects the two series' date domains to the window both have data for.
///
/// The window computation is symmetric in its arguments: `align(a, b)` and
/// `align(b, a)` always agree on `start` and `end`, even though the filtered
/// content differs per series.
pub fn align(fund: &Series, index: &Series) -> Result<AlignedPair, EngineError> {
    let (fund_first, fund_last) = bounds(fund)?;
    let (index_first, index_last) = bounds(index)?;

    let start = fund_first.max(index_first);
    let end = fund_last.min(index_last);
    if start > end {
        return Err(EngineError::NoOverlap);
    }

    let fund = fund.clamp_to(start, end);
    let index = index.clamp_to(start, end);
    if fund.is_empty() || index.is_empty() {
        return Err(EngineError::NoOverlap);
    }

    Ok(AlignedPair {
        start,
        end,
        fund,
        index,
    })
}

fn bounds(series: &Series) -> Result<(NaiveDate, NaiveDate), EngineError> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => Ok((first.date, last.date)),
        _ => Err(EngineError::EmptySeries),
    }
}
