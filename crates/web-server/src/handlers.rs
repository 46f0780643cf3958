use crate::{AppState, error::AppError};
use acquisition::{FundSummary, MarketDataSource};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use core_types::DateRange;
use engine::{ComparisonResult, ValueBounds};
use ranges::RangeToken;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub scheme_id: String,
    pub index_id: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WindowInfo {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// JSON shape handed to the charting collaborator. Values are rounded to
/// two decimals; a null annualized return means "not available" for that
/// point.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub labels: Vec<String>,
    pub fund_normalized: Vec<f64>,
    pub index_normalized: Vec<f64>,
    pub fund_actual: Vec<f64>,
    pub index_actual: Vec<f64>,
    pub fund_annualized_return: Vec<Option<f64>>,
    pub index_annualized_return: Vec<Option<f64>>,
    pub fund_bounds: ValueBounds,
    pub index_bounds: ValueBounds,
    pub fund_name: String,
    pub index_name: String,
    pub window: WindowInfo,
    /// The symbolic token the requested window corresponds to, if any;
    /// `None` means a custom range. Used for UI highlighting only.
    pub matched_range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub id: String,
    pub name: String,
}

/// # GET /api/compare
///
/// Runs one comparison per fully-formed request: the window comes from
/// either a symbolic `range` token or explicit `start`/`end` dates, both
/// source series are fetched concurrently, and the engine is invoked once
/// both have fully arrived.
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> Result<Json<CompareResponse>, AppError> {
    let today = Utc::now().date_naive();
    let window = resolve_window(&params, today)?;

    let index_entry = state
        .config
        .index_by_id(&params.index_id)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown index id: {}", params.index_id)))?;

    let (fund, index) = tokio::try_join!(
        state.source.fund_history(&params.scheme_id, &window),
        state.source.index_history(&index_entry.symbol, &window),
    )?;

    let result = engine::compare(&fund.series, &index)?;
    let matched_range = ranges::classify(&window, today).map(|token| token.as_str().to_string());

    Ok(Json(build_response(
        result,
        fund.name,
        index_entry.name.clone(),
        matched_range,
    )))
}

/// # GET /api/funds/search
pub async fn search_funds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FundSummary>>, AppError> {
    if params.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let results = state.source.search_funds(&params.q).await?;
    Ok(Json(results))
}

/// # GET /api/indices
pub async fn list_indices(State(state): State<Arc<AppState>>) -> Json<Vec<IndexInfo>> {
    Json(
        state
            .config
            .indices
            .iter()
            .map(|entry| IndexInfo {
                id: entry.id.clone(),
                name: entry.name.clone(),
            })
            .collect(),
    )
}

fn resolve_window(params: &CompareParams, today: NaiveDate) -> Result<DateRange, AppError> {
    if let Some(token) = &params.range {
        let token: RangeToken = token.parse()?;
        return Ok(ranges::resolve(token, today)?);
    }

    match (params.start, params.end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)?),
        _ => Err(AppError::BadRequest(
            "Missing required parameters: provide range, or both start and end".to_string(),
        )),
    }
}

fn build_response(
    result: ComparisonResult,
    fund_name: String,
    index_name: String,
    matched_range: Option<String>,
) -> CompareResponse {
    let window = WindowInfo {
        start: result.dates[0],
        end: result.dates[result.dates.len() - 1],
    };

    CompareResponse {
        labels: result.dates.iter().map(|d| d.to_string()).collect(),
        fund_normalized: result.fund_normalized.iter().copied().map(round2).collect(),
        index_normalized: result.index_normalized.iter().copied().map(round2).collect(),
        fund_actual: result.fund_actual.iter().copied().map(round2).collect(),
        index_actual: result.index_actual.iter().copied().map(round2).collect(),
        fund_annualized_return: result
            .fund_annualized_return
            .iter()
            .map(|v| v.map(round2))
            .collect(),
        index_annualized_return: result
            .index_annualized_return
            .iter()
            .map(|v| v.map(round2))
            .collect(),
        fund_bounds: result.fund_bounds,
        index_bounds: result.index_bounds,
        fund_name,
        index_name,
        window,
        matched_range,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
