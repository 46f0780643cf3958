use crate::error::AcquisitionError;
use crate::responses::{ChartEnvelope, MfApiHistory, MfApiSearchRow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use configuration::ProviderConfig;
use core_types::{DateRange, PricePoint, Series};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub mod error;
pub mod responses;
pub mod search;

// --- Public API ---
pub use search::{DEBOUNCE_WINDOW, SearchSequencer};

/// A fund's NAV history together with its provider display name.
#[derive(Debug, Clone, PartialEq)]
pub struct FundHistory {
    pub name: String,
    pub series: Series,
}

/// One autocomplete match for a fund search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    pub scheme_id: String,
    pub name: String,
}

/// The generic, abstract interface for upstream market-data providers.
/// This trait is the contract the HTTP surface and CLI use, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches a fund's NAV history, restricted to the requested window.
    async fn fund_history(
        &self,
        scheme_id: &str,
        range: &DateRange,
    ) -> Result<FundHistory, AcquisitionError>;

    /// Fetches an index's daily close history, restricted to the requested
    /// window.
    async fn index_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Series, AcquisitionError>;

    /// Looks up funds matching a free-text query.
    async fn search_funds(&self, query: &str) -> Result<Vec<FundSummary>, AcquisitionError>;
}

/// A concrete `MarketDataSource` over MFAPI (fund NAVs, fund search) and the
/// Yahoo Finance chart API (index closes).
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    mfapi_base: String,
    yahoo_base: String,
}

impl ProviderClient {
    pub fn new(providers: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            mfapi_base: providers.mfapi_base_url.trim_end_matches('/').to_string(),
            yahoo_base: providers.yahoo_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AcquisitionError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AcquisitionError::Provider {
                what: what.to_string(),
                status: status.as_u16(),
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| AcquisitionError::malformed(what, e))
    }
}

#[async_trait]
impl MarketDataSource for ProviderClient {
    async fn fund_history(
        &self,
        scheme_id: &str,
        range: &DateRange,
    ) -> Result<FundHistory, AcquisitionError> {
        let url = format!("{}/mf/{}", self.mfapi_base, scheme_id);
        tracing::debug!(scheme_id, %url, "fetching fund NAV history");

        let payload: MfApiHistory = self.get_json("fund history", &url, &[]).await?;

        let mut points = Vec::new();
        for row in &payload.data {
            let (date, nav) = row.parse()?;
            if range.contains(date) {
                points.push(PricePoint::new(date, nav));
            }
        }
        if points.is_empty() {
            return Err(AcquisitionError::NoData {
                what: format!("fund {scheme_id}"),
            });
        }

        let series = Series::new(points)?;
        tracing::info!(scheme_id, points = series.len(), "fund history fetched");

        Ok(FundHistory {
            name: payload.meta.scheme_name,
            series,
        })
    }

    async fn index_history(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Series, AcquisitionError> {
        let url = format!("{}/v8/finance/chart/{}", self.yahoo_base, symbol);

        // The chart API treats period2 as exclusive; push it one day past
        // the window so the end date itself is included.
        let period1 = range.start().and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = range
            .end()
            .succ_opt()
            .ok_or_else(|| AcquisitionError::malformed("index history", "date out of range"))?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        tracing::debug!(symbol, %url, period1, period2, "fetching index close history");

        let query = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ];
        let envelope: ChartEnvelope = self.get_json("index history", &url, &query).await?;

        let mut points = Vec::new();
        for (ts, close) in envelope.close_points()? {
            let date = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| {
                    AcquisitionError::malformed("index history", "timestamp out of range")
                })?
                .date_naive();
            if range.contains(date) {
                points.push(PricePoint::new(date, close));
            }
        }
        if points.is_empty() {
            return Err(AcquisitionError::NoData {
                what: format!("index {symbol}"),
            });
        }

        let series = Series::new(points)?;
        tracing::info!(symbol, points = series.len(), "index history fetched");

        Ok(series)
    }

    async fn search_funds(&self, query: &str) -> Result<Vec<FundSummary>, AcquisitionError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/mf/search", self.mfapi_base);
        let params = [("q", query.to_string())];
        let rows: Vec<MfApiSearchRow> = self.get_json("fund search", &url, &params).await?;

        Ok(rows
            .into_iter()
            .map(|row| FundSummary {
                scheme_id: row.scheme_code.to_string(),
                name: row.scheme_name,
            })
            .collect())
    }
}
