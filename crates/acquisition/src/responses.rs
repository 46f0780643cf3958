//! Typed models of the upstream provider payloads.
//!
//! These structs are the strict parse boundary: nothing loosely-typed moves
//! past this module. Row-level parsing (provider date formats, stringly
//! NAVs) also lives here so the client stays focused on transport.

use crate::error::AcquisitionError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Fund NAV history envelope from MFAPI (`/mf/{scheme_id}`).
#[derive(Debug, Deserialize)]
pub struct MfApiHistory {
    pub meta: MfApiMeta,
    #[serde(default)]
    pub data: Vec<MfApiNavRow>,
}

#[derive(Debug, Deserialize)]
pub struct MfApiMeta {
    pub scheme_name: String,
}

/// One NAV observation as MFAPI ships it: a `DD-MM-YYYY` date and the NAV
/// as a decimal string.
#[derive(Debug, Deserialize)]
pub struct MfApiNavRow {
    pub date: String,
    pub nav: String,
}

impl MfApiNavRow {
    pub fn parse(&self) -> Result<(NaiveDate, f64), AcquisitionError> {
        let date = NaiveDate::parse_from_str(&self.date, "%d-%m-%Y")
            .map_err(|e| AcquisitionError::malformed("fund history", e))?;
        let nav: f64 = self
            .nav
            .parse()
            .map_err(|e| AcquisitionError::malformed("fund history", e))?;
        Ok((date, nav))
    }
}

/// Fund search row from MFAPI (`/mf/search?q=`).
#[derive(Debug, Deserialize)]
pub struct MfApiSearchRow {
    #[serde(rename = "schemeCode")]
    pub scheme_code: i64,
    #[serde(rename = "schemeName")]
    pub scheme_name: String,
}

/// Chart envelope from the Yahoo Finance v8 chart API.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

/// Daily close values; individual entries may be null for non-trading days.
#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
}

impl ChartEnvelope {
    /// Extracts the (timestamp, close) pairs, dropping null closes.
    pub fn close_points(self) -> Result<Vec<(i64, f64)>, AcquisitionError> {
        if self.chart.error.is_some() {
            return Err(AcquisitionError::malformed(
                "index history",
                "provider reported a chart error",
            ));
        }

        let result = self
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| {
                AcquisitionError::malformed("index history", "missing chart result")
            })?;

        let timestamps = result.timestamp.unwrap_or_default();
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default();

        Ok(timestamps
            .into_iter()
            .zip(closes)
            .filter_map(|(ts, close)| close.map(|c| (ts, c)))
            .collect())
    }
}
