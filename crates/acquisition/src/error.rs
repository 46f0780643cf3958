use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status} for {what}")]
    Provider { what: String, status: u16 },

    #[error("Malformed provider payload for {what}: {detail}")]
    Malformed { what: String, detail: String },

    #[error("No data available for {what} in the selected date range")]
    NoData { what: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl AcquisitionError {
    pub(crate) fn malformed(what: &str, detail: impl ToString) -> Self {
        Self::Malformed {
            what: what.to_string(),
            detail: detail.to_string(),
        }
    }
}
