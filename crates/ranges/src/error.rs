use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Unknown range token: {0}")]
    UnknownToken(String),

    #[error("Range offset is not representable from {0}")]
    Unrepresentable(chrono::NaiveDate),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}
