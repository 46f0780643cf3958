use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Series has no data points")]
    EmptySeries,

    #[error("No overlapping date window between fund and index data")]
    NoOverlap,

    #[error("Division by zero: the baseline value of the series is zero")]
    ZeroBaseline,

    #[error(transparent)]
    Invalid(#[from] CoreError),
}
