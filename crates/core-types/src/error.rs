use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date range: start {start} must be strictly before end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Duplicate observation date {0} in series")]
    DuplicateDate(NaiveDate),

    #[error("Invalid price {value} on {date}: values must be finite and positive")]
    InvalidValue { date: NaiveDate, value: f64 },
}
