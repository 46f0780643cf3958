use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write report row: {0}")]
    Write(#[from] csv::Error),

    #[error("Report buffer error: {0}")]
    Buffer(String),
}
