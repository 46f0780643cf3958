pub mod error;
pub mod range;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use range::DateRange;
pub use series::{PricePoint, Series};
