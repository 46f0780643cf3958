pub mod align;
pub mod compare;
pub mod error;
pub mod normalize;
pub mod result;

// Re-export the core operations to provide a clean public API.
pub use align::{AlignedPair, align};
pub use compare::{annualized_return, baseline_change_pct, compare};
pub use error::EngineError;
pub use normalize::normalize;
pub use result::{ComparisonResult, ValueBounds};
