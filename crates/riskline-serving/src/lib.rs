//! Riskline Serving
//!
//! Single-record inference over the current champion model:
//! - `ServingContext`: scaler state + champion classifier, loaded once per
//!   process and passed explicitly to callers
//! - `predict`: validate, standardize, classify, derive a risk tier
//! - `PredictionLog`: caller-owned history of results with CSV export

pub mod context;
pub mod error;
pub mod history;
pub mod result;

pub use context::ServingContext;
pub use error::{ServingError, ServingResult};
pub use history::{PredictionEntry, PredictionLog};
pub use result::{DefaultLabel, PredictionResult, RiskTier};
