//! Probability aggregation: component scoring, weighting, recommendations.

pub mod aggregation;
pub mod engine;
pub mod error;
pub mod recommendation;
pub mod scoring;

pub use aggregation::*;
pub use engine::*;
pub use error::AssessmentError;
pub use recommendation::*;
pub use scoring::*;
