//! Suitability scoring
//!
//! - `parameter`: score of one measurement against one reference range
//! - `suitability`: weighted combination of the eight factors for one crop

pub mod parameter;
pub mod suitability;

pub use parameter::score_parameter;
pub use suitability::{
    calculate_suitability_score, component_scores, score_breakdown, soil_score, ComponentScore,
    SuitabilityBreakdown,
};
