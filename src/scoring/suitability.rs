//! Crop suitability score
//!
//! Combines the seven parameter scores and the soil-type multiplier into a
//! single weighted average. Because the result is a convex combination of
//! sub-scores in [0, 1], it stays within [min(sub-scores), max(sub-scores)].

use crate::catalog::{CropProfile, Quantity};
use crate::input::InputSample;
use crate::scoring::parameter::score_parameter;
use crate::soil_analysis::SoilRating;
use crate::weights::{FeatureWeights, SOIL_TYPE_KEY};
use serde::Serialize;

/// One factor's contribution to a crop score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    /// Wire key: "N", "P", "K", "temperature", "humidity", "ph", "rainfall" or "soilType"
    pub factor: &'static str,
    pub score: f64,
    pub weight: f64,
}

/// Per-factor explanation of a crop score
#[derive(Debug, Clone, Serialize)]
pub struct SuitabilityBreakdown {
    pub crop: String,
    pub score: f64,
    pub components: Vec<ComponentScore>,
    /// Qualitative soil fit, present when the crop lists the sample's soil type
    pub soil_rating: Option<SoilRating>,
    /// Weighted factor with the lowest score below 1.0, if any
    pub limiting_factor: Option<&'static str>,
}

/// Soil multiplier for the sample's soil type, 1.0 when absent or unlisted
pub fn soil_score(sample: &InputSample, profile: &CropProfile) -> f64 {
    sample
        .soil_type
        .as_deref()
        .and_then(|soil| profile.soil_multiplier(soil))
        .unwrap_or(1.0)
}

/// The eight sub-scores (seven quantities in `Quantity::ALL` order, then soil type)
pub fn component_scores(
    sample: &InputSample,
    profile: &CropProfile,
    weights: &FeatureWeights,
) -> [ComponentScore; 8] {
    let quantity = |q: Quantity| ComponentScore {
        factor: q.key(),
        score: score_parameter(sample.value(q), profile.range(q)),
        weight: weights.weight(q),
    };

    [
        quantity(Quantity::Nitrogen),
        quantity(Quantity::Phosphorus),
        quantity(Quantity::Potassium),
        quantity(Quantity::Temperature),
        quantity(Quantity::Humidity),
        quantity(Quantity::Ph),
        quantity(Quantity::Rainfall),
        ComponentScore {
            factor: SOIL_TYPE_KEY,
            score: soil_score(sample, profile),
            weight: weights.soil_type,
        },
    ]
}

/// Weighted average of sub-scores; 0 when no factor carries weight
fn weighted_average(components: &[ComponentScore]) -> f64 {
    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = components.iter().map(|c| c.score * c.weight).sum();
    weighted / total_weight
}

/// Suitability of one crop for one sample, in [0, 1]
pub fn calculate_suitability_score(
    sample: &InputSample,
    profile: &CropProfile,
    weights: &FeatureWeights,
) -> f64 {
    weighted_average(&component_scores(sample, profile, weights))
}

/// Score plus the per-factor detail behind it
pub fn score_breakdown(
    sample: &InputSample,
    profile: &CropProfile,
    weights: &FeatureWeights,
) -> SuitabilityBreakdown {
    let components = component_scores(sample, profile, weights);

    let limiting_factor = components
        .iter()
        .filter(|c| c.weight > 0.0 && c.score < 1.0)
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .map(|c| c.factor);

    let soil_rating = sample
        .soil_type
        .as_deref()
        .and_then(|soil| profile.soil_multiplier(soil))
        .map(SoilRating::from_multiplier);

    SuitabilityBreakdown {
        crop: profile.name.clone(),
        score: weighted_average(&components),
        components: components.to_vec(),
        soil_rating,
        limiting_factor,
    }
}
