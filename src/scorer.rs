//! Crop Scorer - Ranks the whole catalog for a sample
//!
//! Scoring is pure: the scorer holds only shared, read-only reference data,
//! so one instance can serve any number of threads without locking.
//! Includes both sequential and parallel (Rayon) batch ranking.

use crate::catalog::CropCatalog;
use crate::crop_info::{recommendations, CropRecommendation};
use crate::error::CatalogError;
use crate::input::InputSample;
use crate::scoring::{calculate_suitability_score, score_breakdown, SuitabilityBreakdown};
use crate::weights::FeatureWeights;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// One ranked entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPrediction {
    pub crop: String,
    /// Suitability score in [0, 1]
    pub probability: f64,
}

impl CropPrediction {
    /// Score as a whole percentage, as shown on recommendation cards
    pub fn suitability_percent(&self) -> u8 {
        (self.probability * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Full ranking, sorted by descending probability
///
/// Ties keep catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult {
    predictions: Vec<CropPrediction>,
}

impl PredictionResult {
    /// Stable descending sort of unsorted catalog-order scores
    fn ranked(mut predictions: Vec<CropPrediction>) -> Self {
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Self { predictions }
    }

    pub fn best(&self) -> Option<&CropPrediction> {
        self.predictions.first()
    }

    /// First `k` entries (all of them if `k` exceeds the length)
    pub fn top(&self, k: usize) -> &[CropPrediction] {
        &self.predictions[..k.min(self.predictions.len())]
    }

    pub fn truncate(mut self, k: usize) -> Self {
        self.predictions.truncate(k);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropPrediction> {
        self.predictions.iter()
    }

    pub fn as_slice(&self) -> &[CropPrediction] {
        &self.predictions
    }

    pub fn into_vec(self) -> Vec<CropPrediction> {
        self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Main crop scorer
#[derive(Debug, Clone)]
pub struct CropScorer {
    catalog: Arc<CropCatalog>,
    weights: Arc<FeatureWeights>,
}

impl CropScorer {
    /// Build a scorer, rejecting weights that are negative, non-finite or all zero
    pub fn new(catalog: Arc<CropCatalog>, weights: FeatureWeights) -> Result<Self, CatalogError> {
        weights.validate()?;
        Ok(Self::from_validated(catalog, weights))
    }

    fn from_validated(catalog: Arc<CropCatalog>, weights: FeatureWeights) -> Self {
        Self {
            catalog,
            weights: Arc::new(weights),
        }
    }

    /// Scorer over the compiled-in catalog and default weights (shared)
    pub fn builtin() -> &'static CropScorer {
        static BUILTIN: OnceLock<CropScorer> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            CropScorer::from_validated(CropCatalog::builtin(), FeatureWeights::default())
        })
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Rank every crop in the catalog for `sample`
    pub fn predict_crop(&self, sample: &InputSample) -> PredictionResult {
        let predictions = self
            .catalog
            .iter()
            .map(|profile| CropPrediction {
                crop: profile.name.clone(),
                probability: calculate_suitability_score(sample, profile, &self.weights),
            })
            .collect();

        let result = PredictionResult::ranked(predictions);
        if let Some(best) = result.best() {
            tracing::debug!(
                "Ranked {} crops, best: {} ({:.3})",
                result.len(),
                best.crop,
                best.probability
            );
        }
        result
    }

    /// Ranking truncated to the best `k` crops
    pub fn predict_top_k(&self, sample: &InputSample, k: usize) -> PredictionResult {
        self.predict_crop(sample).truncate(k)
    }

    /// Rank many samples IN PARALLEL; output order matches input order
    pub fn predict_batch(&self, samples: &[InputSample]) -> Vec<PredictionResult> {
        samples
            .par_iter()
            .map(|sample| self.predict_crop(sample))
            .collect()
    }

    /// Sequential counterpart of `predict_batch`
    pub fn predict_batch_sequential(&self, samples: &[InputSample]) -> Vec<PredictionResult> {
        samples.iter().map(|sample| self.predict_crop(sample)).collect()
    }

    /// Best `k` crops as recommendation cards with profit over `land_size_acres`
    pub fn recommend(
        &self,
        sample: &InputSample,
        k: usize,
        land_size_acres: f64,
    ) -> Vec<CropRecommendation> {
        let ranking = self.predict_crop(sample);
        recommendations(ranking.top(k), &self.catalog, sample, land_size_acres)
    }

    /// Per-factor breakdown for one crop (case-insensitive name)
    pub fn explain(&self, sample: &InputSample, crop: &str) -> Option<SuitabilityBreakdown> {
        self.catalog
            .get(crop)
            .map(|profile| score_breakdown(sample, profile, &self.weights))
    }
}

/// Rank the built-in catalog for `sample`
pub fn predict_crop(sample: &InputSample) -> PredictionResult {
    CropScorer::builtin().predict_crop(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CropProfile, ParameterRange};
    use crate::input::{arid_plateau, coastal_orchard, paddy_field};

    fn flat_profile(name: &str) -> CropProfile {
        let r = ParameterRange::new(10.0, 100.0, 50.0, 40.0, 60.0);
        CropProfile {
            name: name.to_string(),
            nitrogen: r,
            phosphorus: r,
            potassium: r,
            temperature: r,
            humidity: r,
            ph: r,
            rainfall: r,
            soil_suitability: Default::default(),
        }
    }

    #[test]
    fn test_rice_ranks_first_for_paddy() {
        let result = predict_crop(&paddy_field());
        assert_eq!(result.len(), 22);
        let best = result.best().unwrap();
        assert_eq!(best.crop, "Rice");
        assert_eq!(best.probability, 1.0);
        assert_eq!(best.suitability_percent(), 100);
    }

    #[test]
    fn test_mothbeans_rank_first_for_arid_plateau() {
        let result = predict_crop(&arid_plateau());
        assert_eq!(result.best().unwrap().crop, "Mothbeans");
    }

    #[test]
    fn test_ranking_is_sorted_descending() {
        let result = predict_crop(&coastal_orchard());
        for pair in result.as_slice().windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = CropCatalog::from_profiles(vec![
            flat_profile("Zeta"),
            flat_profile("Alpha"),
            flat_profile("Mid"),
        ])
        .unwrap();
        let scorer = CropScorer::new(Arc::new(catalog), FeatureWeights::default()).unwrap();

        let result = scorer.predict_crop(&paddy_field());
        let names: Vec<&str> = result.iter().map(|p| p.crop.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_top_k() {
        let scorer = CropScorer::builtin();
        let full = scorer.predict_crop(&paddy_field());
        let top3 = scorer.predict_top_k(&paddy_field(), 3);
        assert_eq!(top3.len(), 3);
        assert_eq!(top3.as_slice(), full.top(3));
        assert_eq!(full.top(100).len(), 22);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let samples = vec![paddy_field(), arid_plateau(), coastal_orchard()];
        let scorer = CropScorer::builtin();
        assert_eq!(scorer.predict_batch(&samples), scorer.predict_batch_sequential(&samples));
    }

    #[test]
    fn test_explain_unknown_crop() {
        let scorer = CropScorer::builtin();
        assert!(scorer.explain(&paddy_field(), "wheat").is_none());
        let rice = scorer.explain(&paddy_field(), "rice").unwrap();
        assert_eq!(rice.score, 1.0);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut negative = FeatureWeights::default();
        negative.n = -0.5;
        let err = CropScorer::new(CropCatalog::builtin(), negative).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidWeights(_)));

        let mut infinite = FeatureWeights::default();
        infinite.rainfall = f64::INFINITY;
        assert!(CropScorer::new(CropCatalog::builtin(), infinite).is_err());

        assert!(CropScorer::new(CropCatalog::builtin(), FeatureWeights::zero()).is_err());
    }

    #[test]
    fn test_custom_weights_stay_bounded() {
        let mut weights = FeatureWeights::default();
        weights.n = 3.0;
        weights.soil_type = 0.0;
        let scorer = CropScorer::new(CropCatalog::builtin(), weights).unwrap();

        let mut sample = paddy_field();
        sample.nitrogen = 0.0;
        for prediction in scorer.predict_crop(&sample).iter() {
            assert!((0.0..=1.0).contains(&prediction.probability), "{:?}", prediction);
        }
    }

    #[test]
    fn test_nan_scores_sort_deterministically() {
        let result = PredictionResult::ranked(vec![
            CropPrediction { crop: "A".to_string(), probability: 0.2 },
            CropPrediction { crop: "B".to_string(), probability: f64::NAN },
            CropPrediction { crop: "C".to_string(), probability: 0.9 },
        ]);
        let names: Vec<&str> = result.iter().map(|p| p.crop.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_recommend_follows_ranking() {
        let scorer = CropScorer::builtin();
        let cards = scorer.recommend(&arid_plateau(), 3, 2.0);
        let ranking = scorer.predict_crop(&arid_plateau());

        assert_eq!(cards.len(), 3);
        for (card, prediction) in cards.iter().zip(ranking.top(3)) {
            assert_eq!(card.crop, prediction.crop);
            assert_eq!(card.probability, prediction.probability);
        }
        // Mothbeans: midpoint 37,500/ha over 2 acres
        assert_eq!(cards[0].estimated_total_profit, Some(30_351));
    }

    #[test]
    fn test_result_serializes_as_array() {
        let json = serde_json::to_value(predict_crop(&paddy_field()).truncate(1)).unwrap();
        assert_eq!(json, serde_json::json!([{ "crop": "Rice", "probability": 1.0 }]));
    }
}
