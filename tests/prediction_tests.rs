//! Prediction Integration Tests
//!
//! Exercises the public scoring API end to end: worked examples for the
//! parameter ramps, ranking guarantees over the built-in catalog, and
//! randomized checks of the score bounds.

use approx::assert_relative_eq;
use crop_scorer_rust::input::{arid_plateau, coastal_orchard, paddy_field};
use crop_scorer_rust::{
    calculate_suitability_score, predict_crop, score_parameter, CropCatalog, FeatureWeights,
    InputSample, ParameterRange, Quantity,
};
use crop_scorer_rust::scoring::component_scores;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const RICE_N: ParameterRange = ParameterRange::new(60.0, 140.0, 80.0, 70.0, 120.0);

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_rice_nitrogen_examples() {
    assert_eq!(score_parameter(90.0, &RICE_N), 1.0);
    assert_relative_eq!(score_parameter(65.0, &RICE_N), 0.75);
    assert_relative_eq!(score_parameter(150.0, &RICE_N), 0.4643, epsilon = 1e-4);
}

#[test]
fn test_rice_wins_its_own_optimal_window() {
    let result = predict_crop(&paddy_field());
    let best = result.best().unwrap();
    assert_eq!(best.crop, "Rice");
    assert_relative_eq!(best.probability, 1.0, epsilon = 1e-12);

    let runner_up = &result.top(2)[1];
    assert!(runner_up.probability < best.probability);
}

#[test]
fn test_soil_type_lookup_is_case_insensitive() {
    let upper = paddy_field().with_soil_type("CLAY");
    let lower = paddy_field().with_soil_type("clay");
    assert_eq!(predict_crop(&upper), predict_crop(&lower));
}

// ============================================================================
// Ranking guarantees
// ============================================================================

#[test]
fn test_ranking_is_complete() {
    let catalog = CropCatalog::builtin();
    for sample in [paddy_field(), arid_plateau(), coastal_orchard()] {
        let result = predict_crop(&sample);
        assert_eq!(result.len(), catalog.len());

        let ranked: HashSet<&str> = result.iter().map(|p| p.crop.as_str()).collect();
        let expected: HashSet<&str> = catalog.names().into_iter().collect();
        assert_eq!(ranked.len(), result.len(), "duplicate crop in ranking");
        assert_eq!(ranked, expected);
    }
}

#[test]
fn test_ranking_is_deterministic() {
    let first = serde_json::to_string(&predict_crop(&coastal_orchard())).unwrap();
    let second = serde_json::to_string(&predict_crop(&coastal_orchard())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_ranking_is_non_increasing() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let sample = random_sample(&mut rng);
        let result = predict_crop(&sample);
        for pair in result.as_slice().windows(2) {
            assert!(
                pair[0].probability >= pair[1].probability,
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_extreme_inputs_still_rank_everything() {
    let sample = InputSample {
        nitrogen: -1e6,
        phosphorus: 0.0,
        potassium: 1e12,
        temperature: -273.0,
        humidity: 0.0,
        ph: 14.0,
        rainfall: 1e9,
        soil_type: Some("moon dust".to_string()),
    };
    let result = predict_crop(&sample);
    assert_eq!(result.len(), 22);
    for p in result.iter() {
        assert!((0.0..=1.0).contains(&p.probability), "{:?}", p);
    }
}

// ============================================================================
// Randomized score properties
// ============================================================================

fn random_range(rng: &mut StdRng) -> ParameterRange {
    let min = rng.gen_range(0.0..100.0);
    let optimal_min = min + rng.gen_range(0.0..50.0);
    let optimal_max = optimal_min + rng.gen_range(0.0..50.0);
    let max = optimal_max + rng.gen_range(0.0..50.0);
    ParameterRange::new(min, max, (optimal_min + optimal_max) / 2.0, optimal_min, optimal_max)
}

fn random_sample(rng: &mut StdRng) -> InputSample {
    InputSample {
        nitrogen: rng.gen_range(-50.0..250.0),
        phosphorus: rng.gen_range(-50.0..200.0),
        potassium: rng.gen_range(-50.0..250.0),
        temperature: rng.gen_range(-10.0..60.0),
        humidity: rng.gen_range(0.0..120.0),
        ph: rng.gen_range(0.0..14.0),
        rainfall: rng.gen_range(0.0..500.0),
        soil_type: ["loamy", "clay", "sandy", "black", "red", "peat"]
            .get(rng.gen_range(0..6))
            .map(|s| s.to_string()),
    }
}

#[test]
fn test_parameter_score_is_bounded() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10_000 {
        let range = random_range(&mut rng);
        let value = rng.gen_range(-1_000.0..1_000.0);
        let score = score_parameter(value, &range);
        assert!((0.0..=1.0).contains(&score), "score {} for {} in {:?}", score, value, range);
    }
}

#[test]
fn test_optimal_plateau_is_exactly_one() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..2_000 {
        let range = random_range(&mut rng);
        let t: f64 = rng.gen_range(0.0..=1.0);
        let value = range.optimal_min + t * (range.optimal_max - range.optimal_min);
        let value = value.clamp(range.optimal_min, range.optimal_max);
        assert_eq!(score_parameter(value, &range), 1.0);
    }
}

#[test]
fn test_monotone_outside_optimal_window() {
    let mut rng = StdRng::seed_from_u64(44);
    for _ in 0..500 {
        let range = random_range(&mut rng);

        let mut below: Vec<f64> = (0..50)
            .map(|_| rng.gen_range(-200.0..=range.optimal_min))
            .collect();
        below.sort_by(|a, b| a.total_cmp(b));
        for pair in below.windows(2) {
            assert!(score_parameter(pair[0], &range) <= score_parameter(pair[1], &range));
        }

        let mut above: Vec<f64> = (0..50)
            .map(|_| rng.gen_range(range.optimal_max..=range.max * 3.0 + 1.0))
            .collect();
        above.sort_by(|a, b| a.total_cmp(b));
        for pair in above.windows(2) {
            assert!(score_parameter(pair[0], &range) >= score_parameter(pair[1], &range));
        }
    }
}

#[test]
fn test_suitability_is_convex_combination() {
    let mut rng = StdRng::seed_from_u64(45);
    let catalog = CropCatalog::builtin();
    let weights = FeatureWeights::default();

    for _ in 0..500 {
        let sample = random_sample(&mut rng);
        for profile in catalog.iter() {
            let subs = component_scores(&sample, profile, &weights);
            let lo = subs.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
            let hi = subs.iter().map(|c| c.score).fold(f64::NEG_INFINITY, f64::max);

            let score = calculate_suitability_score(&sample, profile, &weights);
            assert!(score >= lo - 1e-12 && score <= hi + 1e-12, "{} outside [{}, {}]", score, lo, hi);
        }
    }
}

#[test]
fn test_component_order_follows_quantities() {
    let rice = CropCatalog::builtin().get("rice").cloned().unwrap();
    let subs = component_scores(&paddy_field(), &rice, &FeatureWeights::default());
    let factors: Vec<&str> = subs.iter().map(|c| c.factor).collect();
    let mut expected: Vec<&str> = Quantity::ALL.iter().map(|q| q.key()).collect();
    expected.push("soilType");
    assert_eq!(factors, expected);
}
