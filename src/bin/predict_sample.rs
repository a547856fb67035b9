//! Predict Sample Conditions
//!
//! Ranks the built-in crop catalog for the three sample conditions and
//! prints the top crops, the limiting factor and profit estimate of the
//! winner, and the soil analysis.
//!
//! Run with: cargo run --bin predict_sample

use crop_scorer_rust::crop_info::DEFAULT_LAND_SIZE_ACRES;
use crop_scorer_rust::input::sample_conditions;
use crop_scorer_rust::{analyze_soil, CropScorer};

const TOP_K: usize = 5;

fn main() {
    println!("Crop Suitability - Sample Conditions");
    println!("====================================\n");

    let scorer = CropScorer::builtin();

    for (label, sample) in sample_conditions() {
        println!("{}", label);
        println!(
            "  N={} P={} K={} T={}°C H={}% pH={} rain={}mm soil={}",
            sample.nitrogen,
            sample.phosphorus,
            sample.potassium,
            sample.temperature,
            sample.humidity,
            sample.ph,
            sample.rainfall,
            sample.soil_type.as_deref().unwrap_or("-"),
        );

        let ranking = scorer.predict_crop(&sample);
        for (rank, prediction) in ranking.top(TOP_K).iter().enumerate() {
            println!(
                "  {}. {:<12} {:.4} ({}%)",
                rank + 1,
                prediction.crop,
                prediction.probability,
                prediction.suitability_percent()
            );
        }

        if let Some(best) = ranking.best() {
            if let Some(breakdown) = scorer.explain(&sample, &best.crop) {
                match breakdown.limiting_factor {
                    Some(factor) => println!("  Limiting factor for {}: {}", best.crop, factor),
                    None => println!("  {} is in its optimal window for every factor", best.crop),
                }
            }
        }

        if let Some(card) = scorer.recommend(&sample, 1, DEFAULT_LAND_SIZE_ACRES).first() {
            println!(
                "  {}: water {:?}, {}, {} ({} per acre)",
                card.crop,
                card.water_requirement,
                card.growth_period,
                card.estimated_profit,
                card.estimated_total_profit_text
            );
        }

        let analysis = analyze_soil(&sample);
        println!(
            "  Soil: N {}, P {}, K {}, pH {}",
            analysis.nitrogen.status.display_text(),
            analysis.phosphorus.status.display_text(),
            analysis.potassium.status.display_text(),
            analysis.ph.status.display_text(),
        );
        println!();
    }
}
