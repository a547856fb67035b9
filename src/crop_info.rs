//! Crop Agronomic Info
//!
//! Water need, growth period, market demand, yield and profit per hectare for
//! each built-in crop, plus the recommendation card that pairs this info with
//! a ranked prediction. Profit is given in rupees per hectare; land size is
//! taken in acres and converted.

use crate::catalog::CropCatalog;
use crate::input::InputSample;
use crate::scorer::CropPrediction;
use crate::soil_analysis::SoilRating;
use crate::utils::canonical_key;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::OnceLock;
use self::Level::{High, Low, Medium};

pub const HECTARES_PER_ACRE: f64 = 0.404686;

/// Land size assumed when none is given
pub const DEFAULT_LAND_SIZE_ACRES: f64 = 1.0;

/// Soil multiplier used for the card's soil rating when the crop lists none
/// for the sample's soil
const UNLISTED_SOIL_MULTIPLIER: f64 = 0.5;

/// Low / Medium / High scale for water need and market demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Profit band in rupees per hectare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfitRange {
    pub min: u64,
    pub max: u64,
}

impl ProfitRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) as f64 / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropInfo {
    pub crop: &'static str,
    pub water_requirement: Level,
    pub growth_period: &'static str,
    pub market_demand: Level,
    pub estimated_yield: &'static str,
    /// `None` when profit varies too much to quote
    pub profit_per_hectare: Option<ProfitRange>,
}

impl CropInfo {
    /// Profit band as shown on cards, e.g. `₹60,000-80,000/hectare`
    pub fn estimated_profit(&self) -> String {
        match self.profit_per_hectare {
            Some(range) => format!(
                "₹{}-{}/hectare",
                format_indian_grouping(range.min),
                format_indian_grouping(range.max)
            ),
            None => "Varies by market conditions".to_string(),
        }
    }

    /// Midpoint profit over `land_size_acres`, rounded to whole rupees
    pub fn estimated_total_profit(&self, land_size_acres: f64) -> Option<u64> {
        let range = self.profit_per_hectare?;
        let hectares = land_size_acres * HECTARES_PER_ACRE;
        let total = (range.midpoint() * hectares).round();
        (total.is_finite() && total >= 0.0).then_some(total as u64)
    }
}

const fn profit(min: u64, max: u64) -> Option<ProfitRange> {
    Some(ProfitRange { min, max })
}

#[rustfmt::skip]
static CROP_INFO: &[CropInfo] = &[
    CropInfo { crop: "rice", water_requirement: High, growth_period: "110-150 days", market_demand: High, estimated_yield: "4.0-6.0 tons/hectare", profit_per_hectare: profit(60_000, 80_000) },
    CropInfo { crop: "maize", water_requirement: Medium, growth_period: "90-120 days", market_demand: High, estimated_yield: "5.0-8.0 tons/hectare", profit_per_hectare: profit(50_000, 70_000) },
    CropInfo { crop: "chickpea", water_requirement: Low, growth_period: "90-120 days", market_demand: Medium, estimated_yield: "1.5-2.5 tons/hectare", profit_per_hectare: profit(45_000, 65_000) },
    CropInfo { crop: "kidneybeans", water_requirement: Medium, growth_period: "85-120 days", market_demand: Medium, estimated_yield: "1.2-2.0 tons/hectare", profit_per_hectare: profit(40_000, 60_000) },
    CropInfo { crop: "pigeonpeas", water_requirement: Low, growth_period: "120-180 days", market_demand: Medium, estimated_yield: "1.0-1.8 tons/hectare", profit_per_hectare: profit(35_000, 55_000) },
    CropInfo { crop: "mothbeans", water_requirement: Low, growth_period: "75-90 days", market_demand: Medium, estimated_yield: "0.8-1.2 tons/hectare", profit_per_hectare: profit(30_000, 45_000) },
    CropInfo { crop: "mungbean", water_requirement: Low, growth_period: "60-90 days", market_demand: Medium, estimated_yield: "1.0-1.5 tons/hectare", profit_per_hectare: profit(35_000, 50_000) },
    CropInfo { crop: "blackgram", water_requirement: Low, growth_period: "70-100 days", market_demand: Medium, estimated_yield: "0.8-1.4 tons/hectare", profit_per_hectare: profit(32_000, 48_000) },
    CropInfo { crop: "lentil", water_requirement: Low, growth_period: "100-130 days", market_demand: Medium, estimated_yield: "1.0-1.8 tons/hectare", profit_per_hectare: profit(40_000, 60_000) },
    CropInfo { crop: "pomegranate", water_requirement: Medium, growth_period: "5-7 months (fruiting)", market_demand: High, estimated_yield: "15-20 tons/hectare", profit_per_hectare: profit(300_000, 500_000) },
    CropInfo { crop: "banana", water_requirement: High, growth_period: "9-12 months", market_demand: High, estimated_yield: "30-40 tons/hectare", profit_per_hectare: profit(250_000, 400_000) },
    CropInfo { crop: "mango", water_requirement: Medium, growth_period: "4-5 months (fruiting)", market_demand: High, estimated_yield: "10-15 tons/hectare", profit_per_hectare: profit(200_000, 350_000) },
    CropInfo { crop: "grapes", water_requirement: Medium, growth_period: "3-4 months (fruiting)", market_demand: High, estimated_yield: "15-25 tons/hectare", profit_per_hectare: profit(300_000, 500_000) },
    CropInfo { crop: "watermelon", water_requirement: High, growth_period: "80-110 days", market_demand: High, estimated_yield: "25-35 tons/hectare", profit_per_hectare: profit(150_000, 250_000) },
    CropInfo { crop: "muskmelon", water_requirement: Medium, growth_period: "80-120 days", market_demand: Medium, estimated_yield: "15-25 tons/hectare", profit_per_hectare: profit(120_000, 200_000) },
    CropInfo { crop: "apple", water_requirement: Medium, growth_period: "5-6 months (fruiting)", market_demand: High, estimated_yield: "15-25 tons/hectare", profit_per_hectare: profit(400_000, 700_000) },
    CropInfo { crop: "orange", water_requirement: Medium, growth_period: "7-8 months (fruiting)", market_demand: High, estimated_yield: "15-20 tons/hectare", profit_per_hectare: profit(250_000, 400_000) },
    CropInfo { crop: "papaya", water_requirement: Medium, growth_period: "9-12 months", market_demand: Medium, estimated_yield: "40-60 tons/hectare", profit_per_hectare: profit(200_000, 350_000) },
    CropInfo { crop: "coconut", water_requirement: High, growth_period: "12 months (fruiting)", market_demand: High, estimated_yield: "10,000-15,000 nuts/hectare", profit_per_hectare: profit(150_000, 250_000) },
    CropInfo { crop: "cotton", water_requirement: Medium, growth_period: "150-180 days", market_demand: High, estimated_yield: "2.0-3.0 tons/hectare", profit_per_hectare: profit(70_000, 100_000) },
    CropInfo { crop: "jute", water_requirement: High, growth_period: "100-120 days", market_demand: Medium, estimated_yield: "2.0-3.5 tons/hectare", profit_per_hectare: profit(60_000, 90_000) },
    CropInfo { crop: "coffee", water_requirement: Medium, growth_period: "9-11 months (fruiting)", market_demand: High, estimated_yield: "1.5-2.5 tons/hectare", profit_per_hectare: profit(200_000, 350_000) },
];

/// Used for crops with no entry (e.g. crops from a custom catalog)
static DEFAULT_INFO: CropInfo = CropInfo {
    crop: "",
    water_requirement: Medium,
    growth_period: "90-120 days",
    market_demand: Medium,
    estimated_yield: "Varies by region",
    profit_per_hectare: None,
};

fn index() -> &'static FxHashMap<&'static str, &'static CropInfo> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static CropInfo>> = OnceLock::new();
    INDEX.get_or_init(|| CROP_INFO.iter().map(|info| (info.crop, info)).collect())
}

/// Info for a crop (case-insensitive), if it has an entry
pub fn lookup(crop: &str) -> Option<&'static CropInfo> {
    index().get(canonical_key(crop).as_str()).copied()
}

/// Info for a crop, falling back to generic values
pub fn crop_info(crop: &str) -> &'static CropInfo {
    lookup(crop).unwrap_or(&DEFAULT_INFO)
}

/// Group digits the Indian way: last three, then pairs (`12,34,567`)
pub fn format_indian_grouping(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

// ============================================================================
// Recommendation Cards
// ============================================================================

/// A ranked crop with its agronomic info and profit estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecommendation {
    pub crop: String,
    pub probability: f64,
    /// Whole percentage of `probability`
    pub suitability: u8,
    pub water_requirement: Level,
    pub growth_period: &'static str,
    pub market_demand: Level,
    pub estimated_yield: &'static str,
    pub estimated_profit: String,
    /// Rupees over the requested land size; `None` when profit varies
    pub estimated_total_profit: Option<u64>,
    pub estimated_total_profit_text: String,
    pub soil_suitability: SoilRating,
}

/// Build recommendation cards for ranked predictions, in ranking order
pub fn recommendations(
    predictions: &[CropPrediction],
    catalog: &CropCatalog,
    sample: &InputSample,
    land_size_acres: f64,
) -> Vec<CropRecommendation> {
    predictions
        .iter()
        .map(|prediction| {
            let info = crop_info(&prediction.crop);
            let total = info.estimated_total_profit(land_size_acres);

            let multiplier = sample
                .soil_type
                .as_deref()
                .zip(catalog.get(&prediction.crop))
                .and_then(|(soil, profile)| profile.soil_multiplier(soil))
                .unwrap_or(UNLISTED_SOIL_MULTIPLIER);

            CropRecommendation {
                crop: prediction.crop.clone(),
                probability: prediction.probability,
                suitability: prediction.suitability_percent(),
                water_requirement: info.water_requirement,
                growth_period: info.growth_period,
                market_demand: info.market_demand,
                estimated_yield: info.estimated_yield,
                estimated_profit: info.estimated_profit(),
                estimated_total_profit: total,
                estimated_total_profit_text: match total {
                    Some(rupees) => format!("₹{}", format_indian_grouping(rupees)),
                    None => "Varies based on conditions".to_string(),
                },
                soil_suitability: SoilRating::from_multiplier(multiplier),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::paddy_field;
    use crate::scorer::predict_crop;

    #[test]
    fn test_every_builtin_crop_has_info() {
        for name in CropCatalog::builtin().names() {
            assert!(lookup(name).is_some(), "no info for {}", name);
        }
        assert_eq!(CROP_INFO.len(), 22);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let rice = crop_info(" Rice ");
        assert_eq!(rice.water_requirement, Level::High);
        assert_eq!(rice.estimated_profit(), "₹60,000-80,000/hectare");
    }

    #[test]
    fn test_unknown_crop_gets_default() {
        let info = crop_info("quinoa");
        assert_eq!(info.growth_period, "90-120 days");
        assert_eq!(info.estimated_profit(), "Varies by market conditions");
        assert_eq!(info.estimated_total_profit(10.0), None);
    }

    #[test]
    fn test_total_profit_converts_acres() {
        // midpoint 70,000/ha * 0.404686 ha
        assert_eq!(crop_info("rice").estimated_total_profit(1.0), Some(28_328));
        // midpoint 550,000/ha * 2.5 acres * 0.404686
        assert_eq!(crop_info("apple").estimated_total_profit(2.5), Some(556_443));
        assert_eq!(crop_info("rice").estimated_total_profit(0.0), Some(0));
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_indian_grouping(0), "0");
        assert_eq!(format_indian_grouping(999), "999");
        assert_eq!(format_indian_grouping(28_328), "28,328");
        assert_eq!(format_indian_grouping(556_443), "5,56,443");
        assert_eq!(format_indian_grouping(12_345_678), "1,23,45,678");
    }

    #[test]
    fn test_recommendation_cards() {
        let ranking = predict_crop(&paddy_field());
        let cards = recommendations(ranking.top(2), &CropCatalog::builtin(), &paddy_field(), 1.0);

        assert_eq!(cards.len(), 2);
        let rice = &cards[0];
        assert_eq!(rice.crop, "Rice");
        assert_eq!(rice.suitability, 100);
        assert_eq!(rice.growth_period, "110-150 days");
        assert_eq!(rice.estimated_total_profit_text, "₹28,328");
        assert_eq!(rice.soil_suitability, SoilRating::Excellent);
    }

    #[test]
    fn test_card_without_soil_type_is_moderate() {
        let sample = InputSample { soil_type: None, ..paddy_field() };
        let ranking = predict_crop(&sample);
        let cards = recommendations(ranking.top(1), &CropCatalog::builtin(), &sample, 1.0);
        assert_eq!(cards[0].soil_suitability, SoilRating::Moderate);
    }
}
