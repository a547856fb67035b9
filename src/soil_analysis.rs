//! Soil Analysis
//!
//! Classifies the sample's N/P/K and pH readings into status bands and pairs
//! each with a fertilizer recommendation. Also maps a crop's soil-type
//! multiplier to a qualitative rating for display.

use crate::input::InputSample;
use serde::Serialize;

/// Nutrient level band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum NutrientStatus {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl NutrientStatus {
    /// Band `value` against four ascending thresholds (exclusive upper bounds)
    fn from_thresholds(value: f64, thresholds: [f64; 4]) -> Self {
        if value < thresholds[0] {
            NutrientStatus::VeryLow
        } else if value < thresholds[1] {
            NutrientStatus::Low
        } else if value < thresholds[2] {
            NutrientStatus::Medium
        } else if value < thresholds[3] {
            NutrientStatus::High
        } else {
            NutrientStatus::VeryHigh
        }
    }

    pub fn nitrogen(value: f64) -> Self {
        Self::from_thresholds(value, [30.0, 50.0, 80.0, 120.0])
    }

    pub fn phosphorus(value: f64) -> Self {
        Self::from_thresholds(value, [20.0, 40.0, 60.0, 80.0])
    }

    pub fn potassium(value: f64) -> Self {
        Self::from_thresholds(value, [30.0, 50.0, 80.0, 120.0])
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            NutrientStatus::VeryLow => "Very Low",
            NutrientStatus::Low => "Low",
            NutrientStatus::Medium => "Medium",
            NutrientStatus::High => "High",
            NutrientStatus::VeryHigh => "Very High",
        }
    }

    pub fn is_deficient(&self) -> bool {
        matches!(self, NutrientStatus::VeryLow | NutrientStatus::Low)
    }

    pub fn is_excessive(&self) -> bool {
        matches!(self, NutrientStatus::High | NutrientStatus::VeryHigh)
    }
}

/// Soil reaction band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PhStatus {
    HighlyAcidic,
    Acidic,
    Neutral,
    Alkaline,
    HighlyAlkaline,
}

impl PhStatus {
    pub fn from_ph(ph: f64) -> Self {
        if ph < 4.5 {
            PhStatus::HighlyAcidic
        } else if ph < 6.0 {
            PhStatus::Acidic
        } else if ph < 7.5 {
            PhStatus::Neutral
        } else if ph < 9.0 {
            PhStatus::Alkaline
        } else {
            PhStatus::HighlyAlkaline
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            PhStatus::HighlyAcidic => "Highly Acidic",
            PhStatus::Acidic => "Acidic",
            PhStatus::Neutral => "Neutral",
            PhStatus::Alkaline => "Alkaline",
            PhStatus::HighlyAlkaline => "Highly Alkaline",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            PhStatus::HighlyAcidic | PhStatus::Acidic => {
                "Apply agricultural lime to raise soil pH. Consider crops tolerant to acidic conditions."
            }
            PhStatus::Alkaline | PhStatus::HighlyAlkaline => {
                "Apply sulfur or gypsum to lower soil pH. Consider crops tolerant to alkaline conditions."
            }
            PhStatus::Neutral => "Maintain current pH levels. Most crops thrive in this pH range.",
        }
    }
}

/// Status and advice for one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientReport {
    pub value: f64,
    pub status: NutrientStatus,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhReport {
    pub value: f64,
    pub status: PhStatus,
    pub recommendation: &'static str,
}

/// Soil fertility summary for a sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAnalysis {
    pub nitrogen: NutrientReport,
    pub phosphorus: NutrientReport,
    pub potassium: NutrientReport,
    pub ph: PhReport,
}

impl SoilAnalysis {
    /// Readings that call for corrective action (deficient, excessive or off-neutral pH)
    pub fn needs_attention(&self) -> Vec<&'static str> {
        let mut flagged = Vec::new();
        for (name, report) in [
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
        ] {
            if report.status.is_deficient() || report.status.is_excessive() {
                flagged.push(name);
            }
        }
        if self.ph.status != PhStatus::Neutral {
            flagged.push("ph");
        }
        flagged
    }
}

fn nitrogen_advice(status: NutrientStatus) -> &'static str {
    if status.is_deficient() {
        "Apply nitrogen-rich fertilizers like urea or ammonium sulfate."
    } else if status.is_excessive() {
        "Reduce nitrogen application. Consider crops that can utilize excess nitrogen."
    } else {
        "Maintain current nitrogen levels with balanced fertilizer application."
    }
}

fn phosphorus_advice(status: NutrientStatus) -> &'static str {
    if status.is_deficient() {
        "Apply phosphate fertilizers like DAP or superphosphate."
    } else if status.is_excessive() {
        "Reduce phosphorus application to prevent runoff issues."
    } else {
        "Maintain current phosphorus levels with balanced fertilizer application."
    }
}

fn potassium_advice(status: NutrientStatus) -> &'static str {
    if status.is_deficient() {
        "Apply potassium-rich fertilizers like potassium chloride or potassium sulfate."
    } else if status.is_excessive() {
        "Reduce potassium application. Your soil has sufficient reserves."
    } else {
        "Maintain current potassium levels with balanced fertilizer application."
    }
}

/// Classify the sample's nutrient and pH readings
pub fn analyze_soil(sample: &InputSample) -> SoilAnalysis {
    let n = NutrientStatus::nitrogen(sample.nitrogen);
    let p = NutrientStatus::phosphorus(sample.phosphorus);
    let k = NutrientStatus::potassium(sample.potassium);
    let ph = PhStatus::from_ph(sample.ph);

    SoilAnalysis {
        nitrogen: NutrientReport { value: sample.nitrogen, status: n, recommendation: nitrogen_advice(n) },
        phosphorus: NutrientReport { value: sample.phosphorus, status: p, recommendation: phosphorus_advice(p) },
        potassium: NutrientReport { value: sample.potassium, status: k, recommendation: potassium_advice(k) },
        ph: PhReport { value: sample.ph, status: ph, recommendation: ph.recommendation() },
    }
}

// ============================================================================
// Soil Type Rating
// ============================================================================

/// Qualitative reading of a crop's soil-type multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SoilRating {
    Excellent,
    Good,
    Moderate,
    Poor,
    NotRecommended,
}

impl SoilRating {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier >= 0.9 {
            SoilRating::Excellent
        } else if multiplier >= 0.7 {
            SoilRating::Good
        } else if multiplier >= 0.5 {
            SoilRating::Moderate
        } else if multiplier >= 0.3 {
            SoilRating::Poor
        } else {
            SoilRating::NotRecommended
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SoilRating::Excellent => "Excellent",
            SoilRating::Good => "Good",
            SoilRating::Moderate => "Moderate",
            SoilRating::Poor => "Poor",
            SoilRating::NotRecommended => "Not Recommended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{arid_plateau, paddy_field};

    #[test]
    fn test_nutrient_bands() {
        assert_eq!(NutrientStatus::nitrogen(29.9), NutrientStatus::VeryLow);
        assert_eq!(NutrientStatus::nitrogen(30.0), NutrientStatus::Low);
        assert_eq!(NutrientStatus::nitrogen(90.0), NutrientStatus::High);
        assert_eq!(NutrientStatus::nitrogen(120.0), NutrientStatus::VeryHigh);
        assert_eq!(NutrientStatus::phosphorus(45.0), NutrientStatus::Medium);
        assert_eq!(NutrientStatus::potassium(45.0), NutrientStatus::Low);
    }

    #[test]
    fn test_ph_bands() {
        assert_eq!(PhStatus::from_ph(4.0), PhStatus::HighlyAcidic);
        assert_eq!(PhStatus::from_ph(5.9), PhStatus::Acidic);
        assert_eq!(PhStatus::from_ph(6.5), PhStatus::Neutral);
        assert_eq!(PhStatus::from_ph(7.5), PhStatus::Alkaline);
        assert_eq!(PhStatus::from_ph(9.0), PhStatus::HighlyAlkaline);
    }

    #[test]
    fn test_paddy_analysis() {
        let analysis = analyze_soil(&paddy_field());
        assert_eq!(analysis.nitrogen.status, NutrientStatus::High);
        assert!(analysis.nitrogen.recommendation.starts_with("Reduce nitrogen"));
        assert_eq!(analysis.phosphorus.status, NutrientStatus::Medium);
        assert!(analysis.phosphorus.recommendation.starts_with("Maintain"));
        assert_eq!(analysis.potassium.status, NutrientStatus::Low);
        assert!(analysis.potassium.recommendation.contains("potassium chloride"));
        assert_eq!(analysis.ph.status, PhStatus::Neutral);
        assert_eq!(analysis.needs_attention(), vec!["nitrogen", "potassium"]);
    }

    #[test]
    fn test_alkaline_advice() {
        let analysis = analyze_soil(&arid_plateau());
        assert_eq!(analysis.ph.status, PhStatus::Alkaline);
        assert!(analysis.ph.recommendation.contains("sulfur"));
    }

    #[test]
    fn test_soil_rating_bands() {
        assert_eq!(SoilRating::from_multiplier(1.0), SoilRating::Excellent);
        assert_eq!(SoilRating::from_multiplier(0.9), SoilRating::Excellent);
        assert_eq!(SoilRating::from_multiplier(0.7), SoilRating::Good);
        assert_eq!(SoilRating::from_multiplier(0.5), SoilRating::Moderate);
        assert_eq!(SoilRating::from_multiplier(0.4), SoilRating::Poor);
        assert_eq!(SoilRating::from_multiplier(0.1), SoilRating::NotRecommended);
        assert_eq!(SoilRating::Poor.display_text(), "Poor");
    }
}
