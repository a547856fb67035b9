//! Feature weights for the suitability weighted average.
//!
//! Weights need not sum to 1.0; the scorer divides by the total weight of
//! the factors it actually combines. A weight of 0 (or a field missing from
//! a weights file) excludes that factor from numerator and denominator.

use crate::catalog::Quantity;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wire key of the soil-type factor
pub const SOIL_TYPE_KEY: &str = "soilType";

/// Per-factor importance (seven quantities + soil type)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeights {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    #[serde(rename = "soilType")]
    pub soil_type: f64,
}

impl Default for FeatureWeights {
    /// Importances from the random-forest feature analysis of the crop dataset
    fn default() -> Self {
        Self {
            n: 0.15,
            p: 0.12,
            k: 0.12,
            temperature: 0.18,
            humidity: 0.12,
            ph: 0.11,
            rainfall: 0.15,
            soil_type: 0.05,
        }
    }
}

impl FeatureWeights {
    pub fn zero() -> Self {
        Self {
            n: 0.0,
            p: 0.0,
            k: 0.0,
            temperature: 0.0,
            humidity: 0.0,
            ph: 0.0,
            rainfall: 0.0,
            soil_type: 0.0,
        }
    }

    pub fn weight(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Nitrogen => self.n,
            Quantity::Phosphorus => self.p,
            Quantity::Potassium => self.k,
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
            Quantity::Ph => self.ph,
            Quantity::Rainfall => self.rainfall,
        }
    }

    fn all(&self) -> [(&'static str, f64); 8] {
        [
            (Quantity::Nitrogen.key(), self.n),
            (Quantity::Phosphorus.key(), self.p),
            (Quantity::Potassium.key(), self.k),
            (Quantity::Temperature.key(), self.temperature),
            (Quantity::Humidity.key(), self.humidity),
            (Quantity::Ph.key(), self.ph),
            (Quantity::Rainfall.key(), self.rainfall),
            (SOIL_TYPE_KEY, self.soil_type),
        ]
    }

    /// Sum of all eight weights
    pub fn total(&self) -> f64 {
        self.all().iter().map(|(_, w)| w).sum()
    }

    /// Weights must be finite, non-negative and not all zero
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (key, w) in self.all() {
            if !w.is_finite() || w < 0.0 {
                return Err(CatalogError::InvalidWeights(format!(
                    "weight for '{}' is {}, expected a finite non-negative number",
                    key, w
                )));
            }
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(CatalogError::InvalidWeights("all weights are zero".to_string()));
        }
        if !total.is_finite() {
            return Err(CatalogError::InvalidWeights(format!("total weight {} overflows", total)));
        }
        Ok(())
    }

    /// Load weights from JSON; absent fields weigh 0
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let partial: PartialWeights =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let weights = partial.into_weights();
        weights.validate()?;
        tracing::info!("Loaded feature weights from {:?} (total {:.3})", path, weights.total());
        Ok(weights)
    }
}

/// File form of the weights: every field optional, missing means 0
#[derive(Debug, Default, Deserialize)]
struct PartialWeights {
    #[serde(rename = "N")]
    n: Option<f64>,
    #[serde(rename = "P")]
    p: Option<f64>,
    #[serde(rename = "K")]
    k: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    ph: Option<f64>,
    rainfall: Option<f64>,
    #[serde(rename = "soilType", alias = "soil_type")]
    soil_type: Option<f64>,
}

impl PartialWeights {
    fn into_weights(self) -> FeatureWeights {
        FeatureWeights {
            n: self.n.unwrap_or(0.0),
            p: self.p.unwrap_or(0.0),
            k: self.k.unwrap_or(0.0),
            temperature: self.temperature.unwrap_or(0.0),
            humidity: self.humidity.unwrap_or(0.0),
            ph: self.ph.unwrap_or(0.0),
            rainfall: self.rainfall.unwrap_or(0.0),
            soil_type: self.soil_type.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_total() {
        assert_relative_eq!(FeatureWeights::default().total(), 1.0, epsilon = 1e-12);
        assert!(FeatureWeights::default().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_weigh_zero() {
        let partial: PartialWeights =
            serde_json::from_str(r#"{ "N": 1.0, "temperature": 2.0 }"#).unwrap();
        let w = partial.into_weights();
        assert_eq!(w.weight(Quantity::Nitrogen), 1.0);
        assert_eq!(w.weight(Quantity::Temperature), 2.0);
        assert_eq!(w.weight(Quantity::Rainfall), 0.0);
        assert_eq!(w.soil_type, 0.0);
        assert_eq!(w.total(), 3.0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut w = FeatureWeights::default();
        w.humidity = -0.1;
        assert!(matches!(w.validate(), Err(CatalogError::InvalidWeights(_))));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let mut w = FeatureWeights::default();
        w.n = f64::MAX;
        w.p = f64::MAX;
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_all_zero_rejected() {
        assert!(FeatureWeights::zero().validate().is_err());
    }
}
