//! Input samples and boundary parsing
//!
//! `InputSample` is what the scorer consumes: seven finite numbers and an
//! optional soil label. `PredictionRequest` is what arrives over HTTP, where
//! numbers may be JSON numbers or numeric strings and field names vary
//! between forms (`ph` / `pH`, `N` / `nitrogen`, ...).
//!
//! Conversion follows an `InputPolicy`:
//! - `Strict` rejects the first missing, malformed or non-finite field
//! - `Lenient` substitutes the documented fallback for that field and logs it

use crate::catalog::Quantity;
use crate::crop_info::DEFAULT_LAND_SIZE_ACRES;
use crate::error::InputError;
use crate::weights::SOIL_TYPE_KEY;
use serde::{Deserialize, Serialize};

// ============================================================================
// Input Sample
// ============================================================================

/// One suitability query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    #[serde(rename = "soilType", default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
}

impl InputSample {
    /// Measurement for a given quantity
    pub fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Nitrogen => self.nitrogen,
            Quantity::Phosphorus => self.phosphorus,
            Quantity::Potassium => self.potassium,
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
            Quantity::Ph => self.ph,
            Quantity::Rainfall => self.rainfall,
        }
    }

    pub fn with_soil_type(mut self, soil_type: &str) -> Self {
        self.soil_type = Some(soil_type.to_string());
        self
    }
}

const SOIL_TYPE_FIELD: &str = SOIL_TYPE_KEY;
const LAND_SIZE_FIELD: &str = "landSize";

/// Fallback used by `InputPolicy::Lenient` when a field cannot be read
pub fn fallback_value(quantity: Quantity) -> f64 {
    match quantity {
        Quantity::Nitrogen | Quantity::Phosphorus | Quantity::Potassium => 0.0,
        Quantity::Temperature => 25.0,
        Quantity::Humidity => 80.0,
        Quantity::Ph => 6.5,
        Quantity::Rainfall => 200.0,
    }
}

// ============================================================================
// Parse Policy
// ============================================================================

/// How unreadable request fields are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Reject with an `InputError` naming the field
    #[default]
    Strict,
    /// Substitute `fallback_value` and log a warning
    Lenient,
}

impl InputPolicy {
    /// Parse "strict" / "lenient" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(InputPolicy::Strict),
            "lenient" => Some(InputPolicy::Lenient),
            _ => None,
        }
    }
}

// ============================================================================
// Raw Request
// ============================================================================

/// A request field as sent: usually a JSON number or a numeric string
///
/// Any other JSON value (bool, array, object) lands in `Other` so it goes
/// through the `InputPolicy` like every other unreadable field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    fn to_f64(&self, field: &'static str) -> Result<f64, InputError> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InputError::Missing { field });
                }
                trimmed.parse::<f64>().map_err(|_| InputError::Malformed {
                    field,
                    value: s.clone(),
                })?
            }
            FieldValue::Other(v) => {
                return Err(InputError::Malformed {
                    field,
                    value: v.to_string(),
                })
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(InputError::NonFinite { field })
        }
    }
}

/// Raw prediction request body as sent by the web forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "N", alias = "nitrogen", default)]
    pub nitrogen: Option<FieldValue>,
    #[serde(rename = "P", alias = "phosphorus", default)]
    pub phosphorus: Option<FieldValue>,
    #[serde(rename = "K", alias = "potassium", default)]
    pub potassium: Option<FieldValue>,
    #[serde(alias = "Temperature", default)]
    pub temperature: Option<FieldValue>,
    #[serde(alias = "Humidity", default)]
    pub humidity: Option<FieldValue>,
    #[serde(alias = "pH", default)]
    pub ph: Option<FieldValue>,
    #[serde(alias = "Rainfall", default)]
    pub rainfall: Option<FieldValue>,
    #[serde(rename = "soilType", alias = "soil_type", default)]
    pub soil_type: Option<FieldValue>,
    /// Farm size in acres, used for profit estimates
    #[serde(rename = "landSize", alias = "land_size", default)]
    pub land_size: Option<FieldValue>,
}

impl PredictionRequest {
    fn field(&self, quantity: Quantity) -> Option<&FieldValue> {
        match quantity {
            Quantity::Nitrogen => self.nitrogen.as_ref(),
            Quantity::Phosphorus => self.phosphorus.as_ref(),
            Quantity::Potassium => self.potassium.as_ref(),
            Quantity::Temperature => self.temperature.as_ref(),
            Quantity::Humidity => self.humidity.as_ref(),
            Quantity::Ph => self.ph.as_ref(),
            Quantity::Rainfall => self.rainfall.as_ref(),
        }
    }

    fn resolve(&self, quantity: Quantity, policy: InputPolicy) -> Result<f64, InputError> {
        let field = quantity.key();
        let parsed = match self.field(quantity) {
            Some(value) => value.to_f64(field),
            None => Err(InputError::Missing { field }),
        };

        match (parsed, policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), InputPolicy::Strict) => Err(e),
            (Err(e), InputPolicy::Lenient) => {
                let fallback = fallback_value(quantity);
                tracing::warn!(field, fallback, "{}; using fallback", e);
                Ok(fallback)
            }
        }
    }

    /// Soil label, blank counting as absent; non-string labels follow the policy
    fn soil_label(&self, policy: InputPolicy) -> Result<Option<String>, InputError> {
        let field = SOIL_TYPE_FIELD;
        match &self.soil_type {
            None => Ok(None),
            Some(FieldValue::Text(s)) => {
                let trimmed = s.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Some(FieldValue::Number(n)) => Self::bad_label(field, n.to_string(), policy),
            Some(FieldValue::Other(v)) => Self::bad_label(field, v.to_string(), policy),
        }
    }

    fn bad_label(
        field: &'static str,
        value: String,
        policy: InputPolicy,
    ) -> Result<Option<String>, InputError> {
        let e = InputError::NotText { field, value };
        match policy {
            InputPolicy::Strict => Err(e),
            InputPolicy::Lenient => {
                tracing::warn!(field, "{}; ignoring soil type", e);
                Ok(None)
            }
        }
    }

    /// Land size in acres; absent means `DEFAULT_LAND_SIZE_ACRES`
    pub fn land_size_acres(&self, policy: InputPolicy) -> Result<f64, InputError> {
        let field = LAND_SIZE_FIELD;
        let parsed = match &self.land_size {
            None => return Ok(DEFAULT_LAND_SIZE_ACRES),
            Some(value) => value.to_f64(field).and_then(|acres| {
                if acres > 0.0 {
                    Ok(acres)
                } else {
                    Err(InputError::NotPositive { field, value: acres })
                }
            }),
        };

        match (parsed, policy) {
            (Ok(acres), _) => Ok(acres),
            (Err(e), InputPolicy::Strict) => Err(e),
            (Err(e), InputPolicy::Lenient) => {
                tracing::warn!(field, fallback = DEFAULT_LAND_SIZE_ACRES, "{}; using fallback", e);
                Ok(DEFAULT_LAND_SIZE_ACRES)
            }
        }
    }

    /// Convert to an `InputSample` under the given policy
    pub fn into_sample(self, policy: InputPolicy) -> Result<InputSample, InputError> {
        Ok(InputSample {
            nitrogen: self.resolve(Quantity::Nitrogen, policy)?,
            phosphorus: self.resolve(Quantity::Phosphorus, policy)?,
            potassium: self.resolve(Quantity::Potassium, policy)?,
            temperature: self.resolve(Quantity::Temperature, policy)?,
            humidity: self.resolve(Quantity::Humidity, policy)?,
            ph: self.resolve(Quantity::Ph, policy)?,
            rainfall: self.resolve(Quantity::Rainfall, policy)?,
            soil_type: self.soil_label(policy)?,
        })
    }
}

// ============================================================================
// Sample Conditions
// ============================================================================

/// Irrigated lowland paddy on clay; inside Rice's optimal window for every quantity
pub fn paddy_field() -> InputSample {
    InputSample {
        nitrogen: 90.0,
        phosphorus: 45.0,
        potassium: 45.0,
        temperature: 27.0,
        humidity: 80.0,
        ph: 6.5,
        rainfall: 220.0,
        soil_type: Some("clay".to_string()),
    }
}

/// Hot, dry plateau on black soil; low fertility, alkaline
pub fn arid_plateau() -> InputSample {
    InputSample {
        nitrogen: 35.0,
        phosphorus: 55.0,
        potassium: 35.0,
        temperature: 33.0,
        humidity: 40.0,
        ph: 7.8,
        rainfall: 60.0,
        soil_type: Some("black".to_string()),
    }
}

/// Humid coastal belt on sandy soil
pub fn coastal_orchard() -> InputSample {
    InputSample {
        nitrogen: 40.0,
        phosphorus: 40.0,
        potassium: 40.0,
        temperature: 30.0,
        humidity: 75.0,
        ph: 6.2,
        rainfall: 120.0,
        soil_type: Some("sandy".to_string()),
    }
}

/// All sample conditions with display names
pub fn sample_conditions() -> Vec<(&'static str, InputSample)> {
    vec![
        ("Lowland paddy (clay)", paddy_field()),
        ("Arid plateau (black soil)", arid_plateau()),
        ("Coastal orchard (sandy)", coastal_orchard()),
    ]
}
