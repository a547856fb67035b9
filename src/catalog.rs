//! Crop Catalog - Static reference data for suitability scoring
//!
//! Each crop carries one `ParameterRange` per measured quantity plus a soil
//! suitability table. The built-in catalog (22 crops) is compiled in and
//! shared process-wide; a replacement catalog can be loaded from JSON and is
//! validated before use.
//!
//! JSON layout of a profile (ranges are `[min, max, mean, optimal_min, optimal_max]`):
//! ```json
//! { "name": "Rice",
//!   "N": [60, 140, 80, 70, 120], "P": [30, 70, 45, 35, 60], "K": [30, 70, 45, 35, 60],
//!   "temperature": [20, 35, 25, 22, 32], "humidity": [70, 90, 80, 75, 85],
//!   "ph": [5.0, 8.0, 6.5, 5.5, 7.5], "rainfall": [150, 300, 200, 180, 280],
//!   "soil": { "loamy": 0.8, "clay": 1.0, "sandy": 0.4, "black": 0.7, "red": 0.6 } }
//! ```

use crate::error::CatalogError;
use crate::utils::canonical_key;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

// ============================================================================
// Quantities
// ============================================================================

/// Measured soil/climate quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "N")]
    Nitrogen,
    #[serde(rename = "P")]
    Phosphorus,
    #[serde(rename = "K")]
    Potassium,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "humidity")]
    Humidity,
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "rainfall")]
    Rainfall,
}

impl Quantity {
    /// All quantities in scoring order
    pub const ALL: [Quantity; 7] = [
        Quantity::Nitrogen,
        Quantity::Phosphorus,
        Quantity::Potassium,
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Ph,
        Quantity::Rainfall,
    ];

    /// Wire key used in request bodies and catalog JSON
    pub fn key(&self) -> &'static str {
        match self {
            Quantity::Nitrogen => "N",
            Quantity::Phosphorus => "P",
            Quantity::Potassium => "K",
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Ph => "ph",
            Quantity::Rainfall => "rainfall",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quantity::Nitrogen => "Nitrogen",
            Quantity::Phosphorus => "Phosphorus",
            Quantity::Potassium => "Potassium",
            Quantity::Temperature => "Temperature",
            Quantity::Humidity => "Humidity",
            Quantity::Ph => "pH",
            Quantity::Rainfall => "Rainfall",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Nitrogen | Quantity::Phosphorus | Quantity::Potassium => "kg/ha",
            Quantity::Temperature => "°C",
            Quantity::Humidity => "%",
            Quantity::Ph => "",
            Quantity::Rainfall => "mm",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Parameter Range
// ============================================================================

/// Reference range of one quantity for one crop
///
/// Invariant (checked by `validate`): `0 <= min <= optimal_min <= optimal_max <= max`.
/// `min` and `max` are divisors in the out-of-range ramps, which is why
/// negative bounds are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 5]", into = "[f64; 5]")]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, mean: f64, optimal_min: f64, optimal_max: f64) -> Self {
        Self { min, max, mean, optimal_min, optimal_max }
    }

    /// Whether `value` lies in the optimal window (inclusive)
    pub fn is_optimal(&self, value: f64) -> bool {
        value >= self.optimal_min && value <= self.optimal_max
    }

    /// Check the range invariant, returning the violated condition
    pub fn validate(&self) -> Result<(), &'static str> {
        let fields = [self.min, self.max, self.mean, self.optimal_min, self.optimal_max];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err("all bounds must be finite");
        }
        if self.min < 0.0 {
            return Err("min must be non-negative");
        }
        if self.min > self.optimal_min {
            return Err("min exceeds optimal_min");
        }
        if self.optimal_min > self.optimal_max {
            return Err("optimal_min exceeds optimal_max");
        }
        if self.optimal_max > self.max {
            return Err("optimal_max exceeds max");
        }
        Ok(())
    }
}

impl From<[f64; 5]> for ParameterRange {
    fn from(r: [f64; 5]) -> Self {
        ParameterRange::new(r[0], r[1], r[2], r[3], r[4])
    }
}

impl From<ParameterRange> for [f64; 5] {
    fn from(r: ParameterRange) -> Self {
        [r.min, r.max, r.mean, r.optimal_min, r.optimal_max]
    }
}

// ============================================================================
// Crop Profile
// ============================================================================

/// Reference requirements for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Display name (unique after canonicalization)
    pub name: String,

    #[serde(rename = "N")]
    pub nitrogen: ParameterRange,
    #[serde(rename = "P")]
    pub phosphorus: ParameterRange,
    #[serde(rename = "K")]
    pub potassium: ParameterRange,
    pub temperature: ParameterRange,
    pub humidity: ParameterRange,
    pub ph: ParameterRange,
    pub rainfall: ParameterRange,

    /// Soil label -> multiplier in [0, 1]
    #[serde(default, rename = "soil")]
    pub soil_suitability: BTreeMap<String, f64>,
}

impl CropProfile {
    /// Range for a given quantity
    pub fn range(&self, quantity: Quantity) -> &ParameterRange {
        match quantity {
            Quantity::Nitrogen => &self.nitrogen,
            Quantity::Phosphorus => &self.phosphorus,
            Quantity::Potassium => &self.potassium,
            Quantity::Temperature => &self.temperature,
            Quantity::Humidity => &self.humidity,
            Quantity::Ph => &self.ph,
            Quantity::Rainfall => &self.rainfall,
        }
    }

    /// Soil multiplier for a label, if the crop lists it (case-insensitive)
    pub fn soil_multiplier(&self, soil_type: &str) -> Option<f64> {
        self.soil_suitability.get(&canonical_key(soil_type)).copied()
    }

    /// Lower-case every soil label so lookups match `canonical_key`
    fn canonicalize_soil_labels(mut self) -> Self {
        self.soil_suitability = self
            .soil_suitability
            .into_iter()
            .map(|(label, value)| (canonical_key(&label), value))
            .collect();
        self
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        for quantity in Quantity::ALL {
            let range = self.range(quantity);
            range.validate().map_err(|reason| CatalogError::InvalidRange {
                crop: self.name.clone(),
                quantity,
                range: *range,
                reason,
            })?;
        }

        let mut labels = FxHashSet::default();
        for (soil, &value) in &self.soil_suitability {
            if !labels.insert(canonical_key(soil)) {
                return Err(CatalogError::DuplicateSoilLabel {
                    crop: self.name.clone(),
                    soil: soil.clone(),
                });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(CatalogError::InvalidSoilMultiplier {
                    crop: self.name.clone(),
                    soil: soil.clone(),
                    value,
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered, read-only set of crop profiles with a case-insensitive name index
#[derive(Debug, Clone)]
pub struct CropCatalog {
    profiles: Vec<CropProfile>,
    index: FxHashMap<String, usize>,
}

impl CropCatalog {
    /// Compiled-in catalog, built once and shared
    pub fn builtin() -> Arc<CropCatalog> {
        static BUILTIN: OnceLock<Arc<CropCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Self::build(builtin_profiles())))
            .clone()
    }

    /// Validate and index a list of profiles (order is preserved)
    pub fn from_profiles(profiles: Vec<CropProfile>) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = FxHashSet::default();
        for profile in &profiles {
            profile.validate()?;
            if !seen.insert(canonical_key(&profile.name)) {
                return Err(CatalogError::DuplicateCrop(profile.name.clone()));
            }
        }

        Ok(Self::build(profiles))
    }

    /// Load a catalog from a JSON array of profiles
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let profiles: Vec<CropProfile> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_profiles(profiles)?;
        tracing::info!("Loaded {} crop profiles from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    fn build(profiles: Vec<CropProfile>) -> Self {
        let profiles: Vec<CropProfile> = profiles
            .into_iter()
            .map(CropProfile::canonicalize_soil_labels)
            .collect();

        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (canonical_key(&p.name), i))
            .collect();

        Self { profiles, index }
    }

    /// Case-insensitive lookup by crop name
    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.index.get(&canonical_key(name)).map(|&i| &self.profiles[i])
    }

    /// Profiles in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CropProfile> {
        self.profiles.iter()
    }

    pub fn profiles(&self) -> &[CropProfile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// ============================================================================
// Built-in Reference Data
// ============================================================================

/// Soil labels, in the column order of `BuiltinCrop::soil`
pub const SOIL_TYPES: [&str; 5] = ["loamy", "clay", "sandy", "black", "red"];

/// Compact row of the compiled-in table
struct BuiltinCrop {
    name: &'static str,
    /// N, P, K, temperature, humidity, ph, rainfall as [min, max, mean, opt_min, opt_max]
    ranges: [[f64; 5]; 7],
    /// loamy, clay, sandy, black, red
    soil: [f64; 5],
}

const BUILTIN_CROPS: [BuiltinCrop; 22] = [
    BuiltinCrop {
        name: "Rice",
        ranges: [
            [60.0, 140.0, 80.0, 70.0, 120.0],
            [30.0, 70.0, 45.0, 35.0, 60.0],
            [30.0, 70.0, 45.0, 35.0, 60.0],
            [20.0, 35.0, 25.0, 22.0, 32.0],
            [70.0, 90.0, 80.0, 75.0, 85.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [150.0, 300.0, 200.0, 180.0, 280.0],
        ],
        soil: [0.8, 1.0, 0.4, 0.7, 0.6],
    },
    BuiltinCrop {
        name: "Maize",
        ranges: [
            [60.0, 140.0, 90.0, 70.0, 120.0],
            [30.0, 70.0, 45.0, 35.0, 60.0],
            [30.0, 70.0, 45.0, 35.0, 60.0],
            [18.0, 32.0, 25.0, 20.0, 30.0],
            [40.0, 80.0, 60.0, 50.0, 75.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [60.0, 180.0, 120.0, 80.0, 160.0],
        ],
        soil: [1.0, 0.6, 0.7, 0.8, 0.7],
    },
    BuiltinCrop {
        name: "Chickpea",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [20.0, 60.0, 40.0, 30.0, 50.0],
            [15.0, 30.0, 22.0, 18.0, 27.0],
            [30.0, 70.0, 50.0, 40.0, 60.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [0.9, 0.7, 0.5, 1.0, 0.8],
    },
    BuiltinCrop {
        name: "Kidneybeans",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [20.0, 60.0, 40.0, 30.0, 50.0],
            [18.0, 32.0, 25.0, 20.0, 30.0],
            [40.0, 80.0, 60.0, 50.0, 70.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [1.0, 0.7, 0.6, 0.8, 0.7],
    },
    BuiltinCrop {
        name: "Pigeonpeas",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [20.0, 60.0, 40.0, 30.0, 50.0],
            [20.0, 35.0, 28.0, 22.0, 32.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.0, 8.0, 6.5, 5.5, 7.0],
            [40.0, 140.0, 90.0, 60.0, 120.0],
        ],
        soil: [0.9, 0.7, 0.5, 1.0, 0.8],
    },
    BuiltinCrop {
        name: "Mothbeans",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [30.0, 80.0, 50.0, 40.0, 70.0],
            [20.0, 50.0, 30.0, 25.0, 45.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [20.0, 60.0, 40.0, 30.0, 50.0],
            [6.0, 9.0, 7.5, 6.5, 8.5],
            [30.0, 100.0, 60.0, 40.0, 80.0],
        ],
        soil: [0.8, 0.6, 0.7, 0.9, 0.8],
    },
    BuiltinCrop {
        name: "Mungbean",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [30.0, 80.0, 50.0, 40.0, 70.0],
            [20.0, 50.0, 30.0, 25.0, 45.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [40.0, 80.0, 60.0, 50.0, 70.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [0.9, 0.7, 0.6, 1.0, 0.8],
    },
    BuiltinCrop {
        name: "Blackgram",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [30.0, 80.0, 50.0, 40.0, 70.0],
            [20.0, 50.0, 30.0, 25.0, 45.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [0.9, 0.7, 0.5, 1.0, 0.8],
    },
    BuiltinCrop {
        name: "Lentil",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [30.0, 80.0, 50.0, 40.0, 70.0],
            [20.0, 50.0, 30.0, 25.0, 45.0],
            [15.0, 30.0, 22.0, 18.0, 27.0],
            [30.0, 70.0, 50.0, 40.0, 60.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [1.0, 0.7, 0.5, 0.8, 0.7],
    },
    BuiltinCrop {
        name: "Pomegranate",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 35.0, 28.0, 22.0, 32.0],
            [40.0, 80.0, 60.0, 50.0, 70.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [30.0, 100.0, 60.0, 40.0, 80.0],
        ],
        soil: [1.0, 0.6, 0.8, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Banana",
        ranges: [
            [60.0, 140.0, 100.0, 80.0, 120.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [60.0, 140.0, 100.0, 80.0, 120.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [60.0, 100.0, 80.0, 70.0, 90.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [100.0, 200.0, 150.0, 120.0, 180.0],
        ],
        soil: [1.0, 0.7, 0.5, 0.8, 0.7],
    },
    BuiltinCrop {
        name: "Mango",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [24.0, 38.0, 30.0, 26.0, 34.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.0, 8.0, 6.5, 5.5, 7.5],
            [60.0, 160.0, 110.0, 80.0, 140.0],
        ],
        soil: [1.0, 0.6, 0.7, 0.8, 0.9],
    },
    BuiltinCrop {
        name: "Grapes",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [15.0, 30.0, 22.0, 18.0, 27.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [1.0, 0.5, 0.8, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Watermelon",
        ranges: [
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [22.0, 36.0, 28.0, 24.0, 32.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [30.0, 100.0, 60.0, 40.0, 80.0],
        ],
        soil: [0.9, 0.5, 1.0, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Muskmelon",
        ranges: [
            [40.0, 100.0, 60.0, 50.0, 80.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [22.0, 36.0, 28.0, 24.0, 32.0],
            [40.0, 80.0, 60.0, 50.0, 70.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [30.0, 100.0, 60.0, 40.0, 80.0],
        ],
        soil: [0.9, 0.5, 1.0, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Apple",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [15.0, 30.0, 22.0, 18.0, 27.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [60.0, 150.0, 100.0, 80.0, 130.0],
        ],
        soil: [1.0, 0.6, 0.5, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Orange",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 35.0, 28.0, 22.0, 32.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [60.0, 150.0, 100.0, 80.0, 130.0],
        ],
        soil: [1.0, 0.6, 0.7, 0.8, 0.9],
    },
    BuiltinCrop {
        name: "Papaya",
        ranges: [
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [22.0, 36.0, 28.0, 24.0, 32.0],
            [50.0, 90.0, 70.0, 60.0, 80.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [80.0, 180.0, 130.0, 100.0, 160.0],
        ],
        soil: [1.0, 0.5, 0.8, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Coconut",
        ranges: [
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [60.0, 100.0, 80.0, 70.0, 90.0],
            [5.0, 7.0, 6.0, 5.5, 6.5],
            [130.0, 250.0, 190.0, 150.0, 230.0],
        ],
        soil: [0.9, 0.6, 1.0, 0.7, 0.8],
    },
    BuiltinCrop {
        name: "Cotton",
        ranges: [
            [60.0, 140.0, 100.0, 80.0, 120.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [22.0, 36.0, 28.0, 24.0, 32.0],
            [40.0, 80.0, 60.0, 50.0, 70.0],
            [5.5, 8.5, 7.0, 6.0, 8.0],
            [40.0, 120.0, 80.0, 60.0, 100.0],
        ],
        soil: [0.9, 0.8, 0.6, 1.0, 0.8],
    },
    BuiltinCrop {
        name: "Jute",
        ranges: [
            [40.0, 120.0, 80.0, 60.0, 100.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [25.0, 40.0, 32.0, 28.0, 36.0],
            [60.0, 100.0, 80.0, 70.0, 90.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [130.0, 250.0, 190.0, 150.0, 230.0],
        ],
        soil: [1.0, 0.8, 0.5, 0.9, 0.7],
    },
    BuiltinCrop {
        name: "Coffee",
        ranges: [
            [60.0, 140.0, 100.0, 80.0, 120.0],
            [20.0, 60.0, 30.0, 25.0, 50.0],
            [20.0, 80.0, 40.0, 30.0, 60.0],
            [20.0, 35.0, 28.0, 22.0, 32.0],
            [60.0, 100.0, 80.0, 70.0, 90.0],
            [5.5, 7.5, 6.5, 6.0, 7.0],
            [130.0, 250.0, 190.0, 150.0, 230.0],
        ],
        soil: [1.0, 0.7, 0.5, 0.8, 0.9],
    },
];

fn builtin_profiles() -> Vec<CropProfile> {
    BUILTIN_CROPS
        .iter()
        .map(|c| {
            let [n, p, k, temperature, humidity, ph, rainfall] = c.ranges.map(ParameterRange::from);
            CropProfile {
                name: c.name.to_string(),
                nitrogen: n,
                phosphorus: p,
                potassium: k,
                temperature,
                humidity,
                ph,
                rainfall,
                soil_suitability: SOIL_TYPES
                    .iter()
                    .zip(c.soil)
                    .map(|(label, value)| (label.to_string(), value))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> CropProfile {
        let mut p = CropCatalog::builtin().get("rice").cloned().unwrap();
        p.name = name.to_string();
        p
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.len(), 22);
        let revalidated = CropCatalog::from_profiles(catalog.profiles().to_vec());
        assert!(revalidated.is_ok(), "{:?}", revalidated.err());
    }

    #[test]
    fn test_builtin_order_starts_with_rice_ends_with_coffee() {
        let catalog = CropCatalog::builtin();
        let names = catalog.names();
        assert_eq!(names.first(), Some(&"Rice"));
        assert_eq!(names.last(), Some(&"Coffee"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = CropCatalog::builtin();
        let rice = catalog.get(" RICE ").unwrap();
        assert_eq!(rice.name, "Rice");
        assert_eq!(rice.nitrogen, ParameterRange::new(60.0, 140.0, 80.0, 70.0, 120.0));
        assert!(catalog.get("wheat").is_none());
    }

    #[test]
    fn test_soil_multiplier_lookup() {
        let catalog = CropCatalog::builtin();
        let rice = catalog.get("Rice").unwrap();
        assert_eq!(rice.soil_multiplier("Clay"), Some(1.0));
        assert_eq!(rice.soil_multiplier("sandy"), Some(0.4));
        assert_eq!(rice.soil_multiplier("peat"), None);
    }

    #[test]
    fn test_range_validation() {
        assert!(ParameterRange::new(60.0, 140.0, 80.0, 70.0, 120.0).validate().is_ok());
        assert!(ParameterRange::new(0.0, 10.0, 5.0, 0.0, 10.0).validate().is_ok());
        assert_eq!(
            ParameterRange::new(80.0, 140.0, 80.0, 70.0, 120.0).validate(),
            Err("min exceeds optimal_min")
        );
        assert_eq!(
            ParameterRange::new(60.0, 110.0, 80.0, 70.0, 120.0).validate(),
            Err("optimal_max exceeds max")
        );
        assert_eq!(
            ParameterRange::new(-5.0, 10.0, 5.0, 0.0, 8.0).validate(),
            Err("min must be non-negative")
        );
        assert!(ParameterRange::new(f64::NAN, 10.0, 5.0, 0.0, 8.0).validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = CropCatalog::from_profiles(vec![profile("Rice"), profile("rice")]);
        assert!(matches!(result, Err(CatalogError::DuplicateCrop(name)) if name == "rice"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(CropCatalog::from_profiles(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_soil_multiplier_out_of_range_rejected() {
        let mut p = profile("Rice");
        p.soil_suitability.insert("loamy".to_string(), 1.5);
        let result = CropCatalog::from_profiles(vec![p]);
        assert!(matches!(result, Err(CatalogError::InvalidSoilMultiplier { .. })));
    }

    #[test]
    fn test_colliding_soil_labels_rejected() {
        let json = r#"{
            "name": "Sorghum",
            "N": [40, 120, 80, 60, 100],
            "P": [20, 60, 40, 30, 50],
            "K": [20, 60, 40, 30, 50],
            "temperature": [20, 38, 28, 25, 33],
            "humidity": [30, 70, 50, 40, 60],
            "ph": [5.5, 8.5, 7.0, 6.0, 7.5],
            "rainfall": [40, 120, 80, 50, 100],
            "soil": { "Clay": 0.2, "clay": 0.9 }
        }"#;
        let parsed: CropProfile = serde_json::from_str(json).unwrap();
        let result = CropCatalog::from_profiles(vec![parsed]);
        assert!(matches!(result, Err(CatalogError::DuplicateSoilLabel { .. })));
    }

    #[test]
    fn test_profile_json_uses_tuple_ranges() {
        let json = r#"{
            "name": "Sorghum",
            "N": [40, 120, 80, 60, 100],
            "P": [20, 60, 40, 30, 50],
            "K": [20, 60, 40, 30, 50],
            "temperature": [20, 38, 28, 25, 33],
            "humidity": [30, 70, 50, 40, 60],
            "ph": [5.5, 8.5, 7.0, 6.0, 7.5],
            "rainfall": [40, 120, 80, 50, 100],
            "soil": { "Loamy": 0.9, "BLACK": 1.0 }
        }"#;
        let parsed: CropProfile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.temperature.optimal_max, 33.0);

        let catalog = CropCatalog::from_profiles(vec![parsed]).unwrap();
        let sorghum = catalog.get("sorghum").unwrap();
        assert_eq!(sorghum.soil_multiplier("black"), Some(1.0));
        assert_eq!(sorghum.soil_multiplier("loamy"), Some(0.9));

        let round: serde_json::Value = serde_json::to_value(sorghum).unwrap();
        assert_eq!(round["N"], serde_json::json!([40.0, 120.0, 80.0, 60.0, 100.0]));
    }
}
