//! Crop Scorer Rust Implementation
//!
//! Ranks crops by how well a set of soil and climate measurements fits each
//! crop's reference ranges.
//!
//! Module layout:
//! - `catalog`: Static crop profiles (parameter ranges + soil tables)
//! - `weights`: Feature weights for the weighted average
//! - `scoring`: Per-parameter and per-crop suitability scores
//! - `scorer`: Catalog-wide ranking (single, top-k, parallel batch)
//! - `input`: Boundary parsing of raw request bodies into samples
//! - `soil_analysis`: Nutrient/pH status and fertilizer advice
//! - `crop_info`: Water need, growth period, yield and profit per crop
//! - `config`: Environment-driven server configuration
//! - `api_server`: Axum HTTP surface (feature `api`)

pub mod utils;
pub mod error;
pub mod catalog;
pub mod weights;
pub mod scoring;
pub mod scorer;
pub mod input;
pub mod soil_analysis;
pub mod crop_info;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{CropCatalog, CropProfile, ParameterRange, Quantity};
pub use error::{CatalogError, InputError};
pub use weights::FeatureWeights;
pub use scoring::{score_parameter, calculate_suitability_score, score_breakdown, SuitabilityBreakdown};
pub use scorer::{predict_crop, CropPrediction, CropScorer, PredictionResult};
pub use input::{InputPolicy, InputSample, PredictionRequest};
pub use soil_analysis::{analyze_soil, SoilAnalysis, SoilRating};
pub use crop_info::{crop_info, CropInfo, CropRecommendation};
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
