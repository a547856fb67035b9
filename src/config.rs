//! Server configuration from environment variables
//!
//! | Variable               | Default  | Meaning                               |
//! |------------------------|----------|---------------------------------------|
//! | `PORT`                 | 3000     | HTTP listen port                      |
//! | `CROP_CATALOG_PATH`    | built-in | JSON crop catalog replacing built-ins |
//! | `FEATURE_WEIGHTS_PATH` | built-in | JSON feature weights                  |
//! | `INPUT_POLICY`         | strict   | `strict` or `lenient` field parsing   |
//! | `DEFAULT_TOP_K`        | 3        | Crops returned when `top_k` is absent |

use crate::catalog::CropCatalog;
use crate::input::InputPolicy;
use crate::scorer::CropScorer;
use crate::weights::FeatureWeights;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub weights_path: Option<PathBuf>,
    pub input_policy: InputPolicy,
    pub default_top_k: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            catalog_path: None,
            weights_path: None,
            input_policy: InputPolicy::Strict,
            default_top_k: 3,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(p) => p.trim().parse().with_context(|| format!("Invalid PORT: {}", p))?,
            None => defaults.port,
        };

        let input_policy = match non_empty("INPUT_POLICY") {
            Some(p) => InputPolicy::parse(&p)
                .with_context(|| format!("Invalid INPUT_POLICY '{}' (expected strict or lenient)", p))?,
            None => defaults.input_policy,
        };

        let default_top_k = match non_empty("DEFAULT_TOP_K") {
            Some(k) => k
                .trim()
                .parse()
                .with_context(|| format!("Invalid DEFAULT_TOP_K: {}", k))?,
            None => defaults.default_top_k,
        };

        Ok(Self {
            port,
            catalog_path: non_empty("CROP_CATALOG_PATH").map(PathBuf::from),
            weights_path: non_empty("FEATURE_WEIGHTS_PATH").map(PathBuf::from),
            input_policy,
            default_top_k,
        })
    }

    /// Build the scorer, loading catalog/weights overrides if configured
    pub fn build_scorer(&self) -> Result<CropScorer> {
        let catalog = match &self.catalog_path {
            Some(path) => Arc::new(
                CropCatalog::load(path)
                    .with_context(|| format!("Failed to load crop catalog: {:?}", path))?,
            ),
            None => CropCatalog::builtin(),
        };

        let weights = match &self.weights_path {
            Some(path) => FeatureWeights::load(path)
                .with_context(|| format!("Failed to load feature weights: {:?}", path))?,
            None => FeatureWeights::default(),
        };

        CropScorer::new(catalog, weights).context("Invalid feature weights")
    }
}
