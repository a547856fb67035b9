// Axum API Server Module
//
// Purpose: JSON API over the crop scorer (ranking, explanations, soil analysis)
// Scoring is pure and cheap per request; only batch ranking moves to the
// blocking pool.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::crop_info::recommendations;
use crate::error::InputError;
use crate::input::{InputPolicy, InputSample, PredictionRequest};
use crate::scorer::CropScorer;
use crate::soil_analysis::analyze_soil;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<CropScorer>,
    /// Rendered `/api/predict` responses keyed by parsed sample + k
    pub cache: Cache<String, serde_json::Value>,
    pub input_policy: InputPolicy,
    pub default_top_k: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing crop scorer...");
        let scorer = config.build_scorer()?;
        tracing::info!(
            "Crop scorer ready: {} crops, total feature weight {:.3}",
            scorer.catalog().len(),
            scorer.weights().total()
        );

        Ok(Self::with_scorer(scorer, config.input_policy, config.default_top_k))
    }

    pub fn with_scorer(scorer: CropScorer, input_policy: InputPolicy, default_top_k: usize) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000) // 10K entries
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            scorer: Arc::new(scorer),
            cache,
            input_policy,
            default_top_k,
        }
    }

    /// `top_k` from the query, or the configured default; 0 means the full ranking
    fn resolve_top_k(&self, requested: Option<usize>) -> usize {
        match requested.unwrap_or(self.default_top_k) {
            0 => self.scorer.catalog().len(),
            k => k,
        }
    }

    fn parse(&self, request: PredictionRequest) -> Result<InputSample, AppError> {
        request.into_sample(self.input_policy).map_err(AppError::from)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog endpoints
        .route("/api/crops", get(list_crops))
        .route("/api/crops/:name", get(get_crop))
        .route("/api/crops/:name/explain", post(explain_crop))

        // Ranking endpoints
        .route("/api/predict", post(predict))
        .route("/api/predict/batch", post(predict_batch))

        // Soil analysis
        .route("/api/soil/analyze", post(analyze))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "crops": state.scorer.catalog().len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_crops(State(state): State<AppState>) -> Json<serde_json::Value> {
    let names = state.scorer.catalog().names();
    Json(serde_json::json!({
        "count": names.len(),
        "crops": names,
    }))
}

async fn get_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let profile = state
        .scorer
        .catalog()
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown crop: {}", name)))?;

    let value = serde_json::to_value(profile)
        .map_err(|e| AppError::Internal(format!("JSON encode error: {}", e)))?;
    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
struct PredictQuery {
    top_k: Option<usize>,
}

/// Rank the catalog for one sample
///
/// POST /api/predict?top_k=3
async fn predict(
    State(state): State<AppState>,
    Query(params): Query<PredictQuery>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let land_size = payload.land_size_acres(state.input_policy)?;
    let sample = state.parse(payload)?;
    let k = state.resolve_top_k(params.top_k);
    let cache_key = format!("predict:{:?}:{}:{}", sample, k, land_size);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit: {}", cache_key);
        return Ok(Json(cached));
    }

    let ranking = state.scorer.predict_crop(&sample);
    let total = ranking.len();

    let response = serde_json::json!({
        "input": sample,
        "total_crops": total,
        "predictions": ranking.top(k),
        "recommendations": recommendations(ranking.top(k), state.scorer.catalog(), &sample, land_size),
        "land_size_acres": land_size,
        "soil_analysis": analyze_soil(&sample),
    });

    state.cache.insert(cache_key, response.clone()).await;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct BatchPredictionRequest {
    samples: Vec<PredictionRequest>,
    top_k: Option<usize>,
}

/// Rank many samples at once
///
/// POST /api/predict/batch
async fn predict_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchPredictionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let k = state.resolve_top_k(payload.top_k);

    let samples = payload
        .samples
        .into_iter()
        .enumerate()
        .map(|(i, request)| {
            request
                .into_sample(state.input_policy)
                .map_err(|e| AppError::BadRequest(format!("samples[{}]: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("Ranking batch of {} samples", samples.len());

    // CPU-bound work: run in blocking thread pool
    let scorer = state.scorer.clone();
    let results = tokio::task::spawn_blocking(move || scorer.predict_batch(&samples))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let rankings: Vec<_> = results.iter().map(|r| r.top(k)).collect();

    Ok(Json(serde_json::json!({
        "count": rankings.len(),
        "results": rankings,
    })))
}

/// Per-factor breakdown of one crop's score
///
/// POST /api/crops/:name/explain
async fn explain_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let sample = state.parse(payload)?;
    let breakdown = state
        .scorer
        .explain(&sample, &name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown crop: {}", name)))?;

    let value = serde_json::to_value(breakdown)
        .map_err(|e| AppError::Internal(format!("JSON encode error: {}", e)))?;
    Ok(Json(value))
}

/// Nutrient and pH status with fertilizer advice
///
/// POST /api/soil/analyze
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let sample = state.parse(payload)?;
    let analysis = analyze_soil(&sample);

    Ok(Json(serde_json::json!({
        "analysis": analysis,
        "needs_attention": analysis.needs_attention(),
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Bodies that are not JSON objects of the expected shape
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
