// Axum API Server Module
//
// REST surface for the garment impact scorer: scan CRUD backed by the
// in-memory record store, reference endpoints for the fiber table and
// garment weight defaults, and a per-fiber breakdown for detail views.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use moka::future::Cache;

use std::sync::Arc;
use std::time::Duration;

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::fibers;
use crate::garment;
use crate::scorer::{fiber_contribution, score_to_grade, suggest_alternatives};
use crate::store::{NewScan, ScanStore, ScanUpdate, StoreError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ScanStore>,
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    pub fn new() -> Self {
        tracing::info!("Initializing scan record store...");
        let store = Arc::new(ScanStore::new());

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self { store, cache }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Scan endpoints (JSON API)
        .route("/api/scans", post(create_scan))
        .route("/api/scans/history/:owner", get(scan_history))
        .route(
            "/api/scans/:id",
            get(get_scan).put(update_scan).delete(delete_scan),
        )
        .route("/api/scans/:id/breakdown", get(scan_breakdown))

        // Reference data endpoints (static, cached)
        .route("/api/fibers", get(list_fibers))
        .route("/api/item-types", get(list_item_types))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Owner reference passed on reads; an opaque string, not a credential
#[derive(Debug, serde::Deserialize)]
struct OwnerQuery {
    owner: String,
}

async fn create_scan(
    State(state): State<AppState>,
    Json(scan): Json<NewScan>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let record = state.store.create(scan)?;
    tracing::debug!("Scan {} created for owner {}", record.id, record.owner_uid);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "scan_id": record.id,
            "scan": record,
        })),
    ))
}

async fn scan_history(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scans = state.store.history(&owner);

    Ok(Json(serde_json::json!({
        "success": true,
        "rows": scans.len(),
        "scans": scans,
    })))
}

async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state.store.get(id, &params.owner)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "scan": record,
    })))
}

async fn update_scan(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<ScanUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state.store.update(id, update)?;
    tracing::debug!("Scan {} updated (grade {})", id, record.impact.grade);

    Ok(Json(serde_json::json!({
        "success": true,
        "scan": record,
    })))
}

async fn delete_scan(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete(id, &params.owner)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Scan deleted",
    })))
}

/// Per-fiber contribution breakdown plus substitution suggestions
async fn scan_breakdown(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state.store.get(id, &params.owner)?;
    let weight_grams = record.item_weight_grams as f64;

    let breakdown: Vec<serde_json::Value> = record
        .fibers
        .iter()
        .map(|fiber| {
            let contribution = fiber_contribution(&fiber.name, fiber.percentage, weight_grams);
            let profile = contribution.profile;
            serde_json::json!({
                "name": fiber.name,
                "percentage": fiber.percentage,
                "water_liters": contribution.water_liters,
                "carbon_kg": contribution.carbon_kg,
                "family": profile.family.display_name(),
                "base_score": profile.base_score,
                "grade": score_to_grade(profile.base_score.round() as i32).as_str(),
                "biodegradable": profile.biodegradable,
                "decomposition": profile.decomposition,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "scan_id": record.id,
        "item_weight_grams": record.item_weight_grams,
        "fibers": breakdown,
        "suggestions": suggest_alternatives(&record.fibers),
    })))
}

async fn list_fibers(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = "fibers:all".to_string();

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for fiber table");
        return Ok(Json(cached));
    }

    let data: Vec<serde_json::Value> = fibers::all()
        .iter()
        .map(|profile| {
            serde_json::json!({
                "name": profile.name,
                "family": profile.family.display_name(),
                "water_per_kg": profile.water_per_kg,
                "co2_per_kg": profile.co2_per_kg,
                "base_score": profile.base_score,
                "grade": score_to_grade(profile.base_score.round() as i32).as_str(),
                "biodegradable": profile.biodegradable,
                "decomposition": profile.decomposition,
            })
        })
        .collect();

    let result = serde_json::json!({
        "rows": data.len(),
        "data": data,
        "names": fibers::fiber_names(),
    });

    state.cache.insert(cache_key, result.clone()).await;
    Ok(Json(result))
}

async fn list_item_types(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = "item_types:all".to_string();

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for item type table");
        return Ok(Json(cached));
    }

    let data: Vec<serde_json::Value> = garment::all()
        .iter()
        .map(|garment_type| {
            serde_json::json!({
                "name": garment_type.name,
                "weight_grams": garment_type.weight_grams,
                "category": garment_type.category.display_name(),
            })
        })
        .collect();

    let result = serde_json::json!({
        "rows": data.len(),
        "data": data,
        "default_weight_grams": garment::DEFAULT_WEIGHT_GRAMS,
    });

    state.cache.insert(cache_key, result.clone()).await;
    Ok(Json(result))
}

// ============================================================================
// Error Handling
// ============================================================================

enum AppError {
    NotFound(String),
    BadRequest(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::EmptyFibers => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
