// Axum API Server Module
//
// Purpose: REST API over the soil assessment engine. One assessment
// endpoint, one threshold-inspection endpoint, one health check.
//
// The "at least one usable reading" rule lives here, not in the engine:
// the engine is total and will happily grade an all-Unknown sample, but a
// request carrying no numeric field at all is a caller error (400).

#[cfg(feature = "api")]
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::assessment::{SampleMetadata, SoilAssessor, SoilSample, ThresholdTable};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<SoilAssessor>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Build state from an already-validated threshold table.
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self {
            assessor: Arc::new(SoilAssessor::new(thresholds)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Soil health endpoints (JSON)
        .route("/api/soil-health/assess", post(assess_soil))
        .route("/api/soil-health/thresholds", get(get_thresholds))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_thresholds(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    serde_json::to_value(state.assessor.thresholds())
        .map(Json)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// POST /api/soil-health/assess
///
/// Body: JSON object with optional numeric `N P K pH OC` and optional
/// string `crop soil_type lab_method`. Individual malformed readings
/// coerce to absent; a body with no usable reading at all is rejected.
#[cfg(feature = "api")]
async fn assess_soil(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !payload.is_object() {
        return Err(AppError::InvalidInput(
            "request body must be a JSON object".to_string(),
        ));
    }

    let sample = SoilSample::from_json(&payload);
    if sample.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one of N, P, K, pH, OC must be numeric".to_string(),
        ));
    }

    let metadata = SampleMetadata::from_json(&payload);
    let assessment = state.assessor.assess(&sample, &metadata);

    tracing::debug!(
        "soil assessment: grade={}, problems={}",
        assessment.grade.as_str(),
        assessment.problems.len()
    );

    serde_json::to_value(&assessment)
        .map(Json)
        .map_err(|e| AppError::Internal(e.to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    InvalidInput(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
