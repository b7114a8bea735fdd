//! Router, handlers and error mapping for the HTTP API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chemrisk_core::error::ChemriskError;
use chemrisk_core::model::AssessmentResult;
use chemrisk_core::source::CompoundSource;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CompoundSource>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/environmental-risk", get(environmental_risk))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

#[derive(Deserialize)]
struct RiskQuery {
    query: Option<String>,
}

/// JSON error body paired with a status code.
struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ChemriskError> for ApiError {
    fn from(err: ChemriskError) -> Self {
        error!(error = %err, "assessment failed");
        match &err {
            ChemriskError::NotFound { .. } => ApiError {
                status: StatusCode::NOT_FOUND,
                error: err.guidance(),
                details: None,
            },
            ChemriskError::Unavailable { detail } => ApiError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: "Failed to retrieve essential data from PubChem.".to_string(),
                details: Some(detail.clone()),
            },
            ChemriskError::Transport { .. }
            | ChemriskError::MalformedData { .. }
            | ChemriskError::Json(_) => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "An internal server error occurred processing the request.".to_string(),
                details: Some(err.to_string()),
            },
        }
    }
}

async fn environmental_risk(
    State(state): State<AppState>,
    Query(params): Query<RiskQuery>,
) -> Result<Json<AssessmentResult>, ApiError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Missing compound query (name, CID, formula, or InChI)".to_string(),
            details: None,
        });
    }

    let result = chemrisk_core::assess(query, state.source.as_ref()).await?;
    Ok(Json(result))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
