use crate::error::{Result, ScrapeError};
use crate::services::MatchService;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    service: Arc<MatchService>,
    source: String,
}

#[derive(Debug, Deserialize)]
struct MatchesQuery {
    refresh: Option<String>,
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Live Football API",
        "endpoints": [
            {
                "path": "/api/matches",
                "description": "Get live football matches data",
                "parameters": {
                    "refresh": "Set to \"true\" to force refresh the data (optional)"
                }
            },
            {
                "path": "/api/matches/details/:id",
                "description": "Get detailed information for a specific match",
                "parameters": {
                    "id": "Match ID (required)"
                }
            }
        ]
    }))
}

async fn matches(
    State(state): State<AppState>,
    Query(query): Query<MatchesQuery>,
) -> (StatusCode, Json<Value>) {
    let force_refresh = query.refresh.as_deref() == Some("true");
    match state.service.list_matches(force_refresh).await {
        Ok(matches) => (
            StatusCode::OK,
            Json(json!({
                "timestamp": Utc::now().to_rfc3339(),
                "source": state.source,
                "matches": matches,
            })),
        ),
        Err(e) => {
            error!(error = %e, "match list request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch matches data",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

async fn match_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.service.match_details(&id).await {
        Ok(payload) => (
            StatusCode::OK,
            Json(json!({
                "timestamp": Utc::now().to_rfc3339(),
                "source": state.source,
                "details": payload,
            })),
        ),
        Err(ScrapeError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Match not found" })),
        ),
        Err(e) => {
            error!(error = %e, %id, "match details request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch match details",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

pub fn router(service: Arc<MatchService>, source: String) -> Router {
    let state = AppState { service, source };
    Router::new()
        .route("/", get(index))
        .route("/api/matches", get(matches))
        .route("/api/matches/details/:id", get(match_details))
        .with_state(state)
}

pub async fn serve(service: Arc<MatchService>, source: String, port: u16) -> Result<()> {
    let app = router(service, source);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
