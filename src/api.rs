//! REST API for the advisor engine
//!
//! Exposes the chat session, quiz flow, and analytics panel to the dashboard
//! frontend. A thin proxy: input guards live here, everything else is the
//! engine.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::sleep;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::advisor::NEXT_QUESTION_DELAY;
use crate::analytics::AnalyticsEngine;
use crate::models::AnalysisKind;
use crate::session::SessionStore;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub analysis_type: Option<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub store: SessionStore,
    pub analytics: Arc<dyn AnalyticsEngine>,
}

/// =============================
/// Helpers — Session Identity
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

/// Accept a proper UUID, map any other non-empty string to a stable UUID,
/// and mint a fresh id when the client sent nothing.
fn resolve_session_id(value: Option<&str>) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => uuid::Uuid::new_v4(),
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoints
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    // Empty/whitespace-only input is rejected here; the engine never sees it.
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Message must not be empty".into())),
        );
    }

    let session_id = resolve_session_id(req.session_id.as_deref());
    info!(%session_id, "Received chat message");

    let (reply, epoch) = state.store.handle_message(session_id, &req.message).await;

    // The next quiz question appears after the fixed UI delay. A reset in
    // the meantime supersedes it (checked against the epoch on arrival).
    if let Some(question) = reply.delayed_question.clone() {
        let store = state.store.clone();
        tokio::spawn(async move {
            sleep(NEXT_QUESTION_DELAY).await;
            store.append_delayed(session_id, epoch, &question).await;
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session_id,
            "messages": reply.messages,
            "confidence": reply.confidence,
        }))),
    )
}

async fn reset_handler(
    State(state): State<ApiState>,
    Json(req): Json<ResetRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(Some(&req.session_id));

    if state.store.reset(session_id).await {
        info!(%session_id, "Chat reset");
        (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session_id,
                "reset": true,
            }))),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Unknown session".into())),
        )
    }
}

async fn history_handler(
    State(state): State<ApiState>,
    Query(query): Query<HistoryQuery>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(Some(&query.session_id));

    match state.store.history(session_id).await {
        Some(messages) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session_id,
                "messages": messages,
            }))),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Unknown session".into())),
        ),
    }
}

/// =============================
/// Analytics Endpoint
/// =============================

async fn analysis_handler(
    State(state): State<ApiState>,
    Json(req): Json<AnalysisRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let kind = req
        .analysis_type
        .as_deref()
        .map(AnalysisKind::parse)
        .unwrap_or(AnalysisKind::Comprehensive);

    info!(kind = %kind, "Analysis requested");

    match state.analytics.run_analysis(kind).await {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::success(result))),
        Err(e) => {
            // Transient failure: the panel shows a notice and keeps its
            // previous results.
            warn!(error = %e, "Analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Analysis failed: {}", e))),
            )
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(store: SessionStore, analytics: Arc<dyn AnalyticsEngine>) -> Router {
    let state = ApiState { store, analytics };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/reset", post(reset_handler))
        .route("/api/chat/history", get(history_handler))
        .route("/api/analysis", post(analysis_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    store: SessionStore,
    analytics: Arc<dyn AnalyticsEngine>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(store, analytics);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_uuid_is_deterministic() {
        let a = stable_uuid_from_string("tab-session-1");
        let b = stable_uuid_from_string("tab-session-1");
        let c = stable_uuid_from_string("tab-session-2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_resolve_session_id() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(resolve_session_id(Some(&uuid.to_string())), uuid);

        // Non-UUID strings map stably.
        assert_eq!(
            resolve_session_id(Some("my-tab")),
            resolve_session_id(Some("my-tab"))
        );

        // Missing/blank ids mint fresh sessions.
        assert_ne!(resolve_session_id(None), resolve_session_id(None));
        assert_ne!(resolve_session_id(Some("  ")), resolve_session_id(Some("  ")));
    }
}
