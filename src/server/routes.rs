//! Axum route handlers for the vibescan HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`         — Returns `{"status": "ok", "version": ...}`
//! - `POST /hud/scan`       — `{uuid}` → combined room/self/nearby text blob
//! - `POST /profile/lookup` — `{name}` → card for that avatar, 404 if unknown
//! - `POST /room/vibe`      — room energy text
//!
//! Handlers read the wall clock once at the edge and pass `now` down; feed
//! failures surface as 502 with the engine's error message.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::engine::Engine;
use crate::present;
use crate::profile::{find_by_name, find_by_uuid, AvatarProfile};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The profiling engine, cache included.
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/hud/scan", post(hud_scan_handler))
        .route("/profile/lookup", post(profile_lookup_handler))
        .route("/room/vibe", post(room_vibe_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn epoch_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

fn feed_error(e: crate::error::EngineError) -> (StatusCode, Json<Value>) {
    tracing::warn!(error = %e, "profiles feed refresh failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({"error": e.to_string()})),
    )
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "vibescan",
    }))
}

#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    uuid: Option<String>,
}

/// POST /hud/scan — the HUD's main refresh: room vibe, the requester's own
/// card, and the nearby list, joined into one text blob.
async fn hud_scan_handler(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let profiles = state
        .engine
        .profiles(epoch_now())
        .await
        .map_err(feed_error)?;

    let uuid = request.uuid.as_deref().unwrap_or("");
    let me = find_by_uuid(&profiles, uuid);
    let nearby: Vec<&AvatarProfile> = profiles
        .iter()
        .filter(|p| p.avatar_uuid != uuid)
        .collect();

    let mut room_scope = nearby.clone();
    if let Some(me) = me {
        room_scope.push(me);
    }

    let text = [
        present::room_vibe(&room_scope),
        present::profile_card(me),
        present::nearby_list(&nearby),
        "ℹ Detail improves as more residents participate.".to_string(),
    ]
    .join("\n\n");

    Ok(Json(serde_json::json!({ "text": text })))
}

#[derive(Debug, Deserialize)]
struct LookupRequest {
    #[serde(default)]
    name: Option<String>,
}

/// POST /profile/lookup — card for a named avatar. Missing `name` is a 400;
/// an unknown name is a plain 404, not a failure.
async fn profile_lookup_handler(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let name = request.name.as_deref().filter(|n| !n.is_empty()).ok_or((
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "missing name"})),
    ))?;

    let profiles = state
        .engine
        .profiles(epoch_now())
        .await
        .map_err(feed_error)?;

    let profile = find_by_name(&profiles, name).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("no profile for '{}'", name)})),
        )
    })?;

    Ok(Json(serde_json::json!({
        "text": present::lookup_card(profile),
        "profile": profile,
    })))
}

/// POST /room/vibe — room energy text on its own.
async fn room_vibe_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let profiles = state
        .engine
        .profiles(epoch_now())
        .await
        .map_err(feed_error)?;

    let refs: Vec<&AvatarProfile> = profiles.iter().collect();
    Ok(Json(serde_json::json!({ "text": present::room_vibe(&refs) })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::engine::{EngineConfig, FeedSource};
    use crate::error::EngineError;
    use crate::row::RawRow;

    struct StaticFeed(Vec<RawRow>);

    #[async_trait]
    impl FeedSource for StaticFeed {
        async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError> {
            Ok(self.0.clone())
        }
    }

    struct DownFeed;

    #[async_trait]
    impl FeedSource for DownFeed {
        async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError> {
            Err(EngineError::malformed("feed offline"))
        }
    }

    fn state_with_rows(rows: Vec<RawRow>) -> AppState {
        let engine = Engine::new(EngineConfig::default(), Arc::new(StaticFeed(rows)));
        AppState::new(Arc::new(engine))
    }

    fn fixture_rows() -> Vec<RawRow> {
        let now = chrono::Utc::now().timestamp() as f64;
        vec![
            RawRow::new("a1", "Aria Quell", now, 6, "hi hey welcome lol"),
            RawRow::new("b2", "Bex", now, 4, "why how what anyone"),
        ]
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_router(state_with_rows(vec![]));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "vibescan");
    }

    #[tokio::test]
    async fn test_hud_scan_blob_has_all_sections() {
        let app = app_router(state_with_rows(fixture_rows()));
        let (status, json) =
            post_json(app, "/hud/scan", serde_json::json!({"uuid": "a1"})).await;
        assert_eq!(status, StatusCode::OK);

        let text = json["text"].as_str().unwrap();
        assert!(text.contains("ROOM VIBE"));
        assert!(text.contains("Name: Aria Quell"));
        assert!(text.contains("• Bex"));
        assert!(!text.contains("• Aria Quell"), "self must not appear nearby");
    }

    #[tokio::test]
    async fn test_hud_scan_unknown_uuid_still_scans_room() {
        let app = app_router(state_with_rows(fixture_rows()));
        let (status, json) =
            post_json(app, "/hud/scan", serde_json::json!({"uuid": "zz"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["text"].as_str().unwrap().contains("No data yet."));
    }

    #[tokio::test]
    async fn test_lookup_requires_name() {
        let app = app_router(state_with_rows(fixture_rows()));
        let (status, json) = post_json(app, "/profile/lookup", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "missing name");
    }

    #[tokio::test]
    async fn test_lookup_unknown_name_is_404() {
        let app = app_router(state_with_rows(fixture_rows()));
        let (status, json) =
            post_json(app, "/profile/lookup", serde_json::json!({"name": "Ghost"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("Ghost"));
    }

    #[tokio::test]
    async fn test_lookup_known_name_returns_card_and_profile() {
        let app = app_router(state_with_rows(fixture_rows()));
        let (status, json) =
            post_json(app, "/profile/lookup", serde_json::json!({"name": "bex"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["text"].as_str().unwrap().contains("📊 Bex"));
        assert_eq!(json["profile"]["avatar_uuid"], "b2");
    }

    #[tokio::test]
    async fn test_feed_failure_surfaces_as_502() {
        let engine = Engine::new(EngineConfig::default(), Arc::new(DownFeed));
        let app = app_router(AppState::new(Arc::new(engine)));
        let (status, json) = post_json(app, "/room/vibe", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().contains("feed offline"));
    }
}
