//! HTTP server for the HUD endpoints.
//!
//! Exposes the profiling engine to in-world HUD attachments over plain
//! JSON-over-POST (the viewer's scripting layer cannot do much more).
//!
//! # Endpoints
//!
//! - `GET  /health`         — Liveness probe
//! - `POST /hud/scan`       — Room vibe + own card + nearby list
//! - `POST /profile/lookup` — Profile card for a named avatar
//! - `POST /room/vibe`      — Room vibe text only

pub mod routes;

pub use routes::{app_router, AppState};
