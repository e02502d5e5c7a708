//! Liveness probe.
//!
//! The guarded variants share this handler; the router puts a different
//! guard in front of each one.

/// GET /api/v1/heartbeat
pub async fn heartbeat() -> &'static str {
    "OK"
}
