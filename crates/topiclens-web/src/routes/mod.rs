//! Route handlers.

pub mod demo;
pub mod generate;

/// GET /health - liveness check.
pub async fn health() -> &'static str {
    "ok"
}
