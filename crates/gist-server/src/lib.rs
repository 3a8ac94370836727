//! Gist HTTP API server (Axum).
//!
//! `POST /api/v1/salience` computes the salience export of a paragraph;
//! `GET /health` reports liveness and uptime.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use gist_engine::ParagraphEngine;
use state::AppState;

/// Build the application router around an engine.
pub fn app(engine: ParagraphEngine) -> Router {
    app_with_state(AppState::new(engine))
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::salience_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
