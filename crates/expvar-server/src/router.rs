//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let vars_path = state.cfg().server.vars_path.clone();
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route(&vars_path, get(ops::debug_vars))
        .with_state(state)
}
