//! Operational HTTP endpoints.
//!
//! - `/healthz`     : liveness
//! - `/debug/vars`  : JSON snapshot of every exported variable (path is
//!   configurable)

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn debug_vars(State(state): State<AppState>) -> Response {
    state.record_request();
    let body = expvar_core::render(state.bucket());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
