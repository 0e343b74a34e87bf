//! expvar server
//!
//! Serves the process registry as JSON at `/debug/vars` (configurable), with a
//! `/healthz` liveness probe. Config path comes from `EXPVAR_CONFIG`, default
//! `expvar.yaml`.

use tracing_subscriber::{fmt, EnvFilter};

use expvar_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg
        .server
        .listen_addr()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("registry wiring failed");
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "expvar-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
