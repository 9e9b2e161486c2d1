//! # Menu Server
//!
//! HTTP facade over the local menu store, consumed by the app screens.
//!
//! ## Routes
//! - `GET /menu?q=<filter>&category=<c>` — search the cached menu. The first
//!   request of the session kicks off the one-shot synchronization against
//!   the remote source; sync failures are absorbed here and the response is
//!   whatever the store holds.
//! - `GET /menu/{id}` — single dish for the detail screen.
//! - `POST /register` — validate and store the onboarding profile, turning
//!   the logged-in flag on.
//! - `GET /profile` — the registered profile, 401 when logged out.
//! - `POST /logout` — clear the logged-in flag.
//!
//! ## Configuration
//!
//! Environment variables, each with a logged default: `RUST_PORT`,
//! `MENU_URL`, `MENU_DATA_DIR`.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use routes::{dish_handler, logout_handler, menu_handler, profile_handler, register_handler};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/menu", get(menu_handler))
        .route("/menu/{id}", get(dish_handler))
        .route("/register", post(register_handler))
        .route("/profile", get(profile_handler))
        .route("/logout", post(logout_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
