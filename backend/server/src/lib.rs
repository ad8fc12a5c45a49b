//! File-backed API for the boba shop.
//!
//! Serves the menu and customization catalog out of flat JSON files and
//! appends submitted reviews and orders to their own files.
//!
//!
//!
//! # Routes
//!
//! | method | path | reply |
//! |--------|------|-------|
//! | GET | `/menu`, `/products` | object keyed by category |
//! | GET | `/menu/{category}`, `/products/{category}` | items of one category, or 400 with a plain-text body |
//! | GET | `/customizations` | ice levels, sugar levels, toppings |
//! | POST | `/reviews` | `{name, rating, message}` → 201 |
//! | POST | `/cart` | array of line items → 201 |
//!
//! Anything else falls through to the static files in `PUBLIC_DIR`.
//!
//!
//!
//! # Setup
//!
//! Environment:
//! - `RUST_PORT`: listen port, default `8000`
//! - `DATA_DIR`: directory holding the JSON files, default `data`
//! - `PUBLIC_DIR`: static front end, default `public`
//! - `RUST_LOG`: tracing filter, e.g. `info`
//!
//! Run.
//! ```sh
//! RUST_LOG=info cargo run -p server
//! ```
//!
//! Log every stored payload.
//! ```sh
//! cargo run -p server --features verbose
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use error::AppError;
use routes::{
    category_handler, customizations_handler, menu_handler, orders_handler, reviews_handler,
};
pub use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let statics = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/menu", get(menu_handler))
        .route("/products", get(menu_handler))
        .route("/menu/{category}", get(category_handler))
        .route("/products/{category}", get(category_handler))
        .route("/customizations", get(customizations_handler))
        .route("/reviews", post(reviews_handler))
        .route("/cart", post(orders_handler))
        .fallback_service(statics)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load()?;
    let state = AppState::new(config);

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Listening {address}...");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
