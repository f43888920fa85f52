//! Query service
//!
//! A small axum HTTP API over the persisted catalog: account registration
//! and login, then a bearer-protected read path (list, fetch by id,
//! substring search with OR semantics, distinct categories). The API never
//! writes catalog rows; ingestion is the only writer.

mod auth;
mod routes;

pub use auth::{hash_password, issue_token, verify_token};
pub use routes::{ApiError, Credentials, SearchParams};

use crate::config::ApiConfig;
use crate::storage::SqliteCatalog;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SqliteCatalog>>,
    pub token_secret: Arc<String>,
}

/// Builds the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(routes::register))
        .route("/login", post(routes::login))
        .route("/api/v1/books", get(routes::list_books))
        .route("/api/v1/books/search", get(routes::search_books))
        .route("/api/v1/books/:id", get(routes::get_book))
        .route("/api/v1/categories", get(routes::list_categories))
        .with_state(state)
}

/// Binds the configured address and serves the query API until shutdown.
pub async fn serve(config: &ApiConfig, store: Arc<Mutex<SqliteCatalog>>) -> crate::Result<()> {
    let state = AppState {
        store,
        token_secret: Arc::new(config.token_secret.clone()),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("query API listening on {}", config.bind_address);

    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
