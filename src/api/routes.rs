//! Query API handlers
//!
//! The `/api/v1` surface is read-only and bearer-token protected; the two
//! account routes are open. All responses are JSON.

use crate::api::auth::{bearer_token, hash_password, issue_token, verify_token};
use crate::api::AppState;
use crate::catalog::ItemRecord;
use crate::storage::{CatalogStore, PersistenceError, UpsertOutcome};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

/// Handler-level failures mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound,
    UserExists,
    BadCredentials,
    Store(PersistenceError),
}

impl From<PersistenceError> for ApiError {
    fn from(e: PersistenceError) -> Self {
        Self::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "missing or invalid bearer token"),
            Self::NotFound => (StatusCode::NOT_FOUND, "not found"),
            Self::UserExists => (StatusCode::BAD_REQUEST, "user already exists"),
            Self::BadCredentials => (StatusCode::BAD_REQUEST, "invalid username or password"),
            Self::Store(e) => {
                tracing::error!("storage failure in query API: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub title: Option<String>,
}

fn require_auth(state: &AppState, headers: &HeaderMap) -> Result<i64, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    verify_token(&state.token_secret, token).ok_or(ApiError::Unauthorized)
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadCredentials);
    }

    let mut store = state.store.lock().unwrap();
    match store.create_user(&body.username, &hash_password(&body.password))? {
        UpsertOutcome::Inserted => {
            tracing::info!("registered user {:?}", body.username);
            Ok((StatusCode::CREATED, Json(json!({ "status": "created" }))))
        }
        UpsertOutcome::Skipped => Err(ApiError::UserExists),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let user = {
        let store = state.store.lock().unwrap();
        store.get_user(&body.username)?
    };

    let user = user.ok_or(ApiError::BadCredentials)?;
    if user.password_hash != hash_password(&body.password) {
        return Err(ApiError::BadCredentials);
    }

    let token = issue_token(&state.token_secret, user.id);
    Ok((StatusCode::CREATED, Json(json!({ "token": token }))))
}

pub async fn list_books(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ItemRecord>>, ApiError> {
    require_auth(&state, &headers)?;

    let store = state.store.lock().unwrap();
    Ok(Json(store.list_items()?))
}

pub async fn get_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ItemRecord>, ApiError> {
    require_auth(&state, &headers)?;

    let item = {
        let store = state.store.lock().unwrap();
        store.get_item(id)?
    };

    item.map(Json).ok_or(ApiError::NotFound)
}

pub async fn search_books(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ItemRecord>>, ApiError> {
    require_auth(&state, &headers)?;

    let store = state.store.lock().unwrap();
    let items = store.search_items(params.category.as_deref(), params.title.as_deref())?;
    Ok(Json(items))
}

pub async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ApiError> {
    require_auth(&state, &headers)?;

    let store = state.store.lock().unwrap();
    Ok(Json(store.list_categories()?))
}
