use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::AppState;
use super::app_error::AppError;

pub(crate) mod carousel;
pub(crate) mod posts;

/// Все HTTP-маршруты сервиса со связанным состоянием.
pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(posts::router())
        .merge(carousel::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

#[derive(Debug, Serialize)]
struct Healthz {
    status: &'static str,
}

async fn healthz() -> Json<Healthz> {
    Json(Healthz { status: "ok" })
}
