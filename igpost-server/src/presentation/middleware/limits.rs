use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tracing::error;

use crate::infrastructure::settings::Settings;
use crate::presentation::app_error::error_response;

/// Лимиты на тело запроса, число одновременных запросов и время ответа.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                ))),
        )
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        return error_response(StatusCode::REQUEST_TIMEOUT, "request timed out");
    }
    error!(error = %err, "middleware failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
