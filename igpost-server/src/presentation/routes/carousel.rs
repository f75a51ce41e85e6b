use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::carousel::{create_carousel, list_carousels};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/api/carousel/posts/",
        get(list_carousels).post(create_carousel),
    )
}
