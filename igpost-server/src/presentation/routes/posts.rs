use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{create_post, list_posts};

/// `/posts/`, `/posts/create/` и `/api/posts/create/` - старые пути дашборда,
/// ведут в те же хендлеры.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/posts/", get(list_posts))
        .route("/posts/create/", post(create_post))
        .route("/api/posts/create/", post(create_post))
}
