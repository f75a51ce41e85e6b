use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::limits::apply_limits;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, routes};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::app(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::post_service::PostService;
    use crate::data::repositories::json_log::JsonLogStore;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;
    use crate::presentation::middleware::limits::apply_limits;

    async fn test_app() -> (Router, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonLogStore::open(dir.path().join("posts.jsonl"))
            .await
            .expect("store must open");
        let service = PostService::new(Arc::new(store));
        (build_router(AppState::new(Arc::new(service))), dir)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request must build")
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must be readable")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(&app, get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn created_post_is_listed() {
        let (app, _dir) = test_app().await;

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/posts",
                json!({ "text_prompt": " Hello ", "post_type": "photo", "scheduled_time": null }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["post"]["id"], 1);
        assert_eq!(body["post"]["text_prompt"], "Hello");
        assert_eq!(body["post"]["status"], "not_ready");

        let (status, body) = send(&app, get("/api/posts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["posts"][0]["post_type"], "photo");
    }

    #[tokio::test]
    async fn legacy_aliases_reach_same_handlers() {
        let (app, _dir) = test_app().await;

        let (status, _) = send(
            &app,
            json_request(
                Method::POST,
                "/posts/create/",
                json!({ "text_prompt": "surf", "post_type": "reel", "status": "ready" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            json_request(
                Method::POST,
                "/api/posts/create/",
                json!({ "text_prompt": "waves", "post_type": "reel" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, get("/posts/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"][0]["status"], "ready");
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_route_gets_json_not_found() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(&app, get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "not found" }));
    }

    #[tokio::test]
    async fn list_filters_by_status_and_type() {
        let (app, _dir) = test_app().await;
        for (text, post_type, status) in [
            ("a", "photo", "not_ready"),
            ("b", "reel", "ready"),
            ("c", "photo", "ready"),
        ] {
            let (code, _) = send(
                &app,
                json_request(
                    Method::POST,
                    "/api/posts",
                    json!({ "text_prompt": text, "post_type": post_type, "status": status }),
                ),
            )
            .await;
            assert_eq!(code, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get("/api/posts?status=ready&post_type=photo")).await;
        assert_eq!(status, StatusCode::OK);
        let texts: Vec<_> = body["posts"]
            .as_array()
            .expect("posts array")
            .iter()
            .map(|post| post["text_prompt"].clone())
            .collect();
        assert_eq!(texts, vec![json!("c")]);
    }

    #[tokio::test]
    async fn unknown_filter_value_is_bad_request() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(&app, get("/api/posts?status=archived")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("status")));
    }

    #[tokio::test]
    async fn validation_failures_are_400_with_error_body() {
        let (app, _dir) = test_app().await;

        for payload in [
            json!({ "text_prompt": "   ", "post_type": "photo" }),
            json!({ "text_prompt": "ok", "post_type": "story" }),
            json!({ "text_prompt": "ok", "post_type": "photo", "scheduled_time": "soon" }),
            json!({ "text_prompt": "ok", "post_type": "photo", "status": "published" }),
            json!({ "text_prompt": "ok" }),
            json!({ "text_prompt": 5, "post_type": "photo" }),
        ] {
            let (status, body) =
                send(&app, json_request(Method::POST, "/api/posts", payload.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert!(body["error"].is_string(), "payload: {payload}");
        }

        for payload in [
            json!({ "text_prompt": "city", "number_of_images": 300, "status": "Ready" }),
            json!({ "text_prompt": "city", "status": "Ready" }),
        ] {
            let (status, body) = send(
                &app,
                json_request(Method::POST, "/api/carousel/posts/", payload.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert!(body["error"].is_string(), "payload: {payload}");
        }

        let (_, body) = send(&app, get("/api/posts")).await;
        assert_eq!(body["posts"], json!([]));
    }

    #[tokio::test]
    async fn malformed_json_gets_error_body() {
        let (app, _dir) = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request must build");

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn carousel_is_created_and_listed() {
        let (app, _dir) = test_app().await;

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/carousel/posts/",
                json!({ "text_prompt": "city", "number_of_images": 6, "status": "Not Ready" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["post"]["number_of_images"], 6);
        assert_eq!(body["post"]["status"], "Not Ready");

        let (status, body) = send(&app, get("/api/carousel/posts/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn carousel_with_too_many_images_is_rejected() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/carousel/posts/",
                json!({ "text_prompt": "city", "number_of_images": 9, "status": "Ready" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let (app, _dir) = test_app().await;
        let settings = Settings {
            http_addr: "127.0.0.1:0".to_string(),
            store_path: PathBuf::from("unused"),
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 64,
            http_concurrency_limit: 4,
            http_request_timeout_secs: 5,
        };
        let app = apply_limits(app, &settings);

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/posts",
                json!({ "text_prompt": "x".repeat(256), "post_type": "photo" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_keeps_unsupported_media_type() {
        let (app, _dir) = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/posts")
            .body(Body::from(r#"{"text_prompt":"ok","post_type":"photo"}"#))
            .expect("request must build");

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn openapi_document_lists_post_routes() {
        let (app, _dir) = test_app().await;
        let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/posts"].is_object());
        assert!(body["paths"]["/api/carousel/posts/"].is_object());
    }
}
