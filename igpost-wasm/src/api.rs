use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use igpost_core::{
    ApiError, ApiOperation, CarouselApi, CarouselPost, ErrorBody, FailureCause, ListFilters,
    NewCarouselPost, NewPost, Post, PostEnvelope, PostListEnvelope, PostsApi,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("IGPOST_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8000",
};

const POSTS_PATH: &str = "/api/posts";
const CAROUSEL_PATH: &str = "/api/carousel/posts/";

#[derive(Debug, Deserialize)]
struct CarouselResponseDto {
    post: CarouselPost,
}

/// Реализация API поверх `fetch` браузера.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GlooApi;

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn send(request: RequestBuilder, operation: ApiOperation) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|err| ApiError::network(operation, &err.to_string()))
}

async fn decode_error(response: Response, operation: ApiOperation) -> ApiError {
    let text = response.text().await.ok();
    let parsed = text.as_deref().and_then(ErrorBody::parse);
    ApiError::server(operation, response.status(), parsed.as_ref())
}

async fn decode_json<T: DeserializeOwned>(
    response: Response,
    operation: ApiOperation,
) -> Result<T, ApiError> {
    let status = response.status();
    response.json::<T>().await.map_err(|_| {
        ApiError::new(
            operation,
            FailureCause::Format { status },
            operation.fallback_message(),
        )
    })
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get("content-type")
        .is_some_and(|value| value.contains("application/json"))
}

#[async_trait(?Send)]
impl PostsApi for GlooApi {
    async fn list_posts(&self, filters: &ListFilters) -> Result<Vec<Post>, ApiError> {
        let operation = ApiOperation::ListPosts;
        let mut query = Vec::new();
        if let Some(status) = filters.status {
            query.push(("status", status.as_str()));
        }
        if let Some(post_type) = filters.post_type {
            query.push(("post_type", post_type.as_str()));
        }

        let response = send(Request::get(&endpoint(POSTS_PATH)).query(query), operation).await?;
        if !response.ok() {
            return Err(decode_error(response, operation).await);
        }
        let listed: PostListEnvelope = decode_json(response, operation).await?;
        Ok(listed.into_posts())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let operation = ApiOperation::CreatePost;
        let request = Request::post(&endpoint(POSTS_PATH))
            .json(post)
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;
        if !response.ok() {
            return Err(decode_error(response, operation).await);
        }
        let created: PostEnvelope = decode_json(response, operation).await?;
        Ok(created.into_post())
    }
}

#[async_trait(?Send)]
impl CarouselApi for GlooApi {
    async fn create_carousel_post(
        &self,
        post: &NewCarouselPost,
    ) -> Result<CarouselPost, ApiError> {
        let operation = ApiOperation::CreateCarousel;
        let request = Request::post(&endpoint(CAROUSEL_PATH))
            .json(post)
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;

        // HTML вместо JSON (прокси, 502) проверяется раньше статуса
        if !is_json(&response) {
            return Err(ApiError::format(
                operation,
                response.status(),
                &response.status_text(),
            ));
        }
        if !response.ok() {
            return Err(decode_error(response, operation).await);
        }
        let dto: CarouselResponseDto = decode_json(response, operation).await?;
        Ok(dto.post)
    }
}
