use std::time::Duration;

use async_trait::async_trait;
use igpost_core::{
    ApiError, ApiOperation, CarouselApi, CarouselPost, ErrorBody, FailureCause, ListFilters,
    NewCarouselPost, NewPost, Post, PostEnvelope, PostListEnvelope, PostsApi,
};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Адрес демо-сервера по умолчанию.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const POSTS_PATH: &str = "/api/posts";
const CAROUSEL_PATH: &str = "/api/carousel/posts/";

#[derive(Debug, Deserialize)]
struct CarouselResponseDto {
    post: CarouselPost,
}

#[derive(Debug, Clone)]
/// Настройки HTTP-клиента.
///
/// Таймауты по умолчанию не заданы: клиент полагается на поведение транспорта.
pub struct ClientConfig {
    /// Базовый URL сервера, например `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Option<Duration>,
    /// Таймаут всего запроса.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Настройки без таймаутов.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: None,
            request_timeout: None,
        }
    }

    /// Задаёт таймаут соединения.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Задаёт таймаут запроса.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `igpost-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL и настройками по умолчанию.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Создаёт клиент по настройкам.
    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim().to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{base_url}: {err}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: Response, operation: ApiOperation) -> ApiError {
        let status = response.status();
        let body = response.text().await.ok();
        let parsed = body.as_deref().and_then(ErrorBody::parse);
        debug!(%status, ?operation, "server returned error response");
        ApiError::server(operation, status.as_u16(), parsed.as_ref())
    }

    /// отправляет запрос и отсекает не-2xx ответы
    async fn send(&self, request: RequestBuilder, operation: ApiOperation) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response, operation).await);
        }
        Ok(response)
    }

    async fn decode_json<T>(response: Response, operation: ApiOperation) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|err| {
            debug!(error = %err, ?operation, "unexpected response shape");
            ApiError::new(
                operation,
                FailureCause::Format { status },
                operation.fallback_message(),
            )
        })
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

#[async_trait(?Send)]
impl PostsApi for HttpClient {
    async fn list_posts(&self, filters: &ListFilters) -> Result<Vec<Post>, ApiError> {
        let operation = ApiOperation::ListPosts;
        let request = self.client.get(self.endpoint(POSTS_PATH)).query(filters);

        let response = self.send(request, operation).await?;
        let listed: PostListEnvelope = Self::decode_json(response, operation).await?;
        Ok(listed.into_posts())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let operation = ApiOperation::CreatePost;
        let request = self.client.post(self.endpoint(POSTS_PATH)).json(post);

        let response = self.send(request, operation).await?;
        let created: PostEnvelope = Self::decode_json(response, operation).await?;
        Ok(created.into_post())
    }
}

#[async_trait(?Send)]
impl CarouselApi for HttpClient {
    async fn create_carousel_post(
        &self,
        post: &NewCarouselPost,
    ) -> Result<CarouselPost, ApiError> {
        let operation = ApiOperation::CreateCarousel;
        let response = self
            .client
            .post(self.endpoint(CAROUSEL_PATH))
            .json(post)
            .send()
            .await
            .map_err(|err| ApiError::network(operation, &err.to_string()))?;

        // тип ответа проверяется раньше статуса: HTML-страница ошибки считается Format
        let status = response.status();
        if !is_json(&response) {
            return Err(ApiError::format(
                operation,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        if !status.is_success() {
            return Err(Self::decode_error(response, operation).await);
        }

        let dto: CarouselResponseDto = Self::decode_json(response, operation).await?;
        Ok(dto.post)
    }
}
