use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{CarouselPost, ListFilters, NewCarouselPost, NewPost, Post};

/// Операции с постами, на которые опирается сценарий отправки.
///
/// Реализации есть для `reqwest` (`igpost-client`) и `gloo-net` (`igpost-wasm`).
/// Фьючерсы не обязаны быть `Send`: в браузере всё исполняется в одном потоке.
#[async_trait(?Send)]
pub trait PostsApi {
    /// Возвращает посты в порядке, заданном сервером.
    async fn list_posts(&self, filters: &ListFilters) -> Result<Vec<Post>, ApiError>;

    /// Создаёт пост и возвращает его в том виде, в каком его сохранил сервер.
    ///
    /// Повтор после ошибки может создать дубликат.
    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError>;
}

/// Отдельный сценарий создания карусели.
#[async_trait(?Send)]
pub trait CarouselApi {
    /// Создаёт карусель. Ответ не в JSON считается ошибкой формата.
    async fn create_carousel_post(&self, post: &NewCarouselPost)
    -> Result<CarouselPost, ApiError>;
}
