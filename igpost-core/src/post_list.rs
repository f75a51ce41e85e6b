use tracing::{debug, warn};

use crate::api::PostsApi;
use crate::error::ApiError;
use crate::models::{ListFilters, Post};

#[derive(Debug, Clone, Default, PartialEq)]
/// Последний успешно полученный список постов.
pub struct PostListStore {
    posts: Vec<Post>,
    filters: ListFilters,
}

impl PostListStore {
    /// Пустой список без фильтров.
    pub fn new() -> Self {
        Self::default()
    }

    /// Список, заполненный заранее.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            filters: ListFilters::default(),
        }
    }

    /// Посты в порядке, заданном сервером.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Количество постов.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Пуст ли список.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Фильтры, с которыми выполняется `refresh`.
    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    /// Меняет фильтры. Текущий список не трогается до следующего `refresh`.
    pub fn set_filters(&mut self, filters: ListFilters) {
        self.filters = filters;
    }

    /// Перечитывает список целиком.
    ///
    /// При ошибке прежний список сохраняется, ошибка возвращается вызывающему.
    pub async fn refresh<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: PostsApi + ?Sized,
    {
        let result = api.list_posts(&self.filters).await;
        self.apply(result)
    }

    /// Применяет результат запроса списка, выполненного снаружи.
    pub fn apply(&mut self, result: Result<Vec<Post>, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(posts) => {
                debug!(count = posts.len(), "post list replaced");
                self.posts = posts;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, kept = self.posts.len(), "post list refresh failed");
                Err(err)
            }
        }
    }
}
