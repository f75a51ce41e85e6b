use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::carousel::{CarouselPost, CarouselStatus};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostStatus, PostType};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) text_prompt: String,
    pub(crate) post_type: PostType,
    pub(crate) status: PostStatus,
    pub(crate) scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewCarousel {
    pub(crate) text_prompt: String,
    pub(crate) number_of_images: u8,
    pub(crate) status: CarouselStatus,
}

/// Фильтр выборки: `None` в поле означает "любой".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PostFilter {
    pub(crate) status: Option<PostStatus>,
    pub(crate) post_type: Option<PostType>,
}

impl PostFilter {
    pub(crate) fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|status| post.status == status)
            && self.post_type.is_none_or(|post_type| post.post_type == post_type)
    }
}

/// Хранилище постов. Записи только добавляются; порядок выдачи совпадает с
/// порядком создания.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError>;
    async fn append(&self, input: NewPost) -> Result<Post, DomainError>;
}

#[async_trait]
pub(crate) trait CarouselRepository: Send + Sync {
    async fn list_carousels(&self) -> Result<Vec<CarouselPost>, DomainError>;
    async fn append_carousel(&self, input: NewCarousel) -> Result<CarouselPost, DomainError>;
}
