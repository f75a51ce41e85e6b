use std::sync::Arc;

use tracing::info;

use crate::data::post_repository::{
    CarouselRepository, NewCarousel, NewPost, PostFilter, PostRepository,
};
use crate::domain::carousel::{CarouselPost, CreateCarouselRequest};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post};

pub(crate) struct PostService<R>
where
    R: PostRepository + CarouselRepository,
{
    repo: Arc<R>,
}

impl<R> PostService<R>
where
    R: PostRepository + CarouselRepository,
{
    pub(crate) fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            text_prompt: req.text_prompt,
            post_type: req.post_type,
            status: req.status,
            scheduled_time: req.scheduled_time,
        };
        let post = self.repo.append(new_post).await?;
        info!(
            post_id = post.id,
            post_type = %post.post_type,
            status = %post.status,
            "post created"
        );
        Ok(post)
    }

    pub(crate) async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        self.repo.list(filter).await
    }

    pub(crate) async fn create_carousel(
        &self,
        req: CreateCarouselRequest,
    ) -> Result<CarouselPost, DomainError> {
        let req = req.validate()?;

        let carousel = self
            .repo
            .append_carousel(NewCarousel {
                text_prompt: req.text_prompt,
                number_of_images: req.number_of_images,
                status: req.status,
            })
            .await?;
        info!(
            post_id = carousel.id,
            images = carousel.number_of_images,
            "carousel post created"
        );
        Ok(carousel)
    }

    pub(crate) async fn list_carousels(&self) -> Result<Vec<CarouselPost>, DomainError> {
        self.repo.list_carousels().await
    }
}
