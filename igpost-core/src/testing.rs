use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::api::PostsApi;
use crate::error::ApiError;
use crate::models::{ListFilters, NewPost, Post, PostId, PostStatus, PostType};

/// Сервер в памяти: созданные посты сразу видны в списке.
#[derive(Default)]
pub(crate) struct FakeApi {
    stored: Mutex<Vec<Post>>,
    create_failure: Mutex<Option<ApiError>>,
    list_failure: Mutex<Option<ApiError>>,
    received: Mutex<Vec<NewPost>>,
    last_filters: Mutex<Option<ListFilters>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub(crate) fn with_stored(posts: Vec<Post>) -> Self {
        let api = Self::default();
        *api.stored.lock().expect("stored mutex poisoned") = posts;
        api
    }

    pub(crate) fn fail_create(&self, err: ApiError) {
        *self
            .create_failure
            .lock()
            .expect("create_failure mutex poisoned") = Some(err);
    }

    pub(crate) fn fail_list(&self, err: ApiError) {
        *self.list_failure.lock().expect("list_failure mutex poisoned") = Some(err);
    }

    pub(crate) fn received(&self) -> Vec<NewPost> {
        self.received.lock().expect("received mutex poisoned").clone()
    }

    pub(crate) fn last_filters(&self) -> Option<ListFilters> {
        self.last_filters
            .lock()
            .expect("last_filters mutex poisoned")
            .clone()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait(?Send)]
impl PostsApi for FakeApi {
    async fn list_posts(&self, filters: &ListFilters) -> Result<Vec<Post>, ApiError> {
        self.calls.lock().expect("calls mutex poisoned").push("list");
        *self.last_filters.lock().expect("last_filters mutex poisoned") = Some(filters.clone());

        if let Some(err) = self
            .list_failure
            .lock()
            .expect("list_failure mutex poisoned")
            .clone()
        {
            return Err(err);
        }

        Ok(self
            .stored
            .lock()
            .expect("stored mutex poisoned")
            .iter()
            .filter(|post| filters.status.is_none_or(|status| post.status == status))
            .filter(|post| filters.post_type.is_none_or(|kind| post.post_type == kind))
            .cloned()
            .collect())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.calls.lock().expect("calls mutex poisoned").push("create");
        self.received
            .lock()
            .expect("received mutex poisoned")
            .push(post.clone());

        if let Some(err) = self
            .create_failure
            .lock()
            .expect("create_failure mutex poisoned")
            .clone()
        {
            return Err(err);
        }

        let mut stored = self.stored.lock().expect("stored mutex poisoned");
        let mut created = sample_post(&(stored.len() + 1).to_string(), &post.text_prompt);
        created.post_type = post.post_type;
        stored.push(created.clone());
        Ok(created)
    }
}

pub(crate) fn sample_post(id: &str, text_prompt: &str) -> Post {
    let at = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 5, 0)
        .single()
        .expect("valid timestamp");
    Post {
        id: PostId::new(id),
        text_prompt: text_prompt.to_string(),
        post_type: PostType::Photo,
        status: PostStatus::NotReady,
        ai_caption: None,
        image_url: None,
        video_url: None,
        instagram_url: None,
        created_at: Some(at),
        updated_at: Some(at),
        scheduled_time: None,
    }
}
