use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::post_repository::PostFilter;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostStatus, PostType};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 2200))]
    #[schema(example = "Sunset over the bay, warm tones")]
    pub(crate) text_prompt: String,
    /// `photo` или `reel`.
    #[schema(example = "photo")]
    pub(crate) post_type: String,
    /// RFC 3339 или `YYYY-MM-DDTHH:MM` (UTC).
    #[serde(default)]
    #[schema(example = "2026-10-20T18:30")]
    pub(crate) scheduled_time: Option<String>,
    /// `not_ready` (по умолчанию) или `ready`.
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct ListPostsQuery {
    pub(crate) status: Option<String>,
    pub(crate) post_type: Option<String>,
}

impl ListPostsQuery {
    fn into_filter(self) -> Result<PostFilter, DomainError> {
        Ok(PostFilter {
            status: parse_optional::<PostStatus>(self.status)?,
            post_type: parse_optional::<PostType>(self.post_type)?,
        })
    }
}

fn parse_optional<T>(raw: Option<String>) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| value.parse())
        .transpose()
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) text_prompt: String,
    #[schema(example = "photo")]
    pub(crate) post_type: String,
    #[schema(example = "not_ready")]
    pub(crate) status: String,
    pub(crate) ai_caption: Option<String>,
    pub(crate) image_url: Option<Vec<String>>,
    pub(crate) video_url: Option<String>,
    pub(crate) instagram_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) post: PostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text_prompt: post.text_prompt,
            post_type: post.post_type.to_string(),
            status: post.status.to_string(),
            ai_caption: post.ai_caption,
            image_url: post.image_url,
            video_url: post.video_url,
            instagram_url: post.instagram_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            scheduled_time: post.scheduled_time,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("status" = Option<String>, Query, description = "not_ready | ready | published | failed"),
        ("post_type" = Option<String>, Query, description = "photo | reel")
    ),
    responses(
        (status = 200, description = "Posts listed in creation order", body = ListPostsResponseDto),
        (status = 400, description = "Unknown filter value"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let posts = state.post_service.list_posts(filter).await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostResponseDto),
        (status = 400, description = "Validation error"),
        (status = 413, description = "Body too large"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreatePostRequest {
        text_prompt: dto.text_prompt,
        post_type: dto.post_type,
        scheduled_time: dto.scheduled_time,
        status: dto.status,
    };

    let post = state.post_service.create_post(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponseDto {
            post: PostDto::from(post),
        }),
    ))
}
