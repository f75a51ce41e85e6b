use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::carousel::{CarouselPost, CarouselStatus, CreateCarouselRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCarouselDto {
    #[validate(length(min = 1, max = 2200))]
    pub(crate) text_prompt: String,
    #[validate(range(min = 5, max = 7))]
    #[schema(minimum = 5, maximum = 7, example = 5)]
    pub(crate) number_of_images: u8,
    #[schema(example = "Not Ready")]
    pub(crate) status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CarouselPostDto {
    pub(crate) id: i64,
    pub(crate) text_prompt: String,
    pub(crate) number_of_images: u8,
    #[schema(example = "Ready")]
    pub(crate) status: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CarouselResponseDto {
    pub(crate) post: CarouselPostDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListCarouselsResponseDto {
    pub(crate) posts: Vec<CarouselPostDto>,
}

impl From<CarouselPost> for CarouselPostDto {
    fn from(post: CarouselPost) -> Self {
        Self {
            id: post.id,
            text_prompt: post.text_prompt,
            number_of_images: post.number_of_images,
            status: post.status.as_str().to_string(),
            created_at: post.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/carousel/posts/",
    tag = "carousel",
    responses(
        (status = 200, description = "Carousel posts listed", body = ListCarouselsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_carousels(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListCarouselsResponseDto>)> {
    let posts = state.post_service.list_carousels().await?;
    Ok((
        StatusCode::OK,
        Json(ListCarouselsResponseDto {
            posts: posts.into_iter().map(CarouselPostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/carousel/posts/",
    tag = "carousel",
    request_body = CreateCarouselDto,
    responses(
        (status = 201, description = "Carousel post created", body = CarouselResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_carousel(
    State(state): State<AppState>,
    payload: Result<Json<CreateCarouselDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CarouselResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreateCarouselRequest {
        text_prompt: dto.text_prompt,
        number_of_images: dto.number_of_images,
        status: dto.status.parse::<CarouselStatus>()?,
    };

    let post = state.post_service.create_carousel(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CarouselResponseDto {
            post: CarouselPostDto::from(post),
        }),
    ))
}
