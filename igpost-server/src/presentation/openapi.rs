use utoipa::OpenApi;

use crate::presentation::handlers::carousel::{
    CarouselPostDto, CarouselResponseDto, CreateCarouselDto, ListCarouselsResponseDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, ListPostsQuery, ListPostsResponseDto, PostDto, PostResponseDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::carousel::list_carousels,
        crate::presentation::handlers::carousel::create_carousel
    ),
    components(
        schemas(
            CreatePostDto,
            ListPostsQuery,
            PostDto,
            PostResponseDto,
            ListPostsResponseDto,
            CreateCarouselDto,
            CarouselPostDto,
            CarouselResponseDto,
            ListCarouselsResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Photo and reel posts"),
        (name = "carousel", description = "Carousel posts")
    )
)]
pub(crate) struct ApiDoc;
