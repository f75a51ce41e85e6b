//! Ядро клиента igpost: модели, валидация черновика и сценарий отправки поста.
//!
//! Крейт не зависит от транспорта. Сетевой слой подключается через трейты
//! [`PostsApi`] и [`CarouselApi`]:
//! - `igpost-client` реализует их поверх `reqwest`;
//! - `igpost-wasm` реализует их поверх `gloo-net` в браузере.
//!
//! Основной сценарий: [`SubmissionFlow`]: провалидировать черновик, создать
//! пост, перечитать список. Ошибка создания оставляет черновик нетронутым,
//! успех его очищает.
#![warn(missing_docs)]

mod api;
mod error;
mod form;
mod models;
mod post_list;
mod submission;
mod validation;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{CarouselApi, PostsApi};
pub use error::{ApiError, ApiOperation, ErrorBody, FailureCause, extract_message};
pub use form::{Draft, DraftField, FieldErrors, FormState};
pub use models::{
    CarouselPost, CarouselStatus, ImageCount, ListFilters, NewCarouselPost, NewPost,
    ParseValueError, Post, PostEnvelope, PostId, PostListEnvelope, PostStatus, PostType,
};
pub use post_list::PostListStore;
pub use submission::{Notification, NotificationKind, SubmissionFlow, SubmitOutcome, SubmitPhase};
pub use validation::{CarouselDraft, ValidationError, validate, validate_carousel, validated};
