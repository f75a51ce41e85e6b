//! HTTP-клиент для demo API постов Instagram.
//!
//! [`HttpClient`] реализует трейты [`PostsApi`] и [`CarouselApi`] из
//! `igpost-core` поверх `reqwest`, поэтому его можно передать прямо в
//! [`SubmissionFlow::submit`].
//!
//! Типы ядра реэкспортируются, чтобы потребителю хватало одной зависимости.
#![warn(missing_docs)]

mod error;
mod http_client;

pub use error::{ClientError, ClientResult};
pub use http_client::{ClientConfig, DEFAULT_BASE_URL, HttpClient};
pub use igpost_core::*;
