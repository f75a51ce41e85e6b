use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки построения HTTP-клиента.
///
/// Ошибки самих запросов описывает [`igpost_core::ApiError`].
pub enum ClientError {
    /// Базовый URL не разбирается.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// `reqwest` не смог собрать клиент.
    #[error("http client build error: {0}")]
    Build(#[from] reqwest::Error),
}

/// Результат построения клиента.
pub type ClientResult<T> = Result<T, ClientError>;
