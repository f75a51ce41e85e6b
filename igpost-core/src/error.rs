use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Операция API, в которой произошла ошибка.
pub enum ApiOperation {
    /// Чтение списка постов.
    ListPosts,
    /// Создание поста.
    CreatePost,
    /// Создание карусели.
    CreateCarousel,
}

impl ApiOperation {
    /// Сообщение, которое показывается, если ни одно правило извлечения не сработало.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::ListPosts => "Failed to fetch posts",
            Self::CreatePost => "Failed to create post",
            Self::CreateCarousel => "Failed to create carousel post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Причина сбоя запроса.
pub enum FailureCause {
    /// Ответ не получен.
    Network,
    /// Сервер ответил не-2xx статусом.
    Server {
        /// HTTP-статус ответа.
        status: u16,
    },
    /// Ответ получен, но не в ожидаемом JSON-формате.
    Format {
        /// HTTP-статус ответа.
        status: u16,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибка обращения к API постов.
///
/// `Display` отдаёт уже нормализованное сообщение для пользователя.
pub enum ApiError {
    /// Не удалось получить список постов.
    #[error("{message}")]
    Fetch {
        /// Причина сбоя.
        cause: FailureCause,
        /// Сообщение для пользователя.
        message: String,
    },
    /// Не удалось создать пост или карусель.
    #[error("{message}")]
    Create {
        /// Причина сбоя.
        cause: FailureCause,
        /// Сообщение для пользователя.
        message: String,
    },
}

impl ApiError {
    /// Собирает ошибку нужного вида для операции.
    pub fn new(operation: ApiOperation, cause: FailureCause, message: impl Into<String>) -> Self {
        let message = message.into();
        match operation {
            ApiOperation::ListPosts => Self::Fetch { cause, message },
            ApiOperation::CreatePost | ApiOperation::CreateCarousel => {
                Self::Create { cause, message }
            }
        }
    }

    /// Ошибка транспорта: ответа нет, есть только текст ошибки.
    pub fn network(operation: ApiOperation, transport_text: &str) -> Self {
        let message = extract_message(operation, None, Some(transport_text));
        Self::new(operation, FailureCause::Network, message)
    }

    /// Сервер ответил ошибкой; `body` содержит разобранное тело ответа, если это JSON.
    pub fn server(operation: ApiOperation, status: u16, body: Option<&ErrorBody>) -> Self {
        let message = extract_message(operation, body, None);
        Self::new(operation, FailureCause::Server { status }, message)
    }

    /// Ответ не является JSON ожидаемой формы.
    pub fn format(operation: ApiOperation, status: u16, reason: &str) -> Self {
        let reason = reason.trim();
        let message = if reason.is_empty() {
            format!("Server returned non-JSON response ({status})")
        } else {
            format!("Server returned non-JSON response ({status} {reason})")
        };
        Self::new(operation, FailureCause::Format { status }, message)
    }

    /// Сообщение для пользователя.
    pub fn message(&self) -> &str {
        match self {
            Self::Fetch { message, .. } | Self::Create { message, .. } => message,
        }
    }

    /// Причина сбоя.
    pub fn cause(&self) -> FailureCause {
        match self {
            Self::Fetch { cause, .. } | Self::Create { cause, .. } => *cause,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Тело ошибки от сервера. Все поля необязательны.
pub struct ErrorBody {
    /// Поле `message`.
    pub message: Option<String>,
    /// Поле `error`.
    pub error: Option<String>,
    /// Поле `detail`.
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Разбирает тело ответа; `None`, если это не JSON-объект нужной формы.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[derive(Debug, Clone, Copy)]
enum ExtractionRule {
    ServerMessage,
    ServerError,
    ServerDetail,
    TransportText,
}

const EXTRACTION_ORDER: [ExtractionRule; 4] = [
    ExtractionRule::ServerMessage,
    ExtractionRule::ServerError,
    ExtractionRule::ServerDetail,
    ExtractionRule::TransportText,
];

impl ExtractionRule {
    fn pick<'a>(self, body: Option<&'a ErrorBody>, transport: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::ServerMessage => body.and_then(|body| body.message.as_deref()),
            Self::ServerError => body.and_then(|body| body.error.as_deref()),
            Self::ServerDetail => body.and_then(|body| body.detail.as_deref()),
            Self::TransportText => transport,
        }
    }
}

/// Выбирает сообщение для пользователя по правилам в порядке приоритета:
/// `message` сервера, `error` сервера, `detail` сервера, текст ошибки
/// транспорта, общее сообщение операции. Пустые строки пропускаются.
pub fn extract_message(
    operation: ApiOperation,
    body: Option<&ErrorBody>,
    transport: Option<&str>,
) -> String {
    EXTRACTION_ORDER
        .iter()
        .filter_map(|rule| rule.pick(body, transport))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| operation.fallback_message().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: Option<&str>, error: Option<&str>) -> ErrorBody {
        ErrorBody {
            message: message.map(str::to_string),
            error: error.map(str::to_string),
            detail: None,
        }
    }

    #[test]
    fn message_wins_over_error() {
        let body = body(Some("from message"), Some("from error"));
        let message = extract_message(ApiOperation::CreatePost, Some(&body), Some("io"));
        assert_eq!(message, "from message");
    }

    #[test]
    fn error_is_used_when_message_missing() {
        let body = body(None, Some("from error"));
        let message = extract_message(ApiOperation::ListPosts, Some(&body), Some("io"));
        assert_eq!(message, "from error");
    }

    #[test]
    fn blank_fields_fall_through_to_transport_text() {
        let body = body(Some("  "), Some(""));
        let message =
            extract_message(ApiOperation::ListPosts, Some(&body), Some("connection refused"));
        assert_eq!(message, "connection refused");
    }

    #[test]
    fn detail_is_used_after_message_and_error() {
        let body = ErrorBody {
            detail: Some("not allowed".to_string()),
            ..ErrorBody::default()
        };
        let message = extract_message(ApiOperation::CreateCarousel, Some(&body), None);
        assert_eq!(message, "not allowed");
    }

    #[test]
    fn generic_fallback_depends_on_operation() {
        assert_eq!(
            extract_message(ApiOperation::ListPosts, None, None),
            "Failed to fetch posts"
        );
        assert_eq!(
            extract_message(ApiOperation::CreatePost, None, Some("   ")),
            "Failed to create post"
        );
    }

    #[test]
    fn error_body_parse_ignores_non_json() {
        assert!(ErrorBody::parse("<html>502</html>").is_none());
        let parsed = ErrorBody::parse(r#"{"message":"boom","extra":1}"#).expect("must parse");
        assert_eq!(parsed.message.as_deref(), Some("boom"));
    }

    #[test]
    fn server_error_kind_follows_operation() {
        let parsed = body(Some("boom"), None);
        let err = ApiError::server(ApiOperation::CreatePost, 500, Some(&parsed));

        assert!(matches!(err, ApiError::Create { .. }));
        assert_eq!(err.cause(), FailureCause::Server { status: 500 });
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn format_error_mentions_status() {
        let err = ApiError::format(ApiOperation::CreateCarousel, 502, "Bad Gateway");
        assert_eq!(
            err.message(),
            "Server returned non-JSON response (502 Bad Gateway)"
        );
        assert_eq!(err.cause(), FailureCause::Format { status: 502 });
    }
}
