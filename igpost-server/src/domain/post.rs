use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Лимит Instagram на длину подписи.
pub(crate) const TEXT_PROMPT_MAX_CHARS: usize = 2200;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PostType {
    Photo,
    Reel,
}

impl PostType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Reel => "reel",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "photo" => Ok(Self::Photo),
            "reel" => Ok(Self::Reel),
            _ => Err(DomainError::validation("post_type", "must be photo or reel")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PostStatus {
    NotReady,
    Ready,
    Published,
    Failed,
}

impl PostStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::Ready => "ready",
            Self::Published => "published",
            Self::Failed => "failed",
        }
    }

    /// Клиент может выставить только начальный статус.
    pub(crate) fn is_initial(self) -> bool {
        matches!(self, Self::NotReady | Self::Ready)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "not_ready" => Ok(Self::NotReady),
            "ready" => Ok(Self::Ready),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            _ => Err(DomainError::validation(
                "status",
                "must be one of not_ready, ready, published, failed",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) text_prompt: String,
    pub(crate) post_type: PostType,
    pub(crate) status: PostStatus,
    #[serde(default)]
    pub(crate) ai_caption: Option<String>,
    #[serde(default)]
    pub(crate) image_url: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) video_url: Option<String>,
    #[serde(default)]
    pub(crate) instagram_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) scheduled_time: Option<DateTime<Utc>>,
}

/// Сырые поля запроса на создание, как они пришли по HTTP.
#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) text_prompt: String,
    pub(crate) post_type: String,
    pub(crate) scheduled_time: Option<String>,
    pub(crate) status: Option<String>,
}

/// Запрос после нормализации: все поля уже разобраны.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedPost {
    pub(crate) text_prompt: String,
    pub(crate) post_type: PostType,
    pub(crate) status: PostStatus,
    pub(crate) scheduled_time: Option<DateTime<Utc>>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<ValidatedPost, DomainError> {
        let text_prompt = normalize_text_prompt(&self.text_prompt)?;
        let post_type = self.post_type.parse::<PostType>()?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => PostStatus::NotReady,
            Some(raw) => {
                let status = raw.parse::<PostStatus>()?;
                if !status.is_initial() {
                    return Err(DomainError::validation(
                        "status",
                        "initial status must be not_ready or ready",
                    ));
                }
                status
            }
        };
        let scheduled_time = match self.scheduled_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_scheduled_time(raw)?),
        };

        Ok(ValidatedPost {
            text_prompt,
            post_type,
            status,
            scheduled_time,
        })
    }
}

pub(crate) fn normalize_text_prompt(text_prompt: &str) -> Result<String, DomainError> {
    let text_prompt = text_prompt.trim();
    if text_prompt.is_empty() {
        return Err(DomainError::validation("text_prompt", "must not be empty"));
    }
    if text_prompt.chars().count() > TEXT_PROMPT_MAX_CHARS {
        return Err(DomainError::validation(
            "text_prompt",
            "must be at most 2200 chars",
        ));
    }
    Ok(text_prompt.to_string())
}

/// RFC 3339 или `datetime-local` без зоны (считается UTC).
pub(crate) fn parse_scheduled_time(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DomainError::validation("scheduled_time", "must be RFC 3339 or YYYY-MM-DDTHH:MM")
        })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{CreatePostRequest, DomainError, PostStatus, PostType, parse_scheduled_time};

    fn request(text_prompt: &str, post_type: &str) -> CreatePostRequest {
        CreatePostRequest {
            text_prompt: text_prompt.to_string(),
            post_type: post_type.to_string(),
            scheduled_time: None,
            status: None,
        }
    }

    #[test]
    fn validate_rejects_blank_text_prompt() {
        let err = request("   ", "photo")
            .validate()
            .expect_err("text_prompt must be rejected");
        assert_validation_field(err, "text_prompt");
    }

    #[test]
    fn validate_rejects_unknown_post_type() {
        let err = request("sunset", "carousel")
            .validate()
            .expect_err("post_type must be rejected");
        assert_validation_field(err, "post_type");
    }

    #[test]
    fn validate_defaults_status_and_trims_prompt() {
        let validated = request("  sunset  ", "reel")
            .validate()
            .expect("must validate");

        assert_eq!(validated.text_prompt, "sunset");
        assert_eq!(validated.post_type, PostType::Reel);
        assert_eq!(validated.status, PostStatus::NotReady);
        assert_eq!(validated.scheduled_time, None);
    }

    #[test]
    fn validate_accepts_ready_but_not_terminal_status() {
        let mut req = request("sunset", "photo");
        req.status = Some("ready".to_string());
        assert_eq!(req.clone().validate().expect("ready is initial").status, PostStatus::Ready);

        req.status = Some("published".to_string());
        let err = req.validate().expect_err("published is not initial");
        assert_validation_field(err, "status");
    }

    #[test]
    fn blank_scheduled_time_means_unscheduled() {
        let mut req = request("sunset", "photo");
        req.scheduled_time = Some("  ".to_string());
        assert_eq!(req.validate().expect("must validate").scheduled_time, None);
    }

    #[test]
    fn scheduled_time_accepts_rfc3339_and_datetime_local() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 20, 18, 30, 0).unwrap();

        assert_eq!(parse_scheduled_time("2026-10-20T18:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_scheduled_time("2026-10-20T21:30:00+03:00").unwrap(),
            expected
        );
        assert_eq!(parse_scheduled_time("2026-10-20T18:30").unwrap(), expected);
        assert_eq!(parse_scheduled_time("2026-10-20T18:30:00").unwrap(), expected);
    }

    #[test]
    fn scheduled_time_rejects_garbage() {
        let err = parse_scheduled_time("next tuesday").expect_err("must fail");
        assert_validation_field(err, "scheduled_time");
    }

    fn assert_validation_field(err: DomainError, expected: &str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
