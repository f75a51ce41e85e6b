use thiserror::Error;

use crate::form::{Draft, DraftField, FieldErrors};
use crate::models::{CarouselStatus, ImageCount, NewCarouselPost, NewPost, PostType};

const TEXT_PROMPT_REQUIRED: &str = "Text prompt is required";
const INVALID_POST_TYPE: &str = "Invalid post type";

/// Проверяет черновик и возвращает ошибки по полям.
///
/// - `text_prompt` не может быть пустым после обрезки пробелов;
/// - `post_type` должен быть ровно `photo` или `reel`.
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.text_prompt.trim().is_empty() {
        errors.insert(DraftField::TextPrompt, TEXT_PROMPT_REQUIRED.to_string());
    }

    if draft.post_type.parse::<PostType>().is_err() {
        errors.insert(DraftField::PostType, INVALID_POST_TYPE.to_string());
    }

    errors
}

/// Проверяет черновик и собирает из него тело запроса.
///
/// Пустое `scheduled_time` уходит на сервер как `null`.
pub fn validated(draft: &Draft) -> Result<NewPost, FieldErrors> {
    let errors = validate(draft);
    let post_type = match draft.post_type.parse::<PostType>() {
        Ok(post_type) if errors.is_empty() => post_type,
        _ => return Err(errors),
    };

    let scheduled_time = draft.scheduled_time.trim();
    Ok(NewPost {
        text_prompt: draft.text_prompt.clone(),
        post_type,
        scheduled_time: (!scheduled_time.is_empty()).then(|| scheduled_time.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for '{field}': {message}")]
/// Ошибка валидации одного поля.
pub struct ValidationError {
    /// Имя поля.
    pub field: &'static str,
    /// Что не так.
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Черновик карусели.
pub struct CarouselDraft {
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Количество изображений.
    pub number_of_images: u8,
    /// Отметка «готово» в форме.
    pub ready: bool,
}

impl Default for CarouselDraft {
    fn default() -> Self {
        Self {
            text_prompt: String::new(),
            number_of_images: ImageCount::MIN,
            ready: false,
        }
    }
}

/// Проверяет черновик карусели и собирает тело запроса.
pub fn validate_carousel(draft: &CarouselDraft) -> Result<NewCarouselPost, ValidationError> {
    if draft.text_prompt.trim().is_empty() {
        return Err(ValidationError {
            field: "text_prompt",
            message: TEXT_PROMPT_REQUIRED,
        });
    }

    let number_of_images =
        ImageCount::new(draft.number_of_images).ok_or(ValidationError {
            field: "number_of_images",
            message: "must be 5, 6 or 7",
        })?;

    Ok(NewCarouselPost {
        text_prompt: draft.text_prompt.trim().to_string(),
        number_of_images,
        status: CarouselStatus::from_ready(draft.ready),
    })
}
