use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{ParseValueError, PostType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Поле черновика поста.
pub enum DraftField {
    /// `text_prompt`.
    TextPrompt,
    /// `post_type`.
    PostType,
    /// `scheduled_time`.
    ScheduledTime,
}

impl DraftField {
    /// Все поля в порядке отображения в форме.
    pub const ALL: [Self; 3] = [Self::TextPrompt, Self::PostType, Self::ScheduledTime];

    /// Имя поля в форме и на сервере.
    pub fn name(self) -> &'static str {
        match self {
            Self::TextPrompt => "text_prompt",
            Self::PostType => "post_type",
            Self::ScheduledTime => "scheduled_time",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| ParseValueError {
                kind: "field",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Черновик поста: сырые значения полей формы.
///
/// `post_type` хранится строкой, потому что форма может прислать что угодно;
/// проверяет её валидатор.
pub struct Draft {
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Тип поста.
    pub post_type: String,
    /// Время публикации; пустая строка означает «не задано».
    pub scheduled_time: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new("", PostType::Photo)
    }
}

impl Draft {
    /// Черновик с заданным текстом и типом, без расписания.
    pub fn new(text_prompt: impl Into<String>, post_type: PostType) -> Self {
        Self {
            text_prompt: text_prompt.into(),
            post_type: post_type.as_str().to_string(),
            scheduled_time: String::new(),
        }
    }

    /// Значение поля.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::TextPrompt => &self.text_prompt,
            DraftField::PostType => &self.post_type,
            DraftField::ScheduledTime => &self.scheduled_time,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::TextPrompt => &mut self.text_prompt,
            DraftField::PostType => &mut self.post_type,
            DraftField::ScheduledTime => &mut self.scheduled_time,
        }
    }
}

/// Ошибки валидации по полям. Пустая карта означает, что черновик валиден.
pub type FieldErrors = BTreeMap<DraftField, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Состояние формы: значения полей и ошибки к ним.
pub struct FormState {
    values: Draft,
    errors: FieldErrors,
}

impl FormState {
    /// Форма с начальными значениями и без ошибок.
    pub fn new(initial: Draft) -> Self {
        Self {
            values: initial,
            errors: FieldErrors::new(),
        }
    }

    /// Текущие значения.
    pub fn values(&self) -> &Draft {
        &self.values
    }

    /// Текущее значение поля.
    pub fn value(&self, field: DraftField) -> &str {
        self.values.field(field)
    }

    /// Все текущие ошибки.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Ошибка поля, если есть.
    pub fn error(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Есть ли хотя бы одна ошибка.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Меняет значение поля и снимает с него ошибку.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        *self.values.field_mut(field) = value.into();
        self.errors.remove(&field);
    }

    /// Заменяет ошибки результатом валидации.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Возвращает все поля к `initial` и очищает ошибки.
    pub fn reset(&mut self, initial: Draft) {
        self.values = initial;
        self.errors.clear();
    }
}
