//! Модели представления: то, что UI показывает для поста и кнопки отправки.
//!
//! Здесь нет разметки, только производные значения, которые одинаково
//! используются в Leptos-компонентах и в выводе CLI.

use chrono::{DateTime, Utc};

use crate::models::{Post, PostStatus, PostType};
use crate::submission::SubmitPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Цветовой вариант бейджа.
pub enum BadgeVariant {
    /// Серый.
    Neutral,
    /// Основной цвет.
    Primary,
    /// Зелёный.
    Success,
    /// Красный.
    Danger,
}

impl BadgeVariant {
    /// CSS-класс варианта.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "badge badge-neutral",
            Self::Primary => "badge badge-primary",
            Self::Success => "badge badge-success",
            Self::Danger => "badge badge-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Бейдж статуса поста.
pub struct StatusBadge {
    /// Подпись.
    pub label: &'static str,
    /// Вариант оформления.
    pub variant: BadgeVariant,
}

/// Бейдж для статуса.
pub fn status_badge(status: PostStatus) -> StatusBadge {
    let (label, variant) = match status {
        PostStatus::NotReady => ("Draft", BadgeVariant::Neutral),
        PostStatus::Ready => ("Ready", BadgeVariant::Primary),
        PostStatus::Published => ("Published", BadgeVariant::Success),
        PostStatus::Failed => ("Failed", BadgeVariant::Danger),
    };
    StatusBadge { label, variant }
}

/// Подпись типа поста.
pub fn post_type_label(post_type: PostType) -> &'static str {
    match post_type {
        PostType::Photo => "Photo",
        PostType::Reel => "Reel",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Карточка поста в списке.
pub struct PostCard {
    /// Идентификатор, годится как ключ списка.
    pub key: String,
    /// Бейдж статуса.
    pub badge: StatusBadge,
    /// Подпись типа.
    pub type_label: &'static str,
    /// Заголовок.
    pub title: String,
    /// Подпись от AI, если уже готова.
    pub caption: Option<String>,
    /// Строка «Created: ...», если сервер прислал дату создания.
    pub created: Option<String>,
    /// Строка «Scheduled: ...», если публикация запланирована.
    pub scheduled: Option<String>,
    /// Первое изображение для превью.
    pub preview_url: Option<String>,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        let title = if post.text_prompt.trim().is_empty() {
            "Untitled Post".to_string()
        } else {
            post.text_prompt.clone()
        };

        Self {
            key: post.id.to_string(),
            badge: status_badge(post.status),
            type_label: post_type_label(post.post_type),
            title,
            caption: post
                .ai_caption
                .as_ref()
                .filter(|caption| !caption.trim().is_empty())
                .cloned(),
            created: post
                .created_at
                .map(|at| format!("Created: {}", format_date_time(Some(at)))),
            scheduled: post
                .scheduled_time
                .map(|at| format!("Scheduled: {}", format_date_time(Some(at)))),
            preview_url: post
                .image_url
                .as_ref()
                .and_then(|urls| urls.first())
                .cloned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Состояние кнопки отправки.
pub struct SubmitButton {
    /// Подпись.
    pub label: &'static str,
    /// Неактивна ли кнопка.
    pub disabled: bool,
}

/// Кнопка отправки для фазы сценария.
pub fn submit_button(phase: SubmitPhase) -> SubmitButton {
    match phase {
        SubmitPhase::Idle => SubmitButton {
            label: "Create Post",
            disabled: false,
        },
        SubmitPhase::Validating | SubmitPhase::Submitting | SubmitPhase::Succeeded => {
            SubmitButton {
                label: "Creating...",
                disabled: true,
            }
        }
    }
}

/// `Oct 16, 2026, 09:05 AM`; `Not scheduled`, если времени нет.
pub fn format_date_time(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Not scheduled".to_string(),
    }
}

/// `Oct 16, 2026`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}
