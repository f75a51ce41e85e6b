use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: '{value}'")]
/// Строковое значение не соответствует ни одному варианту перечисления.
pub struct ParseValueError {
    /// Имя поля, для которого разбиралось значение.
    pub kind: &'static str,
    /// Исходное значение.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Идентификатор поста, назначаемый сервером.
///
/// Демо-сервер отдаёт число, другие бэкенды строку; клиент хранит оба варианта
/// как непрозрачную строку.
pub struct PostId(String);

impl PostId {
    /// Создаёт идентификатор из строки.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Строковое представление идентификатора.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Тип поста. Карусель создаётся отдельным сценарием.
pub enum PostType {
    /// Одиночное фото.
    Photo,
    /// Reels-видео.
    Reel,
}

impl PostType {
    /// Значение в том виде, в каком оно уходит на сервер.
    pub fn as_str(self) -> &'static str {
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
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "photo" => Ok(Self::Photo),
            "reel" => Ok(Self::Reel),
            other => Err(ParseValueError {
                kind: "post_type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Стадия публикации поста. Управляется сервером.
pub enum PostStatus {
    /// Контент ещё готовится.
    NotReady,
    /// Готов к публикации.
    Ready,
    /// Опубликован.
    Published,
    /// Публикация не удалась.
    Failed,
}

impl PostStatus {
    /// Значение в том виде, в каком оно приходит с сервера.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::Ready => "ready",
            Self::Published => "published",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "not_ready" => Ok(Self::NotReady),
            "ready" => Ok(Self::Ready),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            other => Err(ParseValueError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пост в том виде, в каком его отдаёт сервер.
pub struct Post {
    /// Идентификатор поста.
    pub id: PostId,
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Тип поста.
    pub post_type: PostType,
    /// Текущий статус.
    pub status: PostStatus,
    /// Подпись, сгенерированная внешним процессом.
    #[serde(default)]
    pub ai_caption: Option<String>,
    /// Ссылки на изображения.
    #[serde(default, deserialize_with = "one_or_many")]
    pub image_url: Option<Vec<String>>,
    /// Ссылка на видео.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Ссылка на опубликованный пост в Instagram.
    #[serde(default)]
    pub instagram_url: Option<String>,
    /// Дата и время создания (UTC). Простой эхо-сервер может прислать
    /// `createdAt` или не прислать ничего.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Дата и время последнего обновления (UTC).
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Запланированное время публикации.
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Ответ на создание поста: `{ "post": ... }` или голый объект от эхо-сервера.
pub enum PostEnvelope {
    /// Пост завёрнут в поле `post`.
    Wrapped {
        /// Созданный пост.
        post: Post,
    },
    /// Сервер вернул сам пост.
    Bare(Post),
}

impl PostEnvelope {
    /// Достаёт пост из любой формы ответа.
    pub fn into_post(self) -> Post {
        match self {
            Self::Wrapped { post } | Self::Bare(post) => post,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Ответ на запрос списка: `{ "posts": [...] }` или голый массив.
pub enum PostListEnvelope {
    /// Список в поле `posts`.
    Wrapped {
        /// Посты в порядке сервера.
        posts: Vec<Post>,
    },
    /// Сервер вернул массив.
    Bare(Vec<Post>),
}

impl PostListEnvelope {
    /// Достаёт посты из любой формы ответа.
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::Wrapped { posts } | Self::Bare(posts) => posts,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUrls {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<RawUrls>::deserialize(deserializer)?.map(|raw| match raw {
            RawUrls::One(url) => vec![url],
            RawUrls::Many(urls) => urls,
        }),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса на создание поста.
pub struct NewPost {
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Тип поста.
    pub post_type: PostType,
    /// Время публикации; `null`, если не задано.
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Необязательные фильтры списка постов.
pub struct ListFilters {
    /// Фильтр по статусу.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    /// Фильтр по типу поста.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
}

impl ListFilters {
    /// Без фильтров.
    pub fn none() -> Self {
        Self::default()
    }

    /// Добавляет фильтр по статусу.
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Добавляет фильтр по типу.
    pub fn with_post_type(mut self, post_type: PostType) -> Self {
        self.post_type = Some(post_type);
        self
    }

    /// Истина, если ни один фильтр не задан.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.post_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Статус карусели в написании, которое ожидает сервер.
pub enum CarouselStatus {
    /// Готова.
    #[serde(rename = "Ready")]
    Ready,
    /// Не готова.
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl CarouselStatus {
    /// Статус по флагу готовности из формы.
    pub fn from_ready(ready: bool) -> Self {
        if ready { Self::Ready } else { Self::NotReady }
    }

    /// Написание статуса на проводе.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NotReady => "Not Ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Количество изображений в карусели: 5, 6 или 7.
pub struct ImageCount(u8);

impl ImageCount {
    /// Минимально допустимое количество.
    pub const MIN: u8 = 5;
    /// Максимально допустимое количество.
    pub const MAX: u8 = 7;

    /// Возвращает `None`, если значение вне диапазона.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Числовое значение.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ImageCount {
    type Error = ParseValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ParseValueError {
            kind: "number_of_images",
            value: value.to_string(),
        })
    }
}

impl From<ImageCount> for u8 {
    fn from(value: ImageCount) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса на создание карусели.
pub struct NewCarouselPost {
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Количество изображений.
    pub number_of_images: ImageCount,
    /// Начальный статус.
    pub status: CarouselStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Созданная карусель.
pub struct CarouselPost {
    /// Идентификатор.
    pub id: PostId,
    /// Описание желаемого контента.
    pub text_prompt: String,
    /// Количество изображений.
    pub number_of_images: u8,
    /// Статус.
    pub status: CarouselStatus,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}
