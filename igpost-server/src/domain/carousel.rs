use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::normalize_text_prompt;

pub(crate) const MIN_IMAGES: u8 = 5;
pub(crate) const MAX_IMAGES: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum CarouselStatus {
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl CarouselStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NotReady => "Not Ready",
        }
    }
}

impl FromStr for CarouselStatus {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Ready" => Ok(Self::Ready),
            "Not Ready" => Ok(Self::NotReady),
            _ => Err(DomainError::validation(
                "status",
                "must be \"Ready\" or \"Not Ready\"",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CarouselPost {
    pub(crate) id: i64,
    pub(crate) text_prompt: String,
    pub(crate) number_of_images: u8,
    pub(crate) status: CarouselStatus,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateCarouselRequest {
    pub(crate) text_prompt: String,
    pub(crate) number_of_images: u8,
    pub(crate) status: CarouselStatus,
}

impl CreateCarouselRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&self.number_of_images) {
            return Err(DomainError::validation(
                "number_of_images",
                "must be between 5 and 7",
            ));
        }
        Ok(Self {
            text_prompt: normalize_text_prompt(&self.text_prompt)?,
            ..self
        })
    }
}
