//! Data models and structures
//!
//! Defines generation parameters, the normalized generation result handed
//! back to callers, and environment configuration.

use crate::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const MIN_IMAGE_COUNT: u32 = 1;
pub const MAX_IMAGE_COUNT: u32 = 4;

/// Reject image counts the remote API does not accept.
pub fn validate_count(count: u32) -> Result<()> {
    if (MIN_IMAGE_COUNT..=MAX_IMAGE_COUNT).contains(&count) {
        Ok(())
    } else {
        tracing::error!("Rejected image count {}", count);
        Err(GenerationError::InvalidCount(count))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub const ALL: &'static [AspectRatio] = &[
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Standard,
        AspectRatio::Portrait,
        AspectRatio::Tall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Tall => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "Invalid aspect ratio '{}'. Expected one of: 1:1, 16:9, 4:3, 3:4, 9:16",
                    s
                )
            })
    }
}

/// Format the caller would like image data in.
///
/// Only `Url` is honored; requests always ask the remote for URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Url,
    Base64,
}

/// One URL when a single image was requested, otherwise the ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageUrls {
    Single(String),
    Multiple(Vec<String>),
}

impl ImageUrls {
    /// Unwrap to a single URL when exactly one image was requested.
    ///
    /// Returns `None` for an empty list.
    pub fn normalize(urls: Vec<String>, requested: u32) -> Option<Self> {
        if urls.is_empty() {
            None
        } else if requested == 1 {
            urls.into_iter().next().map(ImageUrls::Single)
        } else {
            Some(ImageUrls::Multiple(urls))
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            ImageUrls::Single(url) => vec![url],
            ImageUrls::Multiple(urls) => urls,
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            ImageUrls::Single(url) => Some(url),
            ImageUrls::Multiple(urls) => urls.first().map(String::as_str),
        }
    }
}

/// Normalized outcome of one successful generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "url")]
    pub image_url: ImageUrls,
    pub prompt: String,
    pub task_id: String,
    pub metadata: serde_json::Value,
}

/// One image out of a multi-image generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub prompt: String,
    pub task_id: String,
    pub index: usize,
}

impl GenerationResult {
    /// Fan the URL list out into indexed images sharing prompt and task id.
    pub fn into_images(self) -> Vec<GeneratedImage> {
        let GenerationResult {
            image_url,
            prompt,
            task_id,
            ..
        } = self;

        image_url
            .into_vec()
            .into_iter()
            .enumerate()
            .map(|(index, url)| GeneratedImage {
                url,
                prompt: prompt.clone(),
                task_id: task_id.clone(),
                index,
            })
            .collect()
    }
}

// Configuration
pub const DEFAULT_BASE_URL: &str = "https://api.minimaxi.com";
pub const DEFAULT_MODEL: &str = "image-01";
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub generation_timeout: Duration,
    pub download_timeout: Duration,
}

impl Config {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("MINIMAX_API_KEY")
            .map(|key| key.trim().to_string())
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::Config("MINIMAX_API_KEY not set".to_string()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("MINIMAX_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("MINIMAX_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            generation_timeout: timeout_from_env(
                "IMAGE_GENERATION_TIMEOUT_SECS",
                DEFAULT_GENERATION_TIMEOUT,
            )?,
            download_timeout: timeout_from_env(
                "IMAGE_DOWNLOAD_TIMEOUT_SECS",
                DEFAULT_DOWNLOAD_TIMEOUT,
            )?,
        })
    }
}

fn timeout_from_env(name: &str, default: Duration) -> Result<Duration> {
    match std::env::var(name) {
        Ok(value) => parse_timeout_secs(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_timeout_secs(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| {
            GenerationError::Config(format!(
                "{} must be a positive number of seconds, got '{}'",
                name, value
            ))
        })
}
