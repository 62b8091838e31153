//! MiniMax request payloads.
//!
//! Responses are parsed as `serde_json::Value` because their shape varies;
//! see [`super::extract`].

use crate::models::{AspectRatio, ResponseFormat};
use serde::Serialize;

pub const IMAGE_GENERATION_PATH: &str = "/v1/image_generation";

/// Request body for text-to-image generation.
#[derive(Debug, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub response_format: ResponseFormat,
    pub n: u32,
    pub prompt_optimizer: bool,
}
