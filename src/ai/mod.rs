//! AI image generation integration
//!
//! Provides the [`ImageGenerationService`] interface, the MiniMax
//! text-to-image client that implements it, and an in-memory mock.

pub mod minimax;
pub mod mock;

pub use minimax::MinimaxImageClient;
pub use mock::MockImageGenerationClient;

use crate::models::{validate_count, AspectRatio, GeneratedImage, GenerationResult, ResponseFormat};
use crate::preferences::Preferences;
use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate `count` images (1 to 4) for the given preferences.
    async fn generate_image(
        &self,
        preferences: &Preferences,
        aspect_ratio: AspectRatio,
        count: u32,
        response_format: ResponseFormat,
    ) -> Result<GenerationResult>;

    /// Fetch `url` and write it to `destination`, returning the absolute path.
    async fn download_image(&self, url: &str, destination: &Path) -> Result<PathBuf>;

    /// Generate several images in one request and return them individually,
    /// in the order the remote service listed them.
    async fn generate_multiple_images(
        &self,
        preferences: &Preferences,
        count: u32,
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>> {
        validate_count(count)?;

        let result = self
            .generate_image(preferences, aspect_ratio, count, ResponseFormat::Url)
            .await
            .map_err(|e| {
                tracing::error!("Failed to generate images: {}", e);
                e
            })?;

        Ok(result.into_images())
    }
}
