use super::client::MinimaxHttpClient;
use super::extract;
use super::types::{ImageGenerationRequest, IMAGE_GENERATION_PATH};
use crate::ai::ImageGenerationService;
use crate::models::{
    validate_count, AspectRatio, Config, GenerationResult, ImageUrls, ResponseFormat,
};
use crate::preferences::Preferences;
use crate::{image, GenerationError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// MiniMax text-to-image client.
///
/// Safe to share across concurrent calls.
pub struct MinimaxImageClient {
    http: MinimaxHttpClient,
    model: String,
}

impl MinimaxImageClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            http: MinimaxHttpClient::new_with_client(config, client),
            model: config.model.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// Drop this client's handle to the connection pool.
    ///
    /// The pool itself is freed once no other clone of the `reqwest::Client`
    /// passed to [`MinimaxImageClient::new_with_client`] remains.
    pub fn close(self) {
        tracing::debug!("Closing MiniMax client for {}", self.http.base_url);
    }
}

#[async_trait]
impl ImageGenerationService for MinimaxImageClient {
    async fn generate_image(
        &self,
        preferences: &Preferences,
        aspect_ratio: AspectRatio,
        count: u32,
        response_format: ResponseFormat,
    ) -> Result<GenerationResult> {
        validate_count(count)?;

        if response_format != ResponseFormat::Url {
            tracing::warn!(
                "Response format {:?} is not supported, requesting image URLs instead",
                response_format
            );
        }

        let prompt = preferences.prompt();
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.clone(),
            aspect_ratio,
            response_format: ResponseFormat::Url,
            n: count,
            prompt_optimizer: true,
        };

        tracing::info!(
            "Calling MiniMax image generation (aspect ratio: {}, count: {})",
            aspect_ratio,
            count
        );

        let body = self.http.post_json(IMAGE_GENERATION_PATH, &request).await?;

        extract::check_status(&body)?;
        let urls = extract::image_urls(&body)?;
        let task_id = extract::task_id(&body);
        let metadata = body
            .get("metadata")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let image_url = ImageUrls::normalize(urls, count).ok_or_else(|| {
            GenerationError::Extraction("image URL list was empty".to_string())
        })?;

        tracing::info!(
            "Image generation successful (task: {}): {:?}",
            task_id,
            image_url
        );

        Ok(GenerationResult {
            image_url,
            prompt,
            task_id,
            metadata,
        })
    }

    async fn download_image(&self, url: &str, destination: &Path) -> Result<PathBuf> {
        tracing::info!("Downloading image from {}", url);

        image::prepare_destination(destination).await?;
        let bytes = self.http.get_bytes(url).await?;
        let path = image::save_image(bytes, destination).await?;

        tracing::info!("Image saved to {}", path.display());
        Ok(path)
    }
}
