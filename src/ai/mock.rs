use super::ImageGenerationService;
use crate::models::{validate_count, AspectRatio, GenerationResult, ImageUrls, ResponseFormat};
use crate::preferences::Preferences;
use crate::{image, GenerationError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for [`super::MinimaxImageClient`].
///
/// Generated URLs are `https://mock.local/image_<n>.jpeg` unless configured,
/// and downloads write a tiny PNG unless other bytes are configured.
pub struct MockImageGenerationClient {
    url_responses: Arc<Mutex<Vec<Vec<String>>>>,
    image_bytes: Arc<Mutex<Option<Vec<u8>>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            url_responses: Arc::new(Mutex::new(Vec::new())),
            image_bytes: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_urls(self, urls: Vec<String>) -> Self {
        self.url_responses.lock().unwrap().push(urls);
        self
    }

    pub fn with_image_bytes(self, bytes: Vec<u8>) -> Self {
        *self.image_bytes.lock().unwrap() = Some(bytes);
        self
    }

    /// Make every generation fail with a business error carrying `message`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn next_urls(&self, count: u32) -> Vec<String> {
        let mut calls = self.call_count.lock().unwrap();
        *calls += 1;

        let responses = self.url_responses.lock().unwrap();
        if responses.is_empty() {
            (0..count)
                .map(|i| format!("https://mock.local/image_{}.jpeg", i))
                .collect()
        } else {
            let index = (*calls - 1) % responses.len();
            responses[index].clone()
        }
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(
        &self,
        preferences: &Preferences,
        _aspect_ratio: AspectRatio,
        count: u32,
        _response_format: ResponseFormat,
    ) -> Result<GenerationResult> {
        validate_count(count)?;

        let urls = self.next_urls(count);

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(GenerationError::Business { code: -1, message });
        }

        let image_url = ImageUrls::normalize(urls, count).ok_or_else(|| {
            GenerationError::Extraction("mock configured with no URLs".to_string())
        })?;

        Ok(GenerationResult {
            image_url,
            prompt: preferences.prompt(),
            task_id: format!("mock-task-{}", self.get_call_count()),
            metadata: serde_json::json!({}),
        })
    }

    async fn download_image(&self, _url: &str, destination: &Path) -> Result<PathBuf> {
        let bytes = self.image_bytes.lock().unwrap().clone().unwrap_or_else(|| {
            vec![
                0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
                0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, // IEND chunk
                0xAE, 0x42, 0x60, 0x82,
            ]
        });

        image::prepare_destination(destination).await?;
        image::save_image(bytes, destination).await
    }
}
