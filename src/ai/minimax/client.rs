use crate::models::Config;
use crate::{GenerationError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Shared MiniMax REST transport.
///
/// Holds the connection pool and the per-operation timeouts. Generation
/// requests and image downloads go through the same pool.
pub struct MinimaxHttpClient {
    pub(crate) client: Client,
    api_key: String,
    pub(crate) base_url: String,
    generation_timeout: Duration,
    download_timeout: Duration,
}

impl MinimaxHttpClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generation_timeout: config.generation_timeout,
            download_timeout: config.download_timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// POST a JSON request and return the decoded JSON body.
    ///
    /// Anything other than HTTP 200 is an error; the remote body is kept as
    /// diagnostic detail.
    pub async fn post_json<Req: Serialize>(&self, path: &str, request: &Req) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.generation_timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to MiniMax: {}", e);
                GenerationError::from_send(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read MiniMax response body: {}", e);
            GenerationError::from_send(e)
        })?;

        if status != StatusCode::OK {
            let detail = match serde_json::from_str::<Value>(&body) {
                Ok(json) => json.to_string(),
                Err(_) => body,
            };
            tracing::error!("MiniMax API error (status {}): {}", status, detail);
            return Err(GenerationError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse MiniMax response: {}\nBody: {}", e, body);
            GenerationError::MalformedResponse(e.to_string())
        })
    }

    /// GET `url` and return the raw body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to download image from {}: {}", url, e);
                download_error(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Image download from {} returned HTTP {}", url, status);
            return Err(GenerationError::Download(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read image body from {}: {}", url, e);
            download_error(e)
        })?;

        Ok(bytes.to_vec())
    }
}

fn download_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Download(format!("request timed out: {}", err))
    } else {
        GenerationError::Download(err.to_string())
    }
}
