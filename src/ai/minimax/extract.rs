//! Tolerant parsing of MiniMax generation responses.
//!
//! A successful response looks like
//! `{"id": .., "data": {"image_urls": [..]}, "metadata": {..}, "base_resp": {"status_code": 0, "status_msg": "success"}}`
//! but the image field name and the task id field vary. Each lookup is an
//! ordered list of candidate fields; the first usable one wins.

use crate::{GenerationError, Result};
use serde_json::{Map, Value};

/// Candidate fields under `data` holding image locations, in priority order.
pub const IMAGE_URL_FIELDS: &[UrlField] = &[UrlField::List("image_urls"), UrlField::Single("url")];

/// Candidate top-level fields holding the task identifier, in priority order.
pub const TASK_ID_FIELDS: &[&str] = &["id", "task_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField {
    /// An array of URL strings.
    List(&'static str),
    /// A single URL string. Arrays are tolerated as well.
    Single(&'static str),
}

impl UrlField {
    pub fn name(self) -> &'static str {
        match self {
            UrlField::List(name) | UrlField::Single(name) => name,
        }
    }

    /// URLs stored under this field, or `None` if absent or empty.
    pub fn extract(self, data: &Map<String, Value>) -> Option<Vec<String>> {
        let urls: Vec<String> = match (self, data.get(self.name())?) {
            (_, Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
            (UrlField::Single(_), Value::String(url)) if !url.is_empty() => vec![url.clone()],
            _ => Vec::new(),
        };

        (!urls.is_empty()).then_some(urls)
    }
}

/// Fail if the embedded `base_resp` envelope reports a non-zero status.
///
/// The remote reports business failures with HTTP 200, so this runs before
/// any image extraction. A missing status code counts as a failure; an
/// envelope that is not an object (`null`) counts as absent.
pub fn check_status(body: &Value) -> Result<()> {
    let Some(base_resp) = body.get("base_resp").and_then(Value::as_object) else {
        return Ok(());
    };

    let code = base_resp
        .get("status_code")
        .and_then(Value::as_i64)
        .unwrap_or(-1);
    let message = base_resp
        .get("status_msg")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error");

    if code != 0 {
        tracing::error!("MiniMax API error: {} - {}", code, message);
        return Err(GenerationError::Business {
            code,
            message: message.to_string(),
        });
    }

    tracing::debug!("MiniMax API status: {} - {}", code, message);
    Ok(())
}

/// Image URLs from the first matching field in [`IMAGE_URL_FIELDS`].
pub fn image_urls(body: &Value) -> Result<Vec<String>> {
    let Some(data) = body.get("data").and_then(Value::as_object) else {
        tracing::error!("Could not extract image URLs, no data object: {}", body);
        return Err(GenerationError::Extraction(
            "response has no data object".to_string(),
        ));
    };

    IMAGE_URL_FIELDS
        .iter()
        .find_map(|field| {
            let urls = field.extract(data)?;
            tracing::debug!("Found {} image URL(s) in {}", urls.len(), field.name());
            Some(urls)
        })
        .ok_or_else(|| {
            let keys: Vec<&str> = data.keys().map(String::as_str).collect();
            tracing::error!("Could not extract image URLs from response: {}", body);
            GenerationError::Extraction(format!("no image URL field in data (keys: {:?})", keys))
        })
}

/// Task identifier from the first non-empty field in [`TASK_ID_FIELDS`].
///
/// Empty strings and a numeric `0` count as absent.
pub fn task_id(body: &Value) -> String {
    TASK_ID_FIELDS
        .iter()
        .find_map(|field| match body.get(*field)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}
