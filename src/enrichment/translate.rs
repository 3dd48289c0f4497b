use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::Translator;
use super::error::EnrichmentError;
use crate::constants::{MAX_TRANSLATE_CHARS, TARGET_LANGUAGE};

const SERVICE: &str = "translation";

/// Auto-detecting translator backed by the public Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    target: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            target: TARGET_LANGUAGE.to_string(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, EnrichmentError> {
        let chars = text.chars().count();
        if chars > MAX_TRANSLATE_CHARS {
            return Err(EnrichmentError::InvalidInput {
                service: SERVICE,
                reason: format!("{} characters exceeds limit of {}", chars, MAX_TRANSLATE_CHARS),
            });
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(EnrichmentError::HttpStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        let translated = parse_segments(&body)?;
        debug!(input_chars = chars, output_chars = translated.len(), "Translated input");
        Ok(translated)
    }
}

/// Concatenates the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` tuples, one per sentence.
pub fn parse_segments(body: &Value) -> Result<String, EnrichmentError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| EnrichmentError::MalformedResponse {
            service: SERVICE,
            reason: "missing sentence array".to_string(),
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(EnrichmentError::EmptyContent { service: SERVICE });
    }

    Ok(translated)
}
