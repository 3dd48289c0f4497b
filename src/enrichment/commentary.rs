use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};
use std::time::Duration;
use tracing::debug;

use super::Commentator;
use super::error::EnrichmentError;

const SERVICE: &str = "gemini";

/// Gemini-backed commentary generator.
#[derive(Clone)]
pub struct GeminiCommentator {
    client: Client,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiCommentator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCommentator")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiCommentator {
    pub fn new(api_key: String, model: impl Into<String>, timeout: Duration) -> Self {
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );

        let client = Client::builder().with_auth_resolver(auth_resolver).build();

        Self {
            client,
            model: model.into(),
            timeout,
        }
    }

    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Commentator for GeminiCommentator {
    async fn comment(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_string())]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| EnrichmentError::NetworkTimeout { service: SERVICE })?
        .map_err(|e| EnrichmentError::Network {
            service: SERVICE,
            reason: e.to_string(),
        })?;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(EnrichmentError::EmptyContent { service: SERVICE });
        }

        debug!(model = %self.model, chars = text.len(), "Commentary generated");
        Ok(text)
    }
}

/// Builds the commentary prompt from the analyzed text and the headline block.
pub fn commentary_prompt(text: &str, headlines: &str) -> String {
    format!(
        "User News:\n{}\n\nTop Headlines:\n{}\n\nDoes this match? Explain clearly.",
        text, headlines
    )
}
