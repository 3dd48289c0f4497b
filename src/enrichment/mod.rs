//! Optional external collaborators: translation, headline search, generative
//! commentary and web page extraction.
//!
//! Every adapter sits behind an async trait so the pipeline can run against
//! real services, mocks, or nothing at all. Failures are typed
//! [`EnrichmentError`]s that callers turn into placeholders and warnings.

pub mod commentary;
pub mod error;
pub mod extract;
pub mod headlines;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod translate;


pub use commentary::{GeminiCommentator, commentary_prompt};
pub use error::EnrichmentError;
pub use extract::{PageFetcher, extract_article_text, extraction_placeholder};
pub use headlines::{CachedHeadlineSource, SerpApiHeadlines, describe_failure, headline_query};
pub use translate::GoogleTranslator;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::constants::SERVICE_VERSION;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into the target language.
    async fn translate(&self, text: &str) -> Result<String, EnrichmentError>;
}

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Returns up to a handful of news titles matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<String>, EnrichmentError>;

    /// Whether the source has what it needs (credentials) to answer.
    fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait Commentator: Send + Sync {
    async fn comment(&self, prompt: &str) -> Result<String, EnrichmentError>;
}

#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetches `url` and returns its readable text.
    async fn extract(&self, url: &str) -> Result<String, EnrichmentError>;
}

/// Which optional collaborators are wired in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub translator: bool,
    pub headlines: bool,
    pub commentary: bool,
    pub scraper: bool,
}

/// The set of adapters an analysis may call. Any of them may be absent.
#[derive(Clone, Default)]
pub struct Enrichment {
    pub translator: Option<Arc<dyn Translator>>,
    pub headlines: Option<Arc<CachedHeadlineSource>>,
    pub commentator: Option<Arc<dyn Commentator>>,
    pub extractor: Option<Arc<dyn PageExtractor>>,
}

impl std::fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enrichment")
            .field("availability", &self.availability())
            .field("headline_cache", &self.headlines)
            .finish()
    }
}

impl Enrichment {
    /// Builds the production adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self, EnrichmentError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(format!("veracity/{}", SERVICE_VERSION))
            .build()
            .map_err(|e| EnrichmentError::Client {
                reason: e.to_string(),
            })?;

        let translator: Option<Arc<dyn Translator>> = if config.translation_enabled {
            Some(Arc::new(GoogleTranslator::new(
                client.clone(),
                config.translate_url.clone(),
            )))
        } else {
            None
        };

        let search = SerpApiHeadlines::new(
            client.clone(),
            config.serpapi_url.clone(),
            config.serpapi_key.clone(),
        );
        let headlines = Arc::new(CachedHeadlineSource::new(
            Arc::new(search),
            config.headline_cache_capacity,
        ));

        let commentator: Option<Arc<dyn Commentator>> =
            config.google_api_key.clone().map(|key| {
                Arc::new(GeminiCommentator::new(
                    key,
                    config.gemini_model.clone(),
                    config.http_timeout,
                )) as Arc<dyn Commentator>
            });

        let extractor: Option<Arc<dyn PageExtractor>> = if config.url_extraction_enabled {
            Some(Arc::new(PageFetcher::new(client)))
        } else {
            None
        };

        let enrichment = Self {
            translator,
            headlines: Some(headlines),
            commentator,
            extractor,
        };

        let availability = enrichment.availability();
        info!(
            translator = availability.translator,
            headlines = availability.headlines,
            commentary = availability.commentary,
            scraper = availability.scraper,
            headline_cache_capacity = config.headline_cache_capacity,
            "Enrichment adapters configured"
        );

        Ok(enrichment)
    }

    /// No adapters at all.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            translator: self.translator.is_some(),
            headlines: self.headlines.as_ref().is_some_and(|h| h.is_ready()),
            commentary: self.commentator.is_some(),
            scraper: self.extractor.is_some(),
        }
    }

    /// Entries currently held by the headline cache.
    pub fn headline_cache_entries(&self) -> u64 {
        self.headlines.as_ref().map_or(0, |h| {
            h.run_pending_tasks();
            h.len()
        })
    }
}
