//! Deterministic in-process adapters for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    CachedHeadlineSource, Commentator, Enrichment, EnrichmentError, HeadlineSource, PageExtractor,
    Translator,
};

/// Returns a fixed translation, or echoes the input when none is set.
#[derive(Debug, Default)]
pub struct MockTranslator {
    output: Option<String>,
    failure: Option<EnrichmentError>,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn returning(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    pub fn failing(error: EnrichmentError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.output.clone().unwrap_or_else(|| text.to_string()))
    }
}

/// Headline source answering from a fixed table; unknown queries get `default`.
#[derive(Debug, Default)]
pub struct MockHeadlineSource {
    by_query: HashMap<String, Vec<String>>,
    default: Vec<String>,
    failure: Option<EnrichmentError>,
    ready: bool,
    calls: AtomicUsize,
}

impl MockHeadlineSource {
    pub fn returning(titles: &[&str]) -> Self {
        Self {
            default: titles.iter().map(|t| t.to_string()).collect(),
            ready: true,
            ..Self::default()
        }
    }

    pub fn failing(error: EnrichmentError) -> Self {
        Self {
            failure: Some(error),
            ready: true,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: &str, titles: &[&str]) -> Self {
        self.by_query.insert(
            query.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HeadlineSource for MockHeadlineSource {
    async fn search(&self, query: &str) -> Result<Vec<String>, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self
            .by_query
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Commentator that records the last prompt it saw.
#[derive(Debug, Default)]
pub struct MockCommentator {
    reply: String,
    failure: Option<EnrichmentError>,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl MockCommentator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }

    pub fn failing(error: EnrichmentError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl Commentator for MockCommentator {
    async fn comment(&self, prompt: &str) -> Result<String, EnrichmentError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.reply.clone()),
        }
    }
}

/// Page extractor serving canned page text per URL.
#[derive(Debug, Default)]
pub struct MockPageExtractor {
    pages: HashMap<String, String>,
}

impl MockPageExtractor {
    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl PageExtractor for MockPageExtractor {
    async fn extract(&self, url: &str) -> Result<String, EnrichmentError> {
        match self.pages.get(url) {
            Some(text) if !text.trim().is_empty() => Ok(text.clone()),
            Some(_) => Err(EnrichmentError::EmptyContent { service: "scraper" }),
            None => Err(EnrichmentError::HttpStatus {
                service: "scraper",
                status: 404,
            }),
        }
    }
}

impl Enrichment {
    /// Mock adapters: echo translator, fixed headlines, canned commentary.
    pub fn mock(titles: &[&str]) -> Self {
        Self::disabled()
            .with_translator(Arc::new(MockTranslator::echo()))
            .with_headline_source(Arc::new(MockHeadlineSource::returning(titles)), 16)
            .with_commentator(Arc::new(MockCommentator::replying("Looks consistent.")))
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_headline_source(mut self, source: Arc<dyn HeadlineSource>, capacity: u64) -> Self {
        self.headlines = Some(Arc::new(CachedHeadlineSource::new(source, capacity)));
        self
    }

    pub fn with_commentator(mut self, commentator: Arc<dyn Commentator>) -> Self {
        self.commentator = Some(commentator);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn PageExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }
}
