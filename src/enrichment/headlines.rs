//! News headline search (SerpAPI) and the bounded headline cache.
//!
//! The cache is keyed by the BLAKE3 hash of the exact query string and uses
//! least-recently-used eviction once `capacity` entries are held. Only
//! successful searches are cached, so a transient outage is retried on the
//! next request instead of being replayed from memory.

use async_trait::async_trait;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::HeadlineSource;
use super::error::EnrichmentError;
use crate::constants::MAX_HEADLINES;

const SERVICE: &str = "headlines";
const UNTITLED: &str = "Untitled";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    news_results: Vec<NewsResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    #[serde(default)]
    title: Option<String>,
}

/// Google News search through SerpAPI.
#[derive(Clone)]
pub struct SerpApiHeadlines {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    limit: usize,
}

impl std::fmt::Debug for SerpApiHeadlines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiHeadlines")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("limit", &self.limit)
            .finish()
    }
}

impl SerpApiHeadlines {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            limit: MAX_HEADLINES,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl HeadlineSource for SerpApiHeadlines {
    async fn search(&self, query: &str) -> Result<Vec<String>, EnrichmentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EnrichmentError::DependencyUnavailable {
                service: SERVICE,
                reason: "missing SERPAPI_KEY environment variable".to_string(),
            })?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("tbm", "nws"), ("api_key", api_key)])
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(EnrichmentError::HttpStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        if let Some(reason) = body.error
            && body.news_results.is_empty()
        {
            return Err(EnrichmentError::MalformedResponse {
                service: SERVICE,
                reason,
            });
        }

        let titles: Vec<String> = body
            .news_results
            .into_iter()
            .take(self.limit)
            .map(|r| r.title.unwrap_or_else(|| UNTITLED.to_string()))
            .collect();

        debug!(query_len = query.len(), results = titles.len(), "Headline search complete");
        Ok(titles)
    }

    fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Bounded, shared cache in front of any [`HeadlineSource`].
pub struct CachedHeadlineSource {
    inner: Arc<dyn HeadlineSource>,
    entries: Cache<[u8; 32], Arc<Vec<String>>>,
}

impl CachedHeadlineSource {
    pub fn new(inner: Arc<dyn HeadlineSource>, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder()
                .max_capacity(capacity)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    /// Returns the cached titles for `query` without touching the network.
    pub fn cached(&self, query: &str) -> Option<Vec<String>> {
        self.entries
            .get(&cache_key(query))
            .map(|titles| titles.as_ref().clone())
    }

    /// Number of cached queries.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl std::fmt::Debug for CachedHeadlineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedHeadlineSource")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl HeadlineSource for CachedHeadlineSource {
    async fn search(&self, query: &str) -> Result<Vec<String>, EnrichmentError> {
        let key = cache_key(query);

        if let Some(titles) = self.entries.get(&key) {
            debug!("Headline cache hit");
            return Ok(titles.as_ref().clone());
        }

        match self.inner.search(query).await {
            Ok(titles) => {
                self.entries.insert(key, Arc::new(titles.clone()));
                Ok(titles)
            }
            Err(e) => {
                warn!(error = %e, "Headline search failed");
                Err(e)
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}

fn cache_key(query: &str) -> [u8; 32] {
    *blake3::hash(query.as_bytes()).as_bytes()
}

/// Short human-readable reason used in the headline placeholder.
pub fn describe_failure(err: &EnrichmentError) -> String {
    match err {
        EnrichmentError::DependencyUnavailable { reason, .. } => reason.clone(),
        EnrichmentError::NetworkTimeout { .. } => "request timeout".to_string(),
        EnrichmentError::Network { reason, .. } => format!("network error - {}", reason),
        EnrichmentError::HttpStatus { status, .. } => format!("network error - HTTP {}", status),
        other => other.to_string(),
    }
}

/// First `words` whitespace-separated words of `text`, joined by single spaces.
pub fn headline_query(text: &str, words: usize) -> String {
    text.split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}
