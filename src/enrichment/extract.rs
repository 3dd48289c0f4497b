use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::PageExtractor;
use super::error::EnrichmentError;
use crate::constants::MAX_EXTRACTED_CHARS;

const SERVICE: &str = "scraper";

/// Fetches a web page and keeps its title and paragraph text.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_chars: MAX_EXTRACTED_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl PageExtractor for PageFetcher {
    async fn extract(&self, url: &str) -> Result<String, EnrichmentError> {
        let parsed = parse_page_url(url)?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(EnrichmentError::HttpStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(SERVICE, e))?;

        // `Html` is not `Send`; parse only after the last await.
        let text = extract_article_text(&html, self.max_chars)?;
        debug!(html_bytes = html.len(), chars = text.chars().count(), "Extracted page text");
        Ok(text)
    }
}

fn parse_page_url(raw: &str) -> Result<Url, EnrichmentError> {
    let url = Url::parse(raw.trim()).map_err(|e| EnrichmentError::InvalidInput {
        service: SERVICE,
        reason: format!("invalid URL '{}': {}", raw, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(EnrichmentError::InvalidInput {
            service: SERVICE,
            reason: format!("unsupported URL scheme '{}'", other),
        }),
    }
}

fn selector(css: &str) -> Result<Selector, EnrichmentError> {
    Selector::parse(css).map_err(|e| EnrichmentError::MalformedResponse {
        service: SERVICE,
        reason: format!("bad selector '{}': {}", css, e),
    })
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title plus every `<p>` text, whitespace collapsed, capped at `max_chars`.
pub fn extract_article_text(html: &str, max_chars: usize) -> Result<String, EnrichmentError> {
    let document = Html::parse_document(html);
    let title_selector = selector("title")?;
    let paragraph_selector = selector("p")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let body = document
        .select(&paragraph_selector)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let combined = match (title.is_empty(), body.is_empty()) {
        (true, true) => String::new(),
        (false, true) => title,
        (true, false) => body,
        (false, false) => format!("{}\n\n{}", title, body),
    };

    if combined.is_empty() {
        return Err(EnrichmentError::EmptyContent { service: SERVICE });
    }

    Ok(combined.chars().take(max_chars).collect())
}

/// Text analyzed in place of a page that could not be extracted.
pub fn extraction_placeholder(err: &EnrichmentError) -> String {
    match err {
        EnrichmentError::DependencyUnavailable { reason, .. } => {
            format!("(URL scraping unavailable: {})", reason)
        }
        EnrichmentError::NetworkTimeout { .. } => "❌ URL fetch timeout".to_string(),
        EnrichmentError::EmptyContent { .. } => "⚠️ No text extracted from URL".to_string(),
        EnrichmentError::Network { reason, .. } => format!("❌ URL fetch error: {}", reason),
        EnrichmentError::HttpStatus { status, .. } => format!("❌ URL fetch error: HTTP {}", status),
        other => format!("❌ URL fetch error: {}", other),
    }
}
