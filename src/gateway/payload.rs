use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisParams, AnalysisReport, AnalysisWarning};
use crate::constants::{
    DEFAULT_MARGIN, DEFAULT_POSITIVE_LABEL, DEFAULT_PROB_THRESHOLD, DEFAULT_SIM_WEIGHT,
};
use crate::enrichment::Availability;

/// `POST /analyze` body. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub text: String,
    /// Fetched and scraped only when `text` is blank.
    pub url: String,
    pub use_headlines: bool,
    pub use_gemini: bool,
    pub disable_translation: bool,
    pub margin: f64,
    pub sim_weight: f64,
    pub prob_threshold: f64,
    pub positive_label: String,
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            url: String::new(),
            use_headlines: true,
            use_gemini: true,
            disable_translation: false,
            margin: DEFAULT_MARGIN,
            sim_weight: DEFAULT_SIM_WEIGHT,
            prob_threshold: DEFAULT_PROB_THRESHOLD,
            positive_label: DEFAULT_POSITIVE_LABEL.to_string(),
        }
    }
}

impl AnalyzeRequest {
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            use_headlines: self.use_headlines,
            use_gemini: self.use_gemini,
            disable_translation: self.disable_translation,
            margin: self.margin,
            sim_weight: self.sim_weight,
            prob_threshold: self.prob_threshold,
            positive_label: Some(self.positive_label.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub result: Vec<String>,
    pub model_loaded: bool,
    pub gemini_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    pub warnings: Vec<AnalysisWarning>,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub model_loaded: bool,
    pub gemini_ready: bool,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub gemini_ready: bool,
    pub translator_available: bool,
    pub scraper_available: bool,
    pub headlines_available: bool,
    pub google_api_key: bool,
    pub serpapi_key: bool,
    pub headline_cache_entries: u64,
}

impl HealthResponse {
    pub fn new(model_loaded: bool, availability: Availability, headline_cache_entries: u64) -> Self {
        Self {
            status: crate::constants::STATUS_HEALTHY,
            model_loaded,
            gemini_ready: availability.commentary,
            translator_available: availability.translator,
            scraper_available: availability.scraper,
            headlines_available: availability.headlines,
            google_api_key: availability.commentary,
            serpapi_key: availability.headlines,
            headline_cache_entries,
        }
    }
}
