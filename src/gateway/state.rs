use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::enrichment::Availability;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            started_at: Utc::now(),
        }
    }

    #[inline]
    pub fn model_loaded(&self) -> bool {
        self.analyzer.model_loaded()
    }

    #[inline]
    pub fn gemini_ready(&self) -> bool {
        self.analyzer.availability().commentary
    }

    #[inline]
    pub fn availability(&self) -> Availability {
        self.analyzer.availability()
    }
}
