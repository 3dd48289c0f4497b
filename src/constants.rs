//! Cross-cutting, shared constants.
//!
//! Request-level defaults live here so the wire payload, the pipeline and the
//! tests agree on a single value.

pub const DEFAULT_MARGIN: f64 = 0.5;
pub const DEFAULT_SIM_WEIGHT: f64 = 0.5;
pub const DEFAULT_PROB_THRESHOLD: f64 = 0.6;
pub const DEFAULT_POSITIVE_LABEL: &str = "REAL";

/// Labels assumed when the classifier artifact does not enumerate two classes.
pub const FALLBACK_CLASS_LABELS: [&str; 2] = ["FAKE", "REAL"];

/// Label reported when the adjusted score falls inside the margin deadband.
pub const UNSURE_LABEL: &str = "UNSURE";

/// Number of leading words of the (translated) text used as the headline query.
pub const HEADLINE_QUERY_WORDS: usize = 5;
/// Maximum number of headlines kept from a search response.
pub const MAX_HEADLINES: usize = 5;
pub const DEFAULT_HEADLINE_CACHE_CAPACITY: u64 = 256;

/// Number of terms listed in the explanation block.
pub const EXPLANATION_TOP_K: usize = 10;

/// Upper bound on characters kept from an extracted web page.
pub const MAX_EXTRACTED_CHARS: usize = 8000;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Language every input is translated into before vectorization.
pub const TARGET_LANGUAGE: &str = "en";
/// Longest input the translation endpoint accepts; longer texts are analyzed untranslated.
pub const MAX_TRANSLATE_CHARS: usize = 5000;

pub const SERVICE_NAME: &str = "Fake News Detector API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const STATUS_HEADER: &str = "X-Veracity-Status";
pub const STATUS_OK: &str = "ok";
pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";
pub const STATUS_ERROR: &str = "error";
