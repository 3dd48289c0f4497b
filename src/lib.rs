//! Veracity library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`ModelStore`] - TF-IDF vectorizer + linear classifier loaded from JSON artifacts
//! - [`Analyzer`], [`AnalysisParams`], [`AnalysisReport`] - The classification pipeline
//!
//! ## Enrichment
//! - [`Translator`], [`HeadlineSource`], [`Commentator`], [`PageExtractor`] - Adapter seams
//! - [`Enrichment`] - The adapter set an [`Analyzer`] calls, built from [`Config`]
//! - [`CachedHeadlineSource`] - Bounded LRU cache in front of headline search
//!
//! ## HTTP
//! - [`gateway::create_router_with_state`], [`AppState`] - Axum router
//!
//! ## Test/Mock Support
//! A small sample model and deterministic adapters are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod gateway;
pub mod model;

pub use analysis::{
    AnalysisError, AnalysisParams, AnalysisReport, AnalysisWarning, Analyzer, CommentaryOutcome,
    HeadlineOutcome, ProbabilityEstimate, ProbabilitySource, TermContribution, Verdict,
};
pub use config::{Config, ConfigError};
pub use enrichment::{
    Availability, CachedHeadlineSource, Commentator, Enrichment, EnrichmentError,
    GeminiCommentator, GoogleTranslator, HeadlineSource, PageExtractor, PageFetcher,
    SerpApiHeadlines, Translator,
};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use model::{
    ClassifierArtifact, LinearClassifier, ModelError, ModelStore, Norm, PlattScaling,
    SparseVector, TfidfVectorizer, VectorizerArtifact, cosine_similarity,
};
