//! Classification pipeline: translate, vectorize, score, damp by headline
//! similarity, decide, then gather commentary and an explanation.
//!
//! The outcome is a typed [`AnalysisReport`] (or an [`AnalysisError`] for the
//! early exits), both of which render to the six result lines clients expect.

pub mod error;
pub mod explain;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use error::AnalysisError;
pub use explain::{TermContribution, render_explanation, top_contributions};
pub use params::AnalysisParams;
pub use pipeline::Analyzer;
pub use report::{AnalysisReport, AnalysisWarning, CommentaryOutcome, HeadlineOutcome};
pub use scoring::{
    LabelSpace, ProbabilityEstimate, ProbabilitySource, Verdict, adjust_score, damping_factor,
    decide_label, estimate_probability, sigmoid,
};
