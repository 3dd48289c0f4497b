use serde::Serialize;

use super::explain::{TermContribution, render_explanation};
use super::scoring::{ProbabilityEstimate, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeadlineOutcome {
    Disabled,
    NoQuery,
    Found { titles: Vec<String> },
    NoneFound,
    Unavailable { reason: String },
}

impl HeadlineOutcome {
    /// Bullet list of titles, or a parenthesized placeholder.
    pub fn block(&self) -> String {
        match self {
            HeadlineOutcome::Disabled => "(Headlines disabled)".to_string(),
            HeadlineOutcome::NoQuery => "(No query provided)".to_string(),
            HeadlineOutcome::Found { titles } => titles
                .iter()
                .map(|t| format!("- {}", t))
                .collect::<Vec<_>>()
                .join("\n"),
            HeadlineOutcome::NoneFound => "(No matching headlines)".to_string(),
            HeadlineOutcome::Unavailable { reason } => {
                format!("(Headlines unavailable: {})", reason)
            }
        }
    }

    pub fn titles(&self) -> &[String] {
        match self {
            HeadlineOutcome::Found { titles } => titles,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentaryOutcome {
    Disabled,
    Unavailable,
    Generated { text: String },
    Failed { reason: String },
}

impl CommentaryOutcome {
    pub fn block(&self) -> String {
        match self {
            CommentaryOutcome::Disabled | CommentaryOutcome::Unavailable => {
                "(Gemini disabled or unavailable)".to_string()
            }
            CommentaryOutcome::Generated { text } => text.clone(),
            CommentaryOutcome::Failed { reason } => format!("❌ Gemini Error: {}", reason),
        }
    }
}

/// Degradations that did not stop the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    TranslationUnavailable,
    TranslationFailed { reason: String },
    HeadlinesUnavailable { reason: String },
    SimilaritySkipped { reason: String },
    CommentaryUnavailable,
    CommentaryFailed { reason: String },
    UnknownPositiveLabel { label: String },
    UrlExtractionFailed { reason: String },
}

/// Everything an analysis produced, before rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub label: Verdict,
    /// Label from the raw decision score alone.
    pub predicted_label: String,
    pub positive_label: String,
    pub raw_score: f64,
    pub adjusted_score: f64,
    pub probability: Option<ProbabilityEstimate>,
    pub similarity: Option<f64>,
    pub translated: bool,
    pub headlines: HeadlineOutcome,
    pub commentary: CommentaryOutcome,
    pub explanation: Vec<TermContribution>,
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisReport {
    /// The six result lines shown to clients.
    pub fn lines(&self) -> [String; 6] {
        [
            format!("🧠 Prediction: {}", self.label),
            self.confidence_line(),
            format!("📰 Headlines:\n{}", self.headlines.block()),
            format!("🤖 Gemini Insight:\n{}", self.commentary.block()),
            render_explanation(&self.explanation),
            match self.similarity {
                Some(sim) => format!("Cosine similarity: {:.3}", sim),
                None => "Cosine similarity: N/A".to_string(),
            },
        ]
    }

    fn confidence_line(&self) -> String {
        let mut line = format!(
            "📊 Confidence (raw/adj): {} / {}",
            confidence_magnitude(self.raw_score),
            confidence_magnitude(self.adjusted_score)
        );

        if let Some(p) = &self.probability {
            line.push_str(&format!(
                " | Prob (raw/adj): {:.2}/{:.2} | thr={:.2}",
                p.raw, p.adjusted, p.threshold
            ));
        }

        line
    }
}

/// `|score|` rounded to two places, printed in shortest form with at least
/// one decimal (`1.5`, `2.0`, `0.75`).
pub(crate) fn confidence_magnitude(score: f64) -> String {
    if !score.is_finite() {
        return score.abs().to_string();
    }
    let rounded = ((score * 100.0).round() / 100.0).abs();
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        rounded.to_string()
    }
}
