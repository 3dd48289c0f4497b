use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::error::AnalysisError;
use super::explain::top_contributions;
use super::params::AnalysisParams;
use super::report::{AnalysisReport, AnalysisWarning, CommentaryOutcome, HeadlineOutcome};
use super::scoring::{LabelSpace, adjust_score, decide_label, estimate_probability};
use crate::constants::{EXPLANATION_TOP_K, HEADLINE_QUERY_WORDS};
use crate::enrichment::{
    Availability, Enrichment, EnrichmentError, HeadlineSource, commentary_prompt,
    describe_failure, extraction_placeholder, headline_query,
};
use crate::model::{ModelStore, SparseVector, cosine_similarity};

/// Runs the classification pipeline against a (possibly absent) model and
/// whatever enrichment adapters are wired in.
#[derive(Debug, Clone)]
pub struct Analyzer {
    model: Option<Arc<ModelStore>>,
    enrichment: Enrichment,
}

impl Analyzer {
    pub fn new(model: Option<Arc<ModelStore>>, enrichment: Enrichment) -> Self {
        Self { model, enrichment }
    }

    #[inline]
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    #[inline]
    pub fn model(&self) -> Option<&ModelStore> {
        self.model.as_deref()
    }

    #[inline]
    pub fn enrichment(&self) -> &Enrichment {
        &self.enrichment
    }

    #[inline]
    pub fn availability(&self) -> Availability {
        self.enrichment.availability()
    }

    /// Text to analyze for `url`. A failed extraction yields a placeholder
    /// text plus the warning describing it; it never stops the request.
    pub async fn extract_url(&self, url: &str) -> (String, Option<AnalysisWarning>) {
        let extracted = match &self.enrichment.extractor {
            Some(extractor) => extractor.extract(url).await,
            None => Err(EnrichmentError::DependencyUnavailable {
                service: "scraper",
                reason: "URL extraction is disabled".to_string(),
            }),
        };

        match extracted {
            Ok(text) if !text.trim().is_empty() => (text, None),
            Ok(_) => Self::extraction_failed(EnrichmentError::EmptyContent { service: "scraper" }),
            Err(e) => Self::extraction_failed(e),
        }
    }

    fn extraction_failed(err: EnrichmentError) -> (String, Option<AnalysisWarning>) {
        warn!(error = %err, "URL extraction failed; analyzing placeholder text");
        (
            extraction_placeholder(&err),
            Some(AnalysisWarning::UrlExtractionFailed {
                reason: err.to_string(),
            }),
        )
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn analyze(
        &self,
        text: &str,
        params: &AnalysisParams,
    ) -> Result<AnalysisReport, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        params.validate()?;

        let model = self.model.as_deref().ok_or(AnalysisError::ModelUnavailable)?;
        let mut warnings = Vec::new();

        let (text, translated) = self.translate(text, params, &mut warnings).await;

        let features = model
            .vectorizer()
            .transform(&text)
            .map_err(AnalysisError::Vectorization)?;

        let classifier = model.classifier();
        let raw_score = classifier
            .decision_function(&features)
            .map_err(AnalysisError::Prediction)?;
        let predicted_label = classifier.predict(raw_score).to_string();

        let headlines = self.headlines(&text, params, &mut warnings).await;
        let similarity = self.similarity(model, &features, &headlines, &mut warnings);
        let adjusted_score = adjust_score(raw_score, similarity, params.sim_weight);

        let labels = LabelSpace::resolve(classifier.classes(), params.requested_positive_label());
        if !labels.known {
            warnings.push(AnalysisWarning::UnknownPositiveLabel {
                label: labels.positive.clone(),
            });
        }

        let probability = estimate_probability(
            classifier,
            &labels,
            raw_score,
            adjusted_score,
            params.prob_threshold,
        );
        let label = decide_label(&labels, adjusted_score, probability.as_ref(), params.margin);

        let commentary = self
            .commentary(&text, &headlines, params, &mut warnings)
            .await;
        let explanation = top_contributions(model, &features, EXPLANATION_TOP_K);

        info!(
            label = %label,
            predicted = %predicted_label,
            raw_score,
            adjusted_score,
            similarity = ?similarity,
            warnings = warnings.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            label,
            predicted_label,
            positive_label: labels.positive,
            raw_score,
            adjusted_score,
            probability,
            similarity,
            translated,
            headlines,
            commentary,
            explanation,
            warnings,
        })
    }

    async fn translate(
        &self,
        text: &str,
        params: &AnalysisParams,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> (String, bool) {
        if params.disable_translation {
            return (text.to_string(), false);
        }

        let Some(translator) = &self.enrichment.translator else {
            warnings.push(AnalysisWarning::TranslationUnavailable);
            return (text.to_string(), false);
        };

        match translator.translate(text).await {
            Ok(translated) if !translated.trim().is_empty() => (translated, true),
            Ok(_) => {
                warnings.push(AnalysisWarning::TranslationFailed {
                    reason: "empty translation".to_string(),
                });
                (text.to_string(), false)
            }
            Err(e) => {
                warn!(error = %e, "Translation failed; using original text");
                warnings.push(AnalysisWarning::TranslationFailed {
                    reason: e.to_string(),
                });
                (text.to_string(), false)
            }
        }
    }

    async fn headlines(
        &self,
        text: &str,
        params: &AnalysisParams,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> HeadlineOutcome {
        if !params.use_headlines {
            return HeadlineOutcome::Disabled;
        }

        let query = headline_query(text, HEADLINE_QUERY_WORDS);
        if query.is_empty() {
            return HeadlineOutcome::NoQuery;
        }

        let Some(source) = &self.enrichment.headlines else {
            let reason = "no headline source configured".to_string();
            warnings.push(AnalysisWarning::HeadlinesUnavailable {
                reason: reason.clone(),
            });
            return HeadlineOutcome::Unavailable { reason };
        };

        match source.search(&query).await {
            Ok(titles) if titles.is_empty() => HeadlineOutcome::NoneFound,
            Ok(titles) => HeadlineOutcome::Found { titles },
            Err(e) => {
                let reason = describe_failure(&e);
                warnings.push(AnalysisWarning::HeadlinesUnavailable {
                    reason: reason.clone(),
                });
                HeadlineOutcome::Unavailable { reason }
            }
        }
    }

    fn similarity(
        &self,
        model: &ModelStore,
        features: &SparseVector,
        headlines: &HeadlineOutcome,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> Option<f64> {
        let titles = headlines.titles();
        if titles.is_empty() {
            return None;
        }

        match model.vectorizer().transform(&titles.join(" ")) {
            Ok(headline_vector) => {
                let sim = cosine_similarity(features, &headline_vector);
                debug!(similarity = sim, headlines = titles.len(), "Headline similarity");
                Some(sim)
            }
            Err(e) => {
                warn!(error = %e, "Could not vectorize headlines");
                warnings.push(AnalysisWarning::SimilaritySkipped {
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    async fn commentary(
        &self,
        text: &str,
        headlines: &HeadlineOutcome,
        params: &AnalysisParams,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> CommentaryOutcome {
        if !params.use_gemini {
            return CommentaryOutcome::Disabled;
        }

        let Some(commentator) = &self.enrichment.commentator else {
            warnings.push(AnalysisWarning::CommentaryUnavailable);
            return CommentaryOutcome::Unavailable;
        };

        let prompt = commentary_prompt(text, &headlines.block());
        match commentator.comment(&prompt).await {
            Ok(text) => CommentaryOutcome::Generated { text },
            Err(e) => {
                warn!(error = %e, "Commentary failed");
                let reason = e.to_string();
                warnings.push(AnalysisWarning::CommentaryFailed {
                    reason: reason.clone(),
                });
                CommentaryOutcome::Failed { reason }
            }
        }
    }
}
