use super::*;
use crate::enrichment::mock::{
    MockCommentator, MockHeadlineSource, MockPageExtractor, MockTranslator,
};
use crate::enrichment::{Enrichment, EnrichmentError, commentary_prompt};
use crate::model::{ModelStore, PlattScaling};
use std::sync::Arc;

const FAKE_TEXT: &str = "Aliens spotted near towers";
const REAL_TEXT: &str = "Government launches energy scheme";

fn analyzer(enrichment: Enrichment) -> Analyzer {
    Analyzer::new(Some(Arc::new(ModelStore::sample())), enrichment)
}

fn offline() -> AnalysisParams {
    AnalysisParams {
        use_headlines: false,
        use_gemini: false,
        disable_translation: true,
        ..AnalysisParams::default()
    }
}

fn classes() -> Vec<String> {
    vec!["FAKE".to_string(), "REAL".to_string()]
}

mod scoring_tests {
    use super::*;

    #[test]
    fn test_damping_factor_without_similarity() {
        assert_eq!(damping_factor(None, 0.5), 1.0);
    }

    #[test]
    fn test_damping_factor_values() {
        assert!((damping_factor(Some(0.5), 0.5) - 0.75).abs() < 1e-12);
        assert!((damping_factor(Some(0.0), 1.0) - 0.0).abs() < 1e-12);
        assert!((damping_factor(Some(1.0), 0.8) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_damping_factor_clamps_similarity() {
        assert_eq!(damping_factor(Some(1.7), 0.5), 1.0);
        assert_eq!(damping_factor(Some(-0.3), 0.5), 0.5);
        assert_eq!(damping_factor(Some(f64::NAN), 0.5), 0.5);
    }

    #[test]
    fn test_damping_never_increases_magnitude() {
        for raw in [-3.0, -0.4, 0.2, 2.5] {
            for sim in [0.0, 0.25, 0.5, 0.99] {
                for weight in [0.1, 0.5, 1.0] {
                    let adjusted = adjust_score(raw, Some(sim), weight);
                    assert!(
                        adjusted.abs() < f64::abs(raw),
                        "raw={} sim={} weight={} adjusted={}",
                        raw,
                        sim,
                        weight,
                        adjusted
                    );
                    assert_eq!(adjusted.signum(), raw.signum());
                }
            }
        }
    }

    #[test]
    fn test_zero_weight_keeps_raw() {
        assert_eq!(adjust_score(-1.25, Some(0.1), 0.0), -1.25);
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999);
        assert!(sigmoid(-40.0) < 0.001);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_label_space_default_positive() {
        let labels = LabelSpace::resolve(&classes(), None);
        assert_eq!(labels.positive, "REAL");
        assert_eq!(labels.other, "FAKE");
        assert!(labels.positive_is_model_positive);
        assert!(labels.known);
    }

    #[test]
    fn test_label_space_negative_class_as_positive() {
        let labels = LabelSpace::resolve(&classes(), Some("FAKE"));
        assert_eq!(labels.positive, "FAKE");
        assert_eq!(labels.other, "REAL");
        assert!(!labels.positive_is_model_positive);
        assert!(labels.known);
        assert!((labels.oriented(2.0) - (1.0 - sigmoid(2.0))).abs() < 1e-12);
    }

    #[test]
    fn test_label_space_unknown_positive() {
        let labels = LabelSpace::resolve(&classes(), Some("SATIRE"));
        assert_eq!(labels.positive, "SATIRE");
        assert_eq!(labels.other, "FAKE");
        assert!(!labels.known);
    }

    #[test]
    fn test_deadband_yields_unsure() {
        let labels = LabelSpace::resolve(&classes(), None);
        let probability = ProbabilityEstimate {
            raw: 0.99,
            adjusted: 0.99,
            threshold: 0.6,
            source: ProbabilitySource::Logistic,
        };

        for score in [-0.49, -0.1, 0.0, 0.3, 0.49] {
            let verdict = decide_label(&labels, score, Some(&probability), 0.5);
            assert!(verdict.is_unsure(), "score {} should be UNSURE", score);
            assert_eq!(verdict.to_string(), "UNSURE");
        }
    }

    #[test]
    fn test_threshold_decides_label() {
        let labels = LabelSpace::resolve(&classes(), None);
        let mut probability = ProbabilityEstimate {
            raw: 0.7,
            adjusted: 0.6,
            threshold: 0.6,
            source: ProbabilitySource::Logistic,
        };

        let verdict = decide_label(&labels, 1.0, Some(&probability), 0.5);
        assert_eq!(verdict, Verdict::Label("REAL".to_string()));

        probability.adjusted = 0.59;
        let verdict = decide_label(&labels, 1.0, Some(&probability), 0.5);
        assert_eq!(verdict, Verdict::Label("FAKE".to_string()));
    }

    #[test]
    fn test_sign_fallback_without_probability() {
        let labels = LabelSpace::resolve(&classes(), None);
        assert_eq!(decide_label(&labels, 1.0, None, 0.5).as_str(), "REAL");
        assert_eq!(decide_label(&labels, -1.0, None, 0.5).as_str(), "FAKE");

        let flipped = LabelSpace::resolve(&classes(), Some("FAKE"));
        assert_eq!(decide_label(&flipped, 1.0, None, 0.5).as_str(), "REAL");
        assert_eq!(decide_label(&flipped, -1.0, None, 0.5).as_str(), "FAKE");
    }

    #[test]
    fn test_estimate_probability_logistic() {
        let model = ModelStore::sample();
        let labels = LabelSpace::resolve(model.class_labels(), None);

        let p = estimate_probability(model.classifier(), &labels, 1.0, 0.5, 0.6).unwrap();
        assert_eq!(p.source, ProbabilitySource::Logistic);
        assert!((p.raw - sigmoid(1.0)).abs() < 1e-12);
        assert!((p.adjusted - sigmoid(0.5)).abs() < 1e-12);
        assert_eq!(p.threshold, 0.6);
    }

    #[test]
    fn test_estimate_probability_calibrated_indexes_positive_label() {
        let model = ModelStore::sample_with_probability(Some(PlattScaling { a: -2.0, b: 0.0 }));
        let labels = LabelSpace::resolve(model.class_labels(), Some("FAKE"));

        let p = estimate_probability(model.classifier(), &labels, 1.0, 1.0, 0.6).unwrap();
        assert_eq!(p.source, ProbabilitySource::Calibrated);
        // P(REAL) = 1 / (1 + exp(-2)), so P(FAKE) is its complement.
        let p_real = 1.0 / (1.0 + (-2.0f64).exp());
        assert!((p.raw - (1.0 - p_real)).abs() < 1e-12);
        assert!((p.adjusted - (1.0 - sigmoid(1.0))).abs() < 1e-12);
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_headline_blocks() {
        assert_eq!(HeadlineOutcome::Disabled.block(), "(Headlines disabled)");
        assert_eq!(HeadlineOutcome::NoQuery.block(), "(No query provided)");
        assert_eq!(HeadlineOutcome::NoneFound.block(), "(No matching headlines)");
        assert_eq!(
            HeadlineOutcome::Unavailable {
                reason: "request timeout".to_string()
            }
            .block(),
            "(Headlines unavailable: request timeout)"
        );
        assert_eq!(
            HeadlineOutcome::Found {
                titles: vec!["A".to_string(), "B".to_string()]
            }
            .block(),
            "- A\n- B"
        );
    }

    #[test]
    fn test_commentary_blocks() {
        assert_eq!(
            CommentaryOutcome::Disabled.block(),
            "(Gemini disabled or unavailable)"
        );
        assert_eq!(
            CommentaryOutcome::Unavailable.block(),
            "(Gemini disabled or unavailable)"
        );
        assert_eq!(
            CommentaryOutcome::Failed {
                reason: "quota".to_string()
            }
            .block(),
            "❌ Gemini Error: quota"
        );
    }

    #[test]
    fn test_error_lines() {
        let lines = AnalysisError::EmptyInput.lines();
        assert_eq!(lines[0], "⚠️ Please enter news content.");
        assert!(lines[1..].iter().all(String::is_empty));

        let lines = AnalysisError::ModelUnavailable.lines();
        assert_eq!(lines[0], "❌ Model not available. Check model files.");
        assert!(lines[1..].iter().all(String::is_empty));
    }

    #[test]
    fn test_confidence_magnitude_shortest_form() {
        use crate::analysis::report::confidence_magnitude;

        assert_eq!(confidence_magnitude(1.5), "1.5");
        assert_eq!(confidence_magnitude(-0.75), "0.75");
        assert_eq!(confidence_magnitude(-1.963), "1.96");
        assert_eq!(confidence_magnitude(2.0), "2.0");
        assert_eq!(confidence_magnitude(0.0), "0.0");
        assert_eq!(confidence_magnitude(-0.001), "0.0");
    }

    #[test]
    fn test_empty_explanation() {
        assert_eq!(
            render_explanation(&[]),
            "Top contributing terms:\n(No strong token contributions detected)"
        );
    }

    #[test]
    fn test_warnings_serialize_with_kind() {
        let warning = AnalysisWarning::HeadlinesUnavailable {
            reason: "request timeout".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "headlines_unavailable");
        assert_eq!(json["reason"], "request timeout");
    }
}

mod params_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = AnalysisParams::default();
        assert!(params.use_headlines);
        assert!(params.use_gemini);
        assert!(!params.disable_translation);
        assert_eq!(params.margin, 0.5);
        assert_eq!(params.sim_weight, 0.5);
        assert_eq!(params.prob_threshold, 0.6);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let params = AnalysisParams {
            sim_weight: 1.5,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(AnalysisError::InvalidParameter { name: "simWeight", .. })
        ));

        let params = AnalysisParams {
            prob_threshold: -0.1,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(AnalysisError::InvalidParameter { name: "probThreshold", .. })
        ));

        let params = AnalysisParams {
            margin: f64::INFINITY,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(AnalysisError::InvalidParameter { name: "margin", .. })
        ));
    }

    #[test]
    fn test_blank_positive_label_is_absent() {
        let params = AnalysisParams {
            positive_label: Some("  ".to_string()),
            ..AnalysisParams::default()
        };
        assert_eq!(params.requested_positive_label(), None);

        let params = AnalysisParams {
            positive_label: Some("FAKE".to_string()),
            ..AnalysisParams::default()
        };
        assert_eq!(params.requested_positive_label(), Some("FAKE"));
    }
}

mod explain_tests {
    use super::*;

    fn explain(text: &str, top_k: usize) -> Vec<TermContribution> {
        let model = ModelStore::sample();
        let features = model.vectorizer().transform(text).unwrap();
        top_contributions(&model, &features, top_k)
    }

    #[test]
    fn test_negative_only_text_has_no_contributions() {
        // Absent terms score zero and fill the top ten ahead of every negative term.
        let terms = explain(FAKE_TEXT, 10);
        assert!(terms.is_empty());
        assert_eq!(
            render_explanation(&terms),
            "Top contributing terms:\n(No strong token contributions detected)"
        );
    }

    #[test]
    fn test_positive_terms_ranked_largest_first() {
        let terms = explain(REAL_TEXT, 10);
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["government", "energy", "launches", "scheme"]);
        assert!((terms[0].contribution - 0.5).abs() < 1e-9);
        assert!(terms.windows(2).all(|w| w[0].contribution >= w[1].contribution));
    }

    #[test]
    fn test_negative_terms_are_pushed_out_by_absent_terms() {
        let terms = explain("Vaccines save lives despite aliens", 10);
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["vaccines", "lives", "save"]);
    }

    #[test]
    fn test_negative_term_survives_when_vocabulary_is_exhausted() {
        // k covers the whole vocabulary, so nothing displaces the negative term.
        let terms = explain("Vaccines save lives despite aliens", 20);
        assert_eq!(terms.last().map(|t| t.term.as_str()), Some("aliens"));
        assert!(terms.last().unwrap().contribution < 0.0);
    }

    #[test]
    fn test_zero_k() {
        assert!(explain(REAL_TEXT, 0).is_empty());
    }

    #[test]
    fn test_rendered_contributions() {
        let rendered = render_explanation(&explain(REAL_TEXT, 2));
        assert_eq!(
            rendered,
            "Top contributing terms:\ngovernment: 0.500\nenergy: 0.450"
        );
    }
}

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let analyzer = analyzer(Enrichment::disabled());
        for text in ["", "   ", "\n\t"] {
            let err = analyzer.analyze(text, &offline()).await.unwrap_err();
            assert!(matches!(err, AnalysisError::EmptyInput));
        }
    }

    #[tokio::test]
    async fn test_missing_model() {
        let analyzer = Analyzer::new(None, Enrichment::disabled());
        assert!(!analyzer.model_loaded());

        let err = analyzer.analyze(FAKE_TEXT, &offline()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::ModelUnavailable));
        assert_eq!(err.lines()[0], "❌ Model not available. Check model files.");
    }

    #[tokio::test]
    async fn test_offline_fake_verdict() {
        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &offline())
            .await
            .unwrap();

        assert_eq!(report.label.as_str(), "FAKE");
        assert_eq!(report.predicted_label, "FAKE");
        assert!(report.raw_score < 0.0);
        assert_eq!(report.raw_score, report.adjusted_score);
        assert!(report.similarity.is_none());
        assert!(!report.translated);
        assert!(report.warnings.is_empty());

        let lines = report.lines();
        assert_eq!(lines[0], "🧠 Prediction: FAKE");
        assert_eq!(
            lines[1],
            "📊 Confidence (raw/adj): 1.96 / 1.96 | Prob (raw/adj): 0.12/0.12 | thr=0.60"
        );
        assert_eq!(lines[2], "📰 Headlines:\n(Headlines disabled)");
        assert_eq!(lines[3], "🤖 Gemini Insight:\n(Gemini disabled or unavailable)");
        assert_eq!(
            lines[4],
            "Top contributing terms:\n(No strong token contributions detected)"
        );
        assert_eq!(lines[5], "Cosine similarity: N/A");
    }

    #[tokio::test]
    async fn test_offline_real_verdict() {
        let report = analyzer(Enrichment::disabled())
            .analyze(REAL_TEXT, &offline())
            .await
            .unwrap();

        assert_eq!(report.label.as_str(), "REAL");
        assert!((report.raw_score - 1.6).abs() < 1e-9);
        let p = report.probability.unwrap();
        assert!(p.adjusted >= 0.6);
        assert_eq!(
            report.lines()[1],
            "📊 Confidence (raw/adj): 1.6 / 1.6 | Prob (raw/adj): 0.83/0.83 | thr=0.60"
        );
    }

    #[tokio::test]
    async fn test_unknown_vocabulary_is_unsure() {
        let report = analyzer(Enrichment::disabled())
            .analyze("Hello world, nothing to see here", &offline())
            .await
            .unwrap();

        assert_eq!(report.raw_score, 0.0);
        assert!(report.label.is_unsure());
        assert!(report.explanation.is_empty());
        assert_eq!(
            report.lines()[4],
            "Top contributing terms:\n(No strong token contributions detected)"
        );
    }

    #[tokio::test]
    async fn test_large_margin_forces_unsure() {
        let params = AnalysisParams {
            margin: 5.0,
            ..offline()
        };
        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert!(report.adjusted_score.abs() < params.margin);
        assert_eq!(report.lines()[0], "🧠 Prediction: UNSURE");
    }

    #[tokio::test]
    async fn test_identical_inputs_are_deterministic() {
        let enrichment = Enrichment::mock(&["Government launches energy scheme"]);
        let analyzer = analyzer(enrichment);
        let params = AnalysisParams::default();

        let first = analyzer.analyze(FAKE_TEXT, &params).await.unwrap();
        let second = analyzer.analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(first.adjusted_score, second.adjusted_score);
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.lines(), second.lines());
    }

    #[tokio::test]
    async fn test_unrelated_headlines_damp_score() {
        let source = Arc::new(MockHeadlineSource::returning(&[REAL_TEXT]));
        let enrichment = Enrichment::disabled().with_headline_source(source, 8);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(report.similarity, Some(0.0));
        assert!((report.adjusted_score - report.raw_score * 0.5).abs() < 1e-12);
        assert!(report.adjusted_score.abs() < report.raw_score.abs());
        assert_eq!(report.lines()[5], "Cosine similarity: 0.000");
        assert_eq!(
            report.lines()[2],
            format!("📰 Headlines:\n- {}", REAL_TEXT)
        );
    }

    #[tokio::test]
    async fn test_matching_headlines_keep_score() {
        let source = Arc::new(MockHeadlineSource::returning(&[FAKE_TEXT]));
        let enrichment = Enrichment::disabled().with_headline_source(source, 8);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        let sim = report.similarity.unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
        assert!((report.adjusted_score - report.raw_score).abs() < 1e-9);
        assert_eq!(report.lines()[5], "Cosine similarity: 1.000");
    }

    #[tokio::test]
    async fn test_headline_query_uses_first_five_words() {
        let source = Arc::new(
            MockHeadlineSource::returning(&[]).with_query("one two three four five", &["Hit"]),
        );
        let enrichment = Enrichment::disabled().with_headline_source(source, 8);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(enrichment)
            .analyze("one two  three four five six seven", &params)
            .await
            .unwrap();

        assert_eq!(report.headlines.titles(), &["Hit".to_string()]);
    }

    #[tokio::test]
    async fn test_no_headlines_found() {
        let source = Arc::new(MockHeadlineSource::returning(&[]));
        let enrichment = Enrichment::disabled().with_headline_source(source, 8);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(report.headlines, HeadlineOutcome::NoneFound);
        assert!(report.similarity.is_none());
        assert_eq!(report.lines()[2], "📰 Headlines:\n(No matching headlines)");
    }

    #[tokio::test]
    async fn test_repeated_query_hits_cache() {
        let source = Arc::new(MockHeadlineSource::returning(&["Cached title"]));
        let enrichment = Enrichment::disabled().with_headline_source(source.clone(), 8);
        let analyzer = analyzer(enrichment);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let first = analyzer.analyze(FAKE_TEXT, &params).await.unwrap();
        let second = analyzer.analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first.lines()[2], second.lines()[2]);
        assert_eq!(analyzer.enrichment().headline_cache_entries(), 1);
    }

    #[tokio::test]
    async fn test_headline_failure_degrades() {
        let source = Arc::new(MockHeadlineSource::failing(EnrichmentError::NetworkTimeout {
            service: "headlines",
        }));
        let enrichment = Enrichment::disabled().with_headline_source(source, 8);
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();
        let lines = report.lines();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "🧠 Prediction: FAKE");
        assert_eq!(lines[2], "📰 Headlines:\n(Headlines unavailable: request timeout)");
        assert_eq!(lines[5], "Cosine similarity: N/A");
        assert!(report.warnings.contains(&AnalysisWarning::HeadlinesUnavailable {
            reason: "request timeout".to_string()
        }));
    }

    #[tokio::test]
    async fn test_missing_headline_source_degrades() {
        let params = AnalysisParams {
            use_headlines: true,
            ..offline()
        };

        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert!(matches!(report.headlines, HeadlineOutcome::Unavailable { .. }));
        assert_eq!(report.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_translation_applies_before_scoring() {
        let translator = Arc::new(MockTranslator::returning(FAKE_TEXT));
        let enrichment = Enrichment::disabled().with_translator(translator.clone());
        let params = AnalysisParams {
            disable_translation: false,
            ..offline()
        };

        let report = analyzer(enrichment)
            .analyze("Extraterrestres vistos cerca de torres", &params)
            .await
            .unwrap();

        assert_eq!(translator.calls(), 1);
        assert!(report.translated);
        assert_eq!(report.label.as_str(), "FAKE");
    }

    #[tokio::test]
    async fn test_translation_disabled_skips_translator() {
        let translator = Arc::new(MockTranslator::returning("ignored"));
        let enrichment = Enrichment::disabled().with_translator(translator.clone());

        let report = analyzer(enrichment)
            .analyze(FAKE_TEXT, &offline())
            .await
            .unwrap();

        assert_eq!(translator.calls(), 0);
        assert!(!report.translated);
        assert_eq!(report.label.as_str(), "FAKE");
    }

    #[tokio::test]
    async fn test_translation_failure_falls_back_to_original() {
        let translator = Arc::new(MockTranslator::failing(EnrichmentError::Network {
            service: "translation",
            reason: "connection reset".to_string(),
        }));
        let enrichment = Enrichment::disabled().with_translator(translator);
        let params = AnalysisParams {
            disable_translation: false,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        assert!(!report.translated);
        assert_eq!(report.label.as_str(), "FAKE");
        assert!(matches!(
            report.warnings.as_slice(),
            [AnalysisWarning::TranslationFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn test_missing_translator_warns() {
        let params = AnalysisParams {
            disable_translation: false,
            ..offline()
        };

        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert_eq!(report.warnings, vec![AnalysisWarning::TranslationUnavailable]);
    }

    #[tokio::test]
    async fn test_commentary_uses_prompt_with_headlines() {
        let commentator = Arc::new(MockCommentator::replying("Headlines disagree."));
        let source = Arc::new(MockHeadlineSource::returning(&["H1", "H2"]));
        let enrichment = Enrichment::disabled()
            .with_headline_source(source, 8)
            .with_commentator(commentator.clone());
        let params = AnalysisParams {
            use_headlines: true,
            use_gemini: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(
            commentator.last_prompt().as_deref(),
            Some(commentary_prompt(FAKE_TEXT, "- H1\n- H2").as_str())
        );
        assert_eq!(report.lines()[3], "🤖 Gemini Insight:\nHeadlines disagree.");
    }

    #[tokio::test]
    async fn test_commentary_failure_is_reported_inline() {
        let commentator = Arc::new(MockCommentator::failing(EnrichmentError::NetworkTimeout {
            service: "gemini",
        }));
        let enrichment = Enrichment::disabled().with_commentator(commentator);
        let params = AnalysisParams {
            use_gemini: true,
            ..offline()
        };

        let report = analyzer(enrichment).analyze(FAKE_TEXT, &params).await.unwrap();

        assert_eq!(
            report.lines()[3],
            "🤖 Gemini Insight:\n❌ Gemini Error: gemini request timeout"
        );
        assert!(matches!(
            report.warnings.as_slice(),
            [AnalysisWarning::CommentaryFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn test_commentary_without_key() {
        let params = AnalysisParams {
            use_gemini: true,
            ..offline()
        };

        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert_eq!(report.commentary, CommentaryOutcome::Unavailable);
        assert_eq!(report.warnings, vec![AnalysisWarning::CommentaryUnavailable]);
    }

    #[tokio::test]
    async fn test_positive_label_flips_orientation() {
        let params = AnalysisParams {
            positive_label: Some("FAKE".to_string()),
            ..offline()
        };

        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert_eq!(report.positive_label, "FAKE");
        assert_eq!(report.label.as_str(), "FAKE");
        let p = report.probability.unwrap();
        assert!(p.adjusted > 0.8);
    }

    #[tokio::test]
    async fn test_unknown_positive_label_warns() {
        let params = AnalysisParams {
            positive_label: Some("SATIRE".to_string()),
            ..offline()
        };

        let report = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap();

        assert!(report.warnings.contains(&AnalysisWarning::UnknownPositiveLabel {
            label: "SATIRE".to_string()
        }));
    }

    #[tokio::test]
    async fn test_invalid_params_are_rejected() {
        let params = AnalysisParams {
            sim_weight: 2.0,
            ..offline()
        };

        let err = analyzer(Enrichment::disabled())
            .analyze(FAKE_TEXT, &params)
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_extract_url_without_extractor() {
        let (text, warning) = analyzer(Enrichment::disabled())
            .extract_url("https://example.com")
            .await;

        assert_eq!(text, "(URL scraping unavailable: URL extraction is disabled)");
        assert_eq!(
            warning,
            Some(AnalysisWarning::UrlExtractionFailed {
                reason: "scraper unavailable: URL extraction is disabled".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_extract_url_success_has_no_warning() {
        let extractor = MockPageExtractor::default().with_page("https://news.test/a", REAL_TEXT);
        let (text, warning) = analyzer(Enrichment::disabled().with_extractor(Arc::new(extractor)))
            .extract_url("https://news.test/a")
            .await;

        assert_eq!(text, REAL_TEXT);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_extract_url_failures_become_placeholder_text() {
        let extractor = MockPageExtractor::default().with_page("https://news.test/blank", "  ");
        let analyzer = analyzer(Enrichment::disabled().with_extractor(Arc::new(extractor)));

        let (text, warning) = analyzer.extract_url("https://news.test/blank").await;
        assert_eq!(text, "⚠️ No text extracted from URL");
        assert!(warning.is_some());

        let (text, _) = analyzer.extract_url("https://news.test/missing").await;
        assert_eq!(text, "❌ URL fetch error: HTTP 404");

        // The placeholder still runs through the whole pipeline.
        let report = analyzer.analyze(&text, &offline()).await.unwrap();
        assert_eq!(report.lines().len(), 6);
        assert!(report.label.is_unsure());
    }

    #[test]
    fn test_extraction_placeholders() {
        use crate::enrichment::extraction_placeholder;

        assert_eq!(
            extraction_placeholder(&EnrichmentError::NetworkTimeout { service: "scraper" }),
            "❌ URL fetch timeout"
        );
        assert_eq!(
            extraction_placeholder(&EnrichmentError::Network {
                service: "scraper",
                reason: "connection refused".to_string()
            }),
            "❌ URL fetch error: connection refused"
        );
    }
}
