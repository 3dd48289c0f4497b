//! Small hand-built model for tests and local runs.

use std::collections::HashMap;

use super::{
    ClassifierArtifact, LinearClassifier, ModelStore, Norm, PlattScaling, TfidfVectorizer,
    VectorizerArtifact,
};

/// `(term, coefficient)` pairs; negative weights lean FAKE, positive lean REAL.
const SAMPLE_TERMS: &[(&str, f64)] = &[
    ("aliens", -1.4),
    ("spotted", -0.9),
    ("towers", -1.1),
    ("spread", -0.8),
    ("virus", -0.7),
    ("miracle", -1.2),
    ("vaccines", 1.3),
    ("save", 0.8),
    ("lives", 0.9),
    ("government", 1.0),
    ("launches", 0.7),
    ("energy", 0.9),
    ("scheme", 0.6),
    ("york", 0.0),
];

const SAMPLE_STOP_WORDS: &[&str] = &["the", "in", "a", "of", "and", "new"];

pub fn sample_vectorizer_artifact() -> VectorizerArtifact {
    let vocabulary: HashMap<String, usize> = SAMPLE_TERMS
        .iter()
        .enumerate()
        .map(|(i, (term, _))| (term.to_string(), i))
        .collect();

    VectorizerArtifact {
        vocabulary,
        idf: vec![1.0; SAMPLE_TERMS.len()],
        lowercase: true,
        stop_words: SAMPLE_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        ngram_range: (1, 1),
        sublinear_tf: false,
        norm: Norm::L2,
    }
}

pub fn sample_classifier_artifact() -> ClassifierArtifact {
    ClassifierArtifact {
        classes: Some(vec!["FAKE".to_string(), "REAL".to_string()]),
        coef: SAMPLE_TERMS.iter().map(|(_, w)| *w).collect(),
        intercept: 0.0,
        probability: None,
    }
}

impl ModelStore {
    /// Uncalibrated sample model (probabilities fall back to the logistic transform).
    pub fn sample() -> Self {
        Self::sample_with_probability(None)
    }

    /// Sample model with an optional Platt calibration.
    pub fn sample_with_probability(probability: Option<PlattScaling>) -> Self {
        let vectorizer = TfidfVectorizer::from_artifact(sample_vectorizer_artifact())
            .expect("sample vectorizer is valid");
        let mut artifact = sample_classifier_artifact();
        artifact.probability = probability;
        let classifier =
            LinearClassifier::from_artifact(artifact).expect("sample classifier is valid");
        Self::from_parts(classifier, vectorizer).expect("sample parts agree")
    }
}
