//! TF-IDF vectorizer compatible with a scikit-learn `TfidfVectorizer` export.
//!
//! Tokens are `\b\w\w+\b` matches on the (optionally lowercased) text. Stop
//! words are removed before word n-grams are formed, and terms outside the
//! vocabulary are ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use super::error::ModelError;
use super::sparse::{Norm, SparseVector};
use super::read_artifact;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// On-disk representation of the vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    feature_names: Vec<String>,
    idf: Vec<f64>,
    lowercase: bool,
    stop_words: HashSet<String>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    token_pattern: Regex,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.feature_names.len())
            .field("stop_words", &self.stop_words.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Loads and validates a JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: VectorizerArtifact = read_artifact(path)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ModelError> {
        let size = artifact.vocabulary.len();
        if size == 0 {
            return Err(ModelError::InvalidArtifact {
                reason: "vectorizer vocabulary is empty".to_string(),
            });
        }

        if artifact.idf.len() != size {
            return Err(ModelError::InvalidArtifact {
                reason: format!(
                    "idf has {} entries but vocabulary has {} terms",
                    artifact.idf.len(),
                    size
                ),
            });
        }

        if let Some(bad) = artifact.idf.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::InvalidArtifact {
                reason: format!("idf value at index {} is not finite", bad),
            });
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::InvalidArtifact {
                reason: format!("invalid ngram_range ({}, {})", min_n, max_n),
            });
        }

        let mut feature_names: Vec<Option<String>> = vec![None; size];
        for (term, &index) in &artifact.vocabulary {
            let slot = feature_names
                .get_mut(index)
                .ok_or_else(|| ModelError::InvalidArtifact {
                    reason: format!("vocabulary index {} out of range for '{}'", index, term),
                })?;
            if slot.is_some() {
                return Err(ModelError::InvalidArtifact {
                    reason: format!("vocabulary index {} assigned twice", index),
                });
            }
            *slot = Some(term.clone());
        }
        // Sizes match and indices are unique and in range, so every slot is filled.
        let feature_names: Vec<String> = feature_names.into_iter().flatten().collect();

        let token_pattern = Regex::new(TOKEN_PATTERN).map_err(|e| ModelError::InvalidArtifact {
            reason: format!("token pattern failed to compile: {}", e),
        })?;

        let stop_words = artifact
            .stop_words
            .into_iter()
            .map(|w| if artifact.lowercase { w.to_lowercase() } else { w })
            .collect();

        debug!(vocabulary_size = size, "Vectorizer artifact validated");

        Ok(Self {
            vocabulary: artifact.vocabulary,
            feature_names,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            stop_words,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            token_pattern,
        })
    }

    /// Number of features (vocabulary terms).
    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.feature_names.len()
    }

    /// Vocabulary terms ordered by feature index.
    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Splits text into the tokens the vocabulary was built from.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect()
    }

    /// Converts text into a normalized TF-IDF vector.
    pub fn transform(&self, text: &str) -> Result<SparseVector, ModelError> {
        let prepared = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens = self.tokenize(&prepared);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                let index = if n == 1 {
                    self.vocabulary.get(window[0])
                } else {
                    self.vocabulary.get(&window.join(" "))
                };
                if let Some(&index) = index {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (index, tf * self.idf[index])
            })
            .collect();

        let mut vector = SparseVector::from_pairs(self.vocabulary_size(), pairs)?;
        vector.normalize(self.norm)?;
        Ok(vector)
    }
}
