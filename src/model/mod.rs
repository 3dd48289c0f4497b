//! Model store: TF-IDF vectorizer + linear classifier loaded from JSON artifacts.
//!
//! Artifacts load once at startup and are read-only afterwards. A missing or
//! invalid artifact leaves the service running with `model_loaded = false`.

pub mod classifier;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod sparse;
pub mod vectorizer;


pub use classifier::{ClassifierArtifact, LinearClassifier, PlattScaling};
pub use error::ModelError;
pub use sparse::{Norm, SparseVector, cosine_similarity};
pub use vectorizer::{TfidfVectorizer, VectorizerArtifact};

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{error, info};

pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    if !path.exists() {
        return Err(ModelError::ArtifactNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ModelError::ArtifactRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ModelError::ArtifactParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Classifier and vectorizer pair, checked to agree on the feature space.
#[derive(Debug)]
pub struct ModelStore {
    classifier: LinearClassifier,
    vectorizer: TfidfVectorizer,
}

impl ModelStore {
    /// Loads both artifacts from disk.
    pub fn load(classifier_path: &Path, vectorizer_path: &Path) -> Result<Self, ModelError> {
        let vectorizer = TfidfVectorizer::load(vectorizer_path)?;
        let classifier = LinearClassifier::load(classifier_path)?;
        let store = Self::from_parts(classifier, vectorizer)?;

        info!(
            classifier = %classifier_path.display(),
            vectorizer = %vectorizer_path.display(),
            features = store.vectorizer.vocabulary_size(),
            classes = ?store.classifier.classes(),
            calibrated = store.classifier.supports_probability(),
            "Model artifacts loaded"
        );

        Ok(store)
    }

    /// Loads both artifacts, logging and returning `None` on failure.
    pub fn load_or_degrade(classifier_path: &Path, vectorizer_path: &Path) -> Option<Self> {
        match Self::load(classifier_path, vectorizer_path) {
            Ok(store) => Some(store),
            Err(e) => {
                error!(error = %e, "Failed to load model artifacts; analysis disabled");
                None
            }
        }
    }

    pub fn from_parts(
        classifier: LinearClassifier,
        vectorizer: TfidfVectorizer,
    ) -> Result<Self, ModelError> {
        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(ModelError::DimensionMismatch {
                expected: vectorizer.vocabulary_size(),
                actual: classifier.n_features(),
            });
        }

        Ok(Self {
            classifier,
            vectorizer,
        })
    }

    #[inline]
    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    #[inline]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Class labels in model order.
    #[inline]
    pub fn class_labels(&self) -> &[String] {
        self.classifier.classes()
    }
}
