//! Sparse feature vectors produced by the vectorizer.

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Row normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

/// Sparse vector with strictly increasing indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Creates an all-zero vector of dimension `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a vector from `(index, value)` pairs. Pairs are sorted, explicit
    /// zeros are dropped, and indices must be unique and below `dim`.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Result<Self, ModelError> {
        pairs.sort_by_key(|(index, _)| *index);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        let mut last = None;

        for (index, value) in pairs {
            if index >= dim {
                return Err(ModelError::DimensionMismatch {
                    expected: dim,
                    actual: index + 1,
                });
            }
            if last == Some(index) {
                return Err(ModelError::VectorizationFailed {
                    reason: format!("duplicate feature index {}", index),
                });
            }
            last = Some(index);
            if value != 0.0 {
                indices.push(index);
                values.push(value);
            }
        }

        Ok(Self {
            dim,
            indices,
            values,
        })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index` (zero when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn l1_norm(&self) -> f64 {
        self.values.iter().map(|v| v.abs()).sum()
    }

    /// Dot product against a dense weight vector of the same dimension.
    pub fn dot_dense(&self, dense: &[f64]) -> Result<f64, ModelError> {
        if dense.len() != self.dim {
            return Err(ModelError::DimensionMismatch {
                expected: dense.len(),
                actual: self.dim,
            });
        }

        Ok(self.iter().map(|(i, v)| v * dense[i]).sum())
    }

    /// Dot product of two sparse vectors (merge over sorted indices).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0;

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }

        acc
    }

    /// Scales the vector in place by the requested norm. A zero vector stays zero.
    pub fn normalize(&mut self, norm: Norm) -> Result<(), ModelError> {
        let length = match norm {
            Norm::L1 => self.l1_norm(),
            Norm::L2 => self.l2_norm(),
            Norm::None => return self.ensure_finite(),
        };

        if !length.is_finite() {
            return Err(ModelError::VectorizationFailed {
                reason: "feature weights overflowed during normalization".to_string(),
            });
        }

        if length > 0.0 {
            for value in &mut self.values {
                *value /= length;
            }
        }

        self.ensure_finite()
    }

    fn ensure_finite(&self) -> Result<(), ModelError> {
        if self.values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(ModelError::VectorizationFailed {
                reason: "non-finite feature weight".to_string(),
            })
        }
    }
}

/// Cosine similarity of two sparse vectors.
///
/// Returns `0.0` when either vector has zero norm or the dimensions differ.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.dim() != b.dim() {
        return 0.0;
    }

    let norm_a = a.l2_norm();
    let norm_b = b.l2_norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}
