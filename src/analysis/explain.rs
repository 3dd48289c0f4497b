use serde::Serialize;
use std::cmp::Ordering;

use crate::model::{ModelStore, SparseVector};

/// One vocabulary term's share of the decision score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    pub term: String,
    pub contribution: f64,
}

/// Ranks every vocabulary term by `x[i] * coef[i]`, keeps the `top_k` largest,
/// then drops the terms absent from the text.
///
/// Absent terms contribute exactly zero, so they outrank every negative
/// contribution. Text whose active terms all lean negative explains nothing.
pub fn top_contributions(
    model: &ModelStore,
    features: &SparseVector,
    top_k: usize,
) -> Vec<TermContribution> {
    if top_k == 0 {
        return Vec::new();
    }

    let names = model.vectorizer().feature_names();
    let coef = model.classifier().coefficients();

    let mut dense = vec![0.0; coef.len()];
    for (i, x) in features.iter() {
        if let Some(slot) = dense.get_mut(i) {
            *slot = x;
        }
    }

    let mut ranked: Vec<(usize, f64)> = dense
        .iter()
        .zip(coef)
        .map(|(x, w)| x * w)
        .enumerate()
        .collect();

    let by_contribution = |a: &(usize, f64), b: &(usize, f64)| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    };
    if ranked.len() > top_k {
        ranked.select_nth_unstable_by(top_k - 1, by_contribution);
        ranked.truncate(top_k);
    }
    ranked.sort_by(by_contribution);

    ranked
        .into_iter()
        .filter(|(i, _)| dense[*i] != 0.0)
        .filter_map(|(i, contribution)| {
            names.get(i).map(|term| TermContribution {
                term: term.clone(),
                contribution,
            })
        })
        .collect()
}

pub fn render_explanation(terms: &[TermContribution]) -> String {
    if terms.is_empty() {
        return "Top contributing terms:\n(No strong token contributions detected)".to_string();
    }

    let lines: Vec<String> = terms
        .iter()
        .map(|t| format!("{}: {:.3}", t.term, t.contribution))
        .collect();
    format!("Top contributing terms:\n{}", lines.join("\n"))
}
