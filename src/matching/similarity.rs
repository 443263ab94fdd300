// src/matching/similarity.rs - Bounded name similarity for listing reconciliation
use strsim::levenshtein;

use crate::error::ReconError;
use crate::matching::name::normalize_name;
use crate::utils::constants::DEFAULT_CONTAINMENT_SCORE;

/// Scores two listing names in `[0, 1]`.
///
/// Equal normalized names score `1.0`. When one normalized name is a non-empty
/// substring of the other the score is `containment_score`. Everything else
/// falls back to `1 - levenshtein / max_len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    containment_score: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            containment_score: DEFAULT_CONTAINMENT_SCORE,
        }
    }
}

impl SimilarityScorer {
    pub fn new(containment_score: f64) -> Result<Self, ReconError> {
        if !containment_score.is_finite() || !(0.0..=1.0).contains(&containment_score) {
            return Err(ReconError::invalid(format!(
                "containment score {} outside [0, 1]",
                containment_score
            )));
        }
        Ok(Self { containment_score })
    }

    /// Normalizes both names, then scores them.
    pub fn score(&self, name_a: &str, name_b: &str) -> f64 {
        self.score_normalized(&normalize_name(name_a), &normalize_name(name_b))
    }

    /// Scores names that have already been through `normalize_name`.
    pub fn score_normalized(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        if (!a.is_empty() && b.contains(a)) || (!b.is_empty() && a.contains(b)) {
            return self.containment_score;
        }

        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            // Unreachable: two empty strings are equal.
            return 1.0;
        }
        let distance = levenshtein(a, b);
        (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
    }
}

/// Similarity with the default containment score.
pub fn similarity(name_a: &str, name_b: &str) -> f64 {
    SimilarityScorer::default().score(name_a, name_b)
}
