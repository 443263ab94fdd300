// src/models/matching.rs
use serde::Serialize;

use super::listing::{ExternalListing, InternalListing};

/// A scored pairing under consideration. Lives only inside a matcher pass.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub internal: &'a InternalListing,
    pub external: &'a ExternalListing,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
    pub internal: InternalListing,
    pub external: ExternalListing,
    pub similarity: f64,
}

/// Partition of both pools. Every input listing lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_pairs: Vec<MatchedPair>,
    pub unmatched_internal: Vec<InternalListing>,
    pub unmatched_external: Vec<ExternalListing>,
}

impl MatchResult {
    pub fn internal_total(&self) -> usize {
        self.matched_pairs.len() + self.unmatched_internal.len()
    }

    pub fn external_total(&self) -> usize {
        self.matched_pairs.len() + self.unmatched_external.len()
    }

    pub fn avg_confidence(&self) -> f64 {
        if self.matched_pairs.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.matched_pairs.iter().map(|p| p.similarity).sum();
        sum / self.matched_pairs.len() as f64
    }
}
