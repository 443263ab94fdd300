// src/matching/matcher.rs - One-to-one assignment between internal and external listing pools
use log::{debug, info};

use crate::error::ReconError;
use crate::matching::name::normalize_name;
use crate::matching::similarity::SimilarityScorer;
use crate::models::{ExternalListing, InternalListing, MatchCandidate, MatchResult, MatchedPair};
use crate::utils::config::MatchPolicy;

/// Assignment strategy between the two pools. Implementations must return a
/// partition: each listing appears in exactly one pair or one unmatched bucket.
pub trait ListingMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn threshold(&self) -> f64;

    fn match_listings(
        &self,
        internals: Vec<InternalListing>,
        externals: Vec<ExternalListing>,
    ) -> Result<MatchResult, ReconError>;
}

/// Greedy, external-driven matcher.
///
/// Externals are visited in the order received. Each one claims the still
/// available internal listing with the highest score, provided that score is
/// strictly above the threshold. Ties go to the internal listing that comes
/// first in pool order. Decisions are never revisited, so the outcome depends
/// on input order and is not a maximum-weight assignment.
#[derive(Debug, Clone, Copy)]
pub struct GreedyMatcher {
    scorer: SimilarityScorer,
    threshold: f64,
}

impl GreedyMatcher {
    pub fn new(scorer: SimilarityScorer, threshold: f64) -> Result<Self, ReconError> {
        validate_threshold(threshold)?;
        Ok(Self { scorer, threshold })
    }

    pub fn from_policy(policy: &MatchPolicy) -> Result<Self, ReconError> {
        Self::new(SimilarityScorer::new(policy.containment_score)?, policy.threshold)
    }
}

impl ListingMatcher for GreedyMatcher {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn match_listings(
        &self,
        internals: Vec<InternalListing>,
        externals: Vec<ExternalListing>,
    ) -> Result<MatchResult, ReconError> {
        validate_names(&internals, &externals)?;

        let mut available: Vec<InternalListing> = internals;
        let mut available_names: Vec<String> =
            available.iter().map(|l| normalize_name(&l.name)).collect();

        let mut matched_pairs = Vec::new();
        let mut unmatched_external = Vec::new();

        for external in externals {
            let external_name = normalize_name(&external.name);

            let mut best: Option<(usize, MatchCandidate<'_>)> = None;
            for (idx, internal) in available.iter().enumerate() {
                let score = self
                    .scorer
                    .score_normalized(&available_names[idx], &external_name);
                let improves = best.map_or(true, |(_, c)| score > c.similarity);
                if improves {
                    best = Some((
                        idx,
                        MatchCandidate {
                            internal,
                            external: &external,
                            similarity: score,
                        },
                    ));
                }
            }

            let claimed = best
                .filter(|(_, c)| c.similarity > self.threshold)
                .map(|(idx, c)| (idx, c.similarity));

            match claimed {
                Some((idx, similarity)) => {
                    let internal = available.remove(idx);
                    available_names.remove(idx);
                    debug!(
                        "Matched external '{}' ({}) -> internal '{}' ({}) at {:.3}",
                        external.name, external.provider_id, internal.name, internal.id, similarity
                    );
                    matched_pairs.push(MatchedPair {
                        internal,
                        external,
                        similarity,
                    });
                }
                None => unmatched_external.push(external),
            }
        }

        let result = MatchResult {
            matched_pairs,
            unmatched_internal: available,
            unmatched_external,
        };
        info!(
            "Greedy matching (threshold {:.2}): {} matched, {} internal-only, {} external-only",
            self.threshold,
            result.matched_pairs.len(),
            result.unmatched_internal.len(),
            result.unmatched_external.len()
        );
        Ok(result)
    }
}

/// Greedy matching with the default containment score.
pub fn match_listings(
    internals: Vec<InternalListing>,
    externals: Vec<ExternalListing>,
    threshold: f64,
) -> Result<MatchResult, ReconError> {
    GreedyMatcher::new(SimilarityScorer::default(), threshold)?.match_listings(internals, externals)
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), ReconError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ReconError::invalid(format!(
            "match threshold {} outside [0, 1]",
            threshold
        )));
    }
    Ok(())
}

fn validate_names(
    internals: &[InternalListing],
    externals: &[ExternalListing],
) -> Result<(), ReconError> {
    if let Some(bad) = internals.iter().find(|l| l.name.trim().is_empty()) {
        return Err(ReconError::invalid(format!(
            "internal listing {} has no name",
            bad.id
        )));
    }
    if let Some(bad) = externals.iter().find(|l| l.name.trim().is_empty()) {
        return Err(ReconError::invalid(format!(
            "external listing {} has no name",
            bad.provider_id
        )));
    }
    Ok(())
}
