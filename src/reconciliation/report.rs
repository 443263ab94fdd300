// src/reconciliation/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ExternalListing, InternalListing, MatchResult, MatchedPair};

/// Overall health of a reconciliation run. Callers branch on this rather
/// than on errors for the zero-result cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReconciliationStatus {
    Ok,
    PartialInternal,
    PartialExternal,
    NoData,
}

impl ReconciliationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationStatus::Ok => "ok",
            ReconciliationStatus::PartialInternal => "partialInternal",
            ReconciliationStatus::PartialExternal => "partialExternal",
            ReconciliationStatus::NoData => "noData",
        }
    }
}

/// Which fetches failed. A source that answered with zero rows did not fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceWarnings {
    pub internal_failed: bool,
    pub external_failed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCounts {
    pub internal_total: usize,
    pub external_total: usize,
    pub matched: usize,
    pub unmatched_internal: usize,
    pub unmatched_external: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub status: ReconciliationStatus,
    pub warnings: SourceWarnings,
    /// Human-readable reasons for failed fetches.
    pub messages: Vec<String>,
    pub matcher: Option<String>,
    pub threshold: Option<f64>,
    pub counts: ReportCounts,
    /// `matched / max(1, internal_total)`
    pub match_rate: f64,
    pub avg_confidence: f64,
    pub matched_pairs: Vec<MatchedPair>,
    pub unmatched_internal: Vec<InternalListing>,
    pub unmatched_external: Vec<ExternalListing>,
}

impl Report {
    pub fn with_matcher(mut self, matcher: &str, threshold: f64) -> Self {
        self.matcher = Some(matcher.to_string());
        self.threshold = Some(threshold);
        self
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }
}

pub fn derive_status(counts: &ReportCounts, warnings: &SourceWarnings) -> ReconciliationStatus {
    if counts.internal_total == 0 && counts.external_total == 0 {
        ReconciliationStatus::NoData
    } else if warnings.internal_failed {
        ReconciliationStatus::PartialInternal
    } else if warnings.external_failed {
        ReconciliationStatus::PartialExternal
    } else {
        ReconciliationStatus::Ok
    }
}

/// Aggregates a match partition into a report.
pub fn build_report(result: MatchResult, warnings: SourceWarnings) -> Report {
    let counts = ReportCounts {
        internal_total: result.internal_total(),
        external_total: result.external_total(),
        matched: result.matched_pairs.len(),
        unmatched_internal: result.unmatched_internal.len(),
        unmatched_external: result.unmatched_external.len(),
    };
    let match_rate = counts.matched as f64 / counts.internal_total.max(1) as f64;
    let avg_confidence = result.avg_confidence();

    Report {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        status: derive_status(&counts, &warnings),
        warnings,
        messages: Vec::new(),
        matcher: None,
        threshold: None,
        counts,
        match_rate,
        avg_confidence,
        matched_pairs: result.matched_pairs,
        unmatched_internal: result.unmatched_internal,
        unmatched_external: result.unmatched_external,
    }
}
