// src/utils/logging.rs - Logging helpers for reconciliation runs
use log::{debug, info, warn};
use std::time::Instant;

use crate::error::SourceKind;
use crate::reconciliation::report::Report;

fn source_emoji(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::InternalCatalog => "📚",
        SourceKind::LiveInventory => "🛎️",
    }
}

#[derive(Clone)]
pub struct ReconciliationLogger {
    run_id: String,
    start_time: Instant,
}

impl ReconciliationLogger {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, region: &str, matcher: &str, threshold: f64) {
        info!(
            "[RECON] 🚀 Starting reconciliation for region '{}' (run ID: {}, matcher: {}, threshold: {:.2})",
            region, self.run_id, matcher, threshold
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        match details {
            Some(details) => info!(
                "[RECON] 🔄 Phase: {} - {} [+{:.1}s]",
                phase,
                details,
                elapsed.as_secs_f32()
            ),
            None => info!("[RECON] 🔄 Phase: {} [+{:.1}s]", phase, elapsed.as_secs_f32()),
        }
    }

    pub fn log_source_loaded(&self, kind: SourceKind, count: usize) {
        info!(
            "[RECON] {} 📊 Loaded {} listings from {}",
            source_emoji(kind),
            count,
            kind
        );
    }

    pub fn log_source_failed(&self, kind: SourceKind, reason: &str) {
        warn!(
            "[RECON] {} ⚠️  {} unavailable, continuing with an empty pool: {}",
            source_emoji(kind),
            kind,
            reason
        );
    }

    pub fn log_completion(&self, report: &Report) {
        let duration = self.start_time.elapsed();
        info!(
            "[RECON] 🎉 COMPLETED in {:.2?}: status {}, {} matched, {} internal-only, {} external-only",
            duration,
            report.status.as_str(),
            report.counts.matched,
            report.counts.unmatched_internal,
            report.counts.unmatched_external
        );
        info!(
            "[RECON] 📈 Match rate {:.1}%, avg confidence {:.3}",
            report.match_rate * 100.0,
            report.avg_confidence
        );
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[RECON] {}", message);
    }
}
