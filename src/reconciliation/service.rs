// src/reconciliation/service.rs - Fetches both pools concurrently, matches, and reports
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::error::{ReconError, SourceKind};
use crate::matching::matcher::{GreedyMatcher, ListingMatcher};
use crate::reconciliation::report::{build_report, Report, SourceWarnings};
use crate::sources::{CatalogQuery, CatalogSource, InventoryQuery, InventorySource};
use crate::utils::config::ReconciliationConfig;
use crate::utils::logging::ReconciliationLogger;

/// Stateless across calls: every `reconcile` owns its pools, so one service
/// can be shared between concurrent requests.
pub struct ReconciliationService {
    catalog: Arc<dyn CatalogSource>,
    inventory: Arc<dyn InventorySource>,
    matcher: Arc<dyn ListingMatcher>,
    catalog_timeout: Duration,
    inventory_timeout: Duration,
}

impl ReconciliationService {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        inventory: Arc<dyn InventorySource>,
        config: &ReconciliationConfig,
    ) -> Result<Self, ReconError> {
        let matcher = Arc::new(GreedyMatcher::from_policy(&config.policy)?);
        Ok(Self {
            catalog,
            inventory,
            matcher,
            catalog_timeout: config.catalog_timeout,
            inventory_timeout: config.inventory_timeout,
        })
    }

    /// Swaps the assignment strategy. Scoring and reporting are unaffected.
    pub fn with_matcher(mut self, matcher: Arc<dyn ListingMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Runs one reconciliation pass.
    ///
    /// A failed or timed-out fetch degrades its pool to empty and is recorded
    /// in the report warnings. Only caller contract violations (for example a
    /// listing without a name) come back as `Err`.
    pub async fn reconcile(
        &self,
        catalog_query: &CatalogQuery,
        inventory_query: &InventoryQuery,
    ) -> Result<Report, ReconError> {
        let run_id = Uuid::new_v4();
        let logger = ReconciliationLogger::new(&run_id.to_string());
        logger.log_start(
            &catalog_query.region,
            self.matcher.name(),
            self.matcher.threshold(),
        );

        logger.log_phase("Fetching sources", Some("catalog and live inventory in parallel"));
        let (catalog_outcome, inventory_outcome) = tokio::join!(
            fetch_pool(
                SourceKind::InternalCatalog,
                self.catalog_timeout,
                self.catalog.fetch_listings(catalog_query),
            ),
            fetch_pool(
                SourceKind::LiveInventory,
                self.inventory_timeout,
                self.inventory.search(inventory_query),
            ),
        );

        let mut warnings = SourceWarnings::default();
        let mut messages = Vec::new();
        let internals = recover(
            catalog_outcome,
            &mut warnings.internal_failed,
            &mut messages,
            &logger,
        );
        let externals = recover(
            inventory_outcome,
            &mut warnings.external_failed,
            &mut messages,
            &logger,
        );
        if !warnings.internal_failed {
            logger.log_source_loaded(SourceKind::InternalCatalog, internals.len());
        }
        if !warnings.external_failed {
            logger.log_source_loaded(SourceKind::LiveInventory, externals.len());
        }

        logger.log_phase("Matching", None);
        let result = self.matcher.match_listings(internals, externals)?;

        logger.log_phase("Building report", None);
        let report = build_report(result, warnings)
            .with_run_id(run_id)
            .with_matcher(self.matcher.name(), self.matcher.threshold())
            .with_messages(messages);
        logger.log_completion(&report);
        Ok(report)
    }
}

async fn fetch_pool<T, F>(kind: SourceKind, limit: Duration, fetch: F) -> Result<Vec<T>, ReconError>
where
    F: Future<Output = anyhow::Result<Vec<T>>>,
{
    match tokio::time::timeout(limit, fetch).await {
        Ok(Ok(listings)) => Ok(listings),
        Ok(Err(e)) => Err(ReconError::SourceUnavailable {
            kind,
            reason: format!("{:#}", e),
        }),
        Err(_) => Err(ReconError::SourceUnavailable {
            kind,
            reason: format!("timed out after {:?}", limit),
        }),
    }
}

fn recover<T>(
    outcome: Result<Vec<T>, ReconError>,
    failed: &mut bool,
    messages: &mut Vec<String>,
    logger: &ReconciliationLogger,
) -> Vec<T> {
    match outcome {
        Ok(listings) => listings,
        Err(e) => {
            if let ReconError::SourceUnavailable { kind, reason } = &e {
                logger.log_source_failed(*kind, reason);
            } else {
                logger.log_debug(&format!("unexpected fetch error: {}", e));
            }
            *failed = true;
            messages.push(e.to_string());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExternalListing, InternalListing, MatchResult};
    use crate::reconciliation::report::ReconciliationStatus;
    use chrono::NaiveDate;
    use futures::future::{BoxFuture, FutureExt};

    enum Behaviour<T> {
        Return(Vec<T>),
        Fail(&'static str),
        Hang,
    }

    struct FakeCatalog(Behaviour<InternalListing>);
    struct FakeInventory(Behaviour<ExternalListing>);

    async fn act<T: Clone>(behaviour: &Behaviour<T>) -> anyhow::Result<Vec<T>> {
        match behaviour {
            Behaviour::Return(items) => Ok(items.clone()),
            Behaviour::Fail(msg) => Err(anyhow::anyhow!(*msg)),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Vec::new())
            }
        }
    }

    impl CatalogSource for FakeCatalog {
        fn fetch_listings<'a>(
            &'a self,
            _query: &'a CatalogQuery,
        ) -> BoxFuture<'a, anyhow::Result<Vec<InternalListing>>> {
            act(&self.0).boxed()
        }
    }

    impl InventorySource for FakeInventory {
        fn search<'a>(
            &'a self,
            _query: &'a InventoryQuery,
        ) -> BoxFuture<'a, anyhow::Result<Vec<ExternalListing>>> {
            act(&self.0).boxed()
        }
    }

    fn queries() -> (CatalogQuery, InventoryQuery) {
        let catalog = CatalogQuery::new("Naxos", true, 50).unwrap();
        let inventory = InventoryQuery::new(
            "Naxos",
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
            2,
            1,
            50,
        )
        .unwrap();
        (catalog, inventory)
    }

    fn service(
        catalog: Behaviour<InternalListing>,
        inventory: Behaviour<ExternalListing>,
    ) -> ReconciliationService {
        let config = ReconciliationConfig {
            catalog_timeout: Duration::from_millis(100),
            inventory_timeout: Duration::from_millis(100),
            ..ReconciliationConfig::default()
        };
        ReconciliationService::new(
            Arc::new(FakeCatalog(catalog)),
            Arc::new(FakeInventory(inventory)),
            &config,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_happy_path() {
        let svc = service(
            Behaviour::Return(vec![
                InternalListing::new("i1", "ALK HOTEL™"),
                InternalListing::new("i2", "Villa Iris"),
            ]),
            Behaviour::Return(vec![ExternalListing::new("481923", "ALK Hotel(TM)")]),
        );
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.status, ReconciliationStatus::Ok);
        assert_eq!(report.counts.matched, 1);
        assert_eq!(report.matched_pairs[0].internal.id, "i1");
        assert_eq!(report.matched_pairs[0].similarity, 1.0);
        assert_eq!(report.unmatched_internal[0].id, "i2");
        assert_eq!(report.matcher.as_deref(), Some("greedy"));
        assert_eq!(report.threshold, Some(0.6));
        assert!(report.messages.is_empty());
    }

    #[tokio::test]
    async fn test_empty_inventory_is_not_a_failure() {
        let svc = service(
            Behaviour::Return(vec![InternalListing::new("i1", "Villa Iris")]),
            Behaviour::Return(vec![]),
        );
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.status, ReconciliationStatus::Ok);
        assert!(!report.warnings.external_failed);
        assert!(report.matched_pairs.is_empty());
        assert_eq!(report.unmatched_internal[0].name, "Villa Iris");
    }

    #[tokio::test]
    async fn test_both_sources_fail() {
        let svc = service(Behaviour::Fail("connection refused"), Behaviour::Fail("HTTP 503"));
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.status, ReconciliationStatus::NoData);
        assert!(report.warnings.internal_failed);
        assert!(report.warnings.external_failed);
        assert!(report.matched_pairs.is_empty());
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_catalog_failure_keeps_inventory() {
        let svc = service(
            Behaviour::Fail("pool exhausted"),
            Behaviour::Return(vec![ExternalListing::new("7", "Kastro Studios")]),
        );
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.status, ReconciliationStatus::PartialInternal);
        assert_eq!(report.counts.unmatched_external, 1);
        assert_eq!(report.match_rate, 0.0);
    }

    #[tokio::test]
    async fn test_inventory_timeout_degrades_to_partial() {
        let svc = service(
            Behaviour::Return(vec![InternalListing::new("i1", "Porto Rafael")]),
            Behaviour::Hang,
        );
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.status, ReconciliationStatus::PartialExternal);
        assert!(report.warnings.external_failed);
        assert!(report.messages[0].contains("timed out"));
        assert_eq!(report.counts.unmatched_internal, 1);
    }

    #[tokio::test]
    async fn test_unnamed_listing_is_surfaced() {
        let svc = service(
            Behaviour::Return(vec![InternalListing::new("i1", "")]),
            Behaviour::Return(vec![ExternalListing::new("1", "ALK")]),
        );
        let (cq, iq) = queries();
        let err = svc.reconcile(&cq, &iq).await.unwrap_err();
        assert!(matches!(err, ReconError::InvalidArgument(_)));
    }

    struct MatchNothing;

    impl ListingMatcher for MatchNothing {
        fn name(&self) -> &'static str {
            "none"
        }

        fn threshold(&self) -> f64 {
            1.0
        }

        fn match_listings(
            &self,
            internals: Vec<InternalListing>,
            externals: Vec<ExternalListing>,
        ) -> Result<MatchResult, ReconError> {
            Ok(MatchResult {
                matched_pairs: Vec::new(),
                unmatched_internal: internals,
                unmatched_external: externals,
            })
        }
    }

    #[tokio::test]
    async fn test_matcher_is_swappable() {
        let svc = service(
            Behaviour::Return(vec![InternalListing::new("i1", "ALK")]),
            Behaviour::Return(vec![ExternalListing::new("1", "ALK")]),
        )
        .with_matcher(Arc::new(MatchNothing));
        let (cq, iq) = queries();
        let report = svc.reconcile(&cq, &iq).await.unwrap();

        assert_eq!(report.matcher.as_deref(), Some("none"));
        assert_eq!(report.counts.matched, 0);
        assert_eq!(report.counts.unmatched_internal, 1);
        assert_eq!(report.counts.unmatched_external, 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_interfere() {
        let svc = Arc::new(service(
            Behaviour::Return(vec![
                InternalListing::new("i1", "ALK Hotel"),
                InternalListing::new("i2", "Blue Lagoon"),
            ]),
            Behaviour::Return(vec![
                ExternalListing::new("1", "ALK"),
                ExternalListing::new("2", "Blue Lagoon Spa"),
            ]),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    let (cq, iq) = queries();
                    svc.reconcile(&cq, &iq).await
                })
            })
            .collect();

        let mut run_ids = std::collections::HashSet::new();
        for handle in handles {
            let report = handle.await.unwrap().unwrap();
            assert_eq!(report.counts.matched, 2);
            run_ids.insert(report.run_id);
        }
        assert_eq!(run_ids.len(), 4);
    }
}
