//! Runtime configuration for reconciliation runs.
//! Policy constants and source settings are read from the environment with defaults.

use log::{debug, info, warn};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ReconError;
use crate::matching::matcher::validate_threshold;
use crate::matching::similarity::SimilarityScorer;
use crate::utils::constants::{
    DEFAULT_CATALOG_PAGE_SIZE, DEFAULT_CATALOG_TIMEOUT_SECS, DEFAULT_CONTAINMENT_SCORE,
    DEFAULT_INVENTORY_PAGE_SIZE, DEFAULT_INVENTORY_TIMEOUT_SECS, DEFAULT_MATCH_THRESHOLD,
};

/// Tunable scoring policy, read from `RECON_MATCH_THRESHOLD` and
/// `RECON_CONTAINMENT_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    pub threshold: f64,
    pub containment_score: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            containment_score: DEFAULT_CONTAINMENT_SCORE,
        }
    }
}

impl MatchPolicy {
    pub fn new(threshold: f64, containment_score: f64) -> Result<Self, ReconError> {
        validate_threshold(threshold)?;
        SimilarityScorer::new(containment_score)?;
        Ok(Self {
            threshold,
            containment_score,
        })
    }

    pub fn from_env() -> Result<Self, ReconError> {
        let threshold = env_parse("RECON_MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD);
        let containment_score = env_parse("RECON_CONTAINMENT_SCORE", DEFAULT_CONTAINMENT_SCORE);
        Self::new(threshold, containment_score)
    }
}

#[derive(Debug, Clone)]
pub struct ReconciliationConfig {
    pub policy: MatchPolicy,
    pub catalog_timeout: Duration,
    pub inventory_timeout: Duration,
    pub catalog_page_size: usize,
    pub inventory_page_size: usize,
    pub inventory_base_url: String,
    pub inventory_api_key: Option<String>,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            catalog_timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            inventory_timeout: Duration::from_secs(DEFAULT_INVENTORY_TIMEOUT_SECS),
            catalog_page_size: DEFAULT_CATALOG_PAGE_SIZE,
            inventory_page_size: DEFAULT_INVENTORY_PAGE_SIZE,
            inventory_base_url: "http://localhost:8088".to_string(),
            inventory_api_key: None,
        }
    }
}

impl ReconciliationConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ReconError> {
        let defaults = Self::default();
        let config = Self {
            policy: MatchPolicy::from_env()?,
            catalog_timeout: Duration::from_secs(env_parse(
                "RECON_CATALOG_TIMEOUT_SECS",
                DEFAULT_CATALOG_TIMEOUT_SECS,
            )),
            inventory_timeout: Duration::from_secs(env_parse(
                "RECON_INVENTORY_TIMEOUT_SECS",
                DEFAULT_INVENTORY_TIMEOUT_SECS,
            )),
            catalog_page_size: env_parse("RECON_CATALOG_LIMIT", DEFAULT_CATALOG_PAGE_SIZE),
            inventory_page_size: env_parse("RECON_INVENTORY_LIMIT", DEFAULT_INVENTORY_PAGE_SIZE),
            inventory_base_url: env::var("INVENTORY_API_URL")
                .unwrap_or(defaults.inventory_base_url),
            inventory_api_key: env::var("INVENTORY_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
        };

        if config.catalog_page_size == 0 || config.inventory_page_size == 0 {
            return Err(ReconError::Config("page sizes must be at least 1".to_string()));
        }
        debug!("Reconciliation config: {:?}", config.redacted());
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ReconError> {
        self.policy = MatchPolicy::new(threshold, self.policy.containment_score)?;
        Ok(self)
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("⚙️  Reconciliation configuration:");
        info!(
            "   Match threshold: {:.2} (strict), containment score: {:.2}",
            self.policy.threshold, self.policy.containment_score
        );
        info!(
            "   Source timeouts: catalog {}s, inventory {}s",
            self.catalog_timeout.as_secs(),
            self.inventory_timeout.as_secs()
        );
        info!(
            "   Page sizes: catalog {}, inventory {}",
            self.catalog_page_size, self.inventory_page_size
        );
        info!("   Inventory API: {}", self.inventory_base_url);
    }

    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.inventory_api_key.is_some() {
            copy.inventory_api_key = Some("[hidden]".to_string());
        }
        copy
    }
}

fn env_parse<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {}='{}', using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
