// src/utils/constants.rs

/// A pair must score strictly above this to be matched.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Score given when one normalized name contains the other.
pub const DEFAULT_CONTAINMENT_SCORE: f64 = 0.8;

pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INVENTORY_TIMEOUT_SECS: u64 = 15;

/// Both sources return bounded pages; the greedy matcher is quadratic in these.
pub const DEFAULT_CATALOG_PAGE_SIZE: usize = 50;
pub const DEFAULT_INVENTORY_PAGE_SIZE: usize = 50;
