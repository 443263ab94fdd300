// src/sources/mod.rs - Collaborators that supply the two listing pools
pub mod catalog;
pub mod inventory;

use anyhow::Result;
use chrono::NaiveDate;
use futures::future::BoxFuture;

use crate::error::ReconError;
use crate::models::{ExternalListing, InternalListing};

pub use catalog::PgCatalogSource;
pub use inventory::HttpInventoryClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub region: String,
    pub active_only: bool,
    pub limit: usize,
}

impl CatalogQuery {
    pub fn new(
        region: impl Into<String>,
        active_only: bool,
        limit: usize,
    ) -> Result<Self, ReconError> {
        let region = region.into();
        if region.trim().is_empty() {
            return Err(ReconError::invalid("catalog query needs a region"));
        }
        if limit == 0 {
            return Err(ReconError::invalid("catalog query limit must be at least 1"));
        }
        Ok(Self {
            region,
            active_only,
            limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub region: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub rooms: u32,
    pub limit: usize,
}

impl InventoryQuery {
    pub fn new(
        region: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        rooms: u32,
        limit: usize,
    ) -> Result<Self, ReconError> {
        if check_out <= check_in {
            return Err(ReconError::invalid(format!(
                "check-out {} must be after check-in {}",
                check_out, check_in
            )));
        }
        if adults == 0 || rooms == 0 {
            return Err(ReconError::invalid("occupancy needs at least one adult and one room"));
        }
        if limit == 0 {
            return Err(ReconError::invalid("inventory query limit must be at least 1"));
        }
        Ok(Self {
            region: region.into(),
            check_in,
            check_out,
            adults,
            rooms,
            limit,
        })
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Internal catalog query service. An error means the fetch failed; an empty
/// list means the region has no listings.
pub trait CatalogSource: Send + Sync {
    fn fetch_listings<'a>(
        &'a self,
        query: &'a CatalogQuery,
    ) -> BoxFuture<'a, Result<Vec<InternalListing>>>;
}

/// Live-inventory search client. Zero results is a legitimate answer.
pub trait InventorySource: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a InventoryQuery,
    ) -> BoxFuture<'a, Result<Vec<ExternalListing>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_inventory_query_validation() {
        let query = |check_in: &str, check_out: &str, adults: u32, rooms: u32| {
            InventoryQuery::new("Naxos", date(check_in), date(check_out), adults, rooms, 50)
        };

        let q = query("2026-07-01", "2026-07-04", 2, 1).unwrap();
        assert_eq!(q.nights(), 3);

        assert!(query("2026-07-04", "2026-07-04", 2, 1).is_err());
        assert!(query("2026-07-05", "2026-07-04", 2, 1).is_err());
        assert!(query("2026-07-01", "2026-07-04", 0, 1).is_err());
        assert!(query("2026-07-01", "2026-07-04", 2, 0).is_err());
    }

    #[test]
    fn test_catalog_query_validation() {
        assert!(CatalogQuery::new("Naxos", true, 50).is_ok());
        assert!(CatalogQuery::new("  ", true, 50).is_err());
        assert!(CatalogQuery::new("Naxos", true, 0).is_err());
    }
}
