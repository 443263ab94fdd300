// src/sources/catalog.rs - Internal catalog backed by PostgreSQL
use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use log::debug;
use tokio_postgres::Row as PgRow;

use super::{CatalogQuery, CatalogSource};
use crate::models::InternalListing;
use crate::utils::db_connect::PgPool;

const LISTINGS_BY_REGION_SQL: &str = "
    SELECT l.id::text AS id, l.name, l.location, l.rating, l.price, l.image_ref
    FROM public.listing l
    WHERE lower(l.region) = lower($1)
      AND ($2 = false OR l.active = true)
    ORDER BY l.name, l.id
    LIMIT $3";

pub struct PgCatalogSource {
    pool: PgPool,
}

impl PgCatalogSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_listings(&self, query: &CatalogQuery) -> Result<Vec<InternalListing>> {
        let conn = self
            .pool
            .get()
            .await
            .context("Catalog: Failed to get DB connection")?;

        let limit = query.limit as i64;
        let rows = conn
            .query(
                LISTINGS_BY_REGION_SQL,
                &[&query.region, &query.active_only, &limit],
            )
            .await
            .context("Catalog: Failed to query listings by region")?;
        debug!("Catalog: {} rows for region '{}'", rows.len(), query.region);

        rows.iter().map(listing_from_row).collect()
    }
}

impl CatalogSource for PgCatalogSource {
    fn fetch_listings<'a>(
        &'a self,
        query: &'a CatalogQuery,
    ) -> BoxFuture<'a, Result<Vec<InternalListing>>> {
        self.query_listings(query).boxed()
    }
}

fn listing_from_row(row: &PgRow) -> Result<InternalListing> {
    Ok(InternalListing {
        id: row.try_get("id").context("Catalog: missing id column")?,
        name: row.try_get("name").context("Catalog: missing name column")?,
        location: row
            .try_get::<_, Option<String>>("location")
            .context("Catalog: bad location column")?
            .unwrap_or_default(),
        rating: rating_from_column(
            row.try_get::<_, Option<f64>>("rating")
                .context("Catalog: bad rating column")?,
        ),
        price: row.try_get("price").context("Catalog: bad price column")?,
        image_ref: row.try_get("image_ref").context("Catalog: bad image_ref column")?,
    })
}

/// Unrated or out-of-range ratings collapse onto the 0-5 scale.
fn rating_from_column(raw: Option<f64>) -> f64 {
    raw.filter(|r| !r.is_nan()).unwrap_or(0.0).clamp(0.0, 5.0)
}
