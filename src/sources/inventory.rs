// src/sources/inventory.rs - HTTP client for the live-inventory provider
use anyhow::{bail, Context, Result};
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{InventoryQuery, InventorySource};
use crate::error::ReconError;
use crate::models::ExternalListing;

/// Provider search response body.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ExternalListing>,
}

pub struct HttpInventoryClient {
    http_client: Client,
    search_url: Url,
    api_key: Option<String>,
}

impl HttpInventoryClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ReconError> {
        let search_url = search_url(base_url)?;
        Ok(Self {
            http_client: Client::new(),
            search_url,
            api_key,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    async fn fetch(&self, query: &InventoryQuery) -> Result<Vec<ExternalListing>> {
        let params = query_params(query);
        let mut request = self.http_client.get(self.search_url.clone()).query(&params);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Inventory: Failed to send search request")?;
        ensure_success(response.status())?;

        let body: SearchResponse = response
            .json()
            .await
            .context("Inventory: Failed to parse search response")?;
        debug!(
            "Inventory: {} results for {} ({} nights)",
            body.results.len(),
            query.region,
            query.nights()
        );
        Ok(truncate_results(body.results, query.limit))
    }
}

impl InventorySource for HttpInventoryClient {
    fn search<'a>(
        &'a self,
        query: &'a InventoryQuery,
    ) -> BoxFuture<'a, Result<Vec<ExternalListing>>> {
        self.fetch(query).boxed()
    }
}

fn search_url(base_url: &str) -> Result<Url, ReconError> {
    let base = Url::parse(base_url)
        .map_err(|e| ReconError::Config(format!("invalid inventory URL '{}': {}", base_url, e)))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(ReconError::Config(format!(
            "inventory URL '{}' must be an http(s) base URL",
            base_url
        )));
    }
    // Url::join replaces the last path segment unless the base ends with '/'.
    let mut base = base;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("search")
        .map_err(|e| ReconError::Config(format!("invalid inventory URL '{}': {}", base_url, e)))
}

fn ensure_success(status: StatusCode) -> Result<()> {
    if !status.is_success() {
        bail!("Inventory: provider returned status {}", status);
    }
    Ok(())
}

fn query_params(query: &InventoryQuery) -> Vec<(&'static str, String)> {
    vec![
        ("region", query.region.clone()),
        ("checkin", query.check_in.format("%Y-%m-%d").to_string()),
        ("checkout", query.check_out.format("%Y-%m-%d").to_string()),
        ("adults", query.adults.to_string()),
        ("rooms", query.rooms.to_string()),
        ("limit", query.limit.to_string()),
    ]
}

fn truncate_results(mut results: Vec<ExternalListing>, limit: usize) -> Vec<ExternalListing> {
    if results.len() > limit {
        warn!(
            "Inventory: provider returned {} results, keeping the first {}",
            results.len(),
            limit
        );
        results.truncate(limit);
    }
    results
}
