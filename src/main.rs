use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{info, warn};
use recon_lib::sources::{CatalogQuery, HttpInventoryClient, InventoryQuery, PgCatalogSource};
use recon_lib::utils::config::ReconciliationConfig;
use recon_lib::utils::{db_connect, env::load_env};
use recon_lib::ReconciliationService;
use std::sync::Arc;

/// Reconcile internal catalog listings against live-inventory search results.
#[derive(Parser, Debug)]
#[command(name = "reconcile", version)]
struct Args {
    /// Region to reconcile (matched case-insensitively against the catalog)
    #[arg(long)]
    region: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    check_in: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    check_out: NaiveDate,

    #[arg(long, default_value_t = 2)]
    adults: u32,

    #[arg(long, default_value_t = 1)]
    rooms: u32,

    /// Overrides RECON_MATCH_THRESHOLD
    #[arg(long)]
    threshold: Option<f64>,

    /// Include catalog listings flagged inactive
    #[arg(long)]
    include_inactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and environment
    load_env();
    env_logger::init();
    info!("Starting listing reconciliation");

    let args = Args::parse();

    let mut config =
        ReconciliationConfig::from_env().context("Invalid reconciliation configuration")?;
    if let Some(threshold) = args.threshold {
        config = config
            .with_threshold(threshold)
            .context("Invalid --threshold")?;
    }
    config.log_config();

    let catalog_query = CatalogQuery::new(
        args.region.clone(),
        !args.include_inactive,
        config.catalog_page_size,
    )?;
    let inventory_query = InventoryQuery::new(
        args.region,
        args.check_in,
        args.check_out,
        args.adults,
        args.rooms,
        config.inventory_page_size,
    )?;

    // An unreachable catalog is reported as a warning, not a fatal error.
    let pool = match db_connect::connect().await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Catalog database not reachable yet ({:#}); continuing", e);
            db_connect::connect_lazy()
        }
    };

    let catalog = Arc::new(PgCatalogSource::new(pool));
    let inventory = Arc::new(HttpInventoryClient::new(
        &config.inventory_base_url,
        config.inventory_api_key.clone(),
    )?);
    info!("Inventory search endpoint: {}", inventory.search_url());

    let service = ReconciliationService::new(catalog, inventory, &config)?;
    let report = service.reconcile(&catalog_query, &inventory_query).await?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
