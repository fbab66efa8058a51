use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use workshop_ledger::{
    app::Workshop,
    config::{database, settings},
    core::{global_config::ensure_config, snapshot::FileSnapshotStore, stats::format_amount},
    errors::Result,
    notify::LogNotifier,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings file (optional)
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Database, schema and the configuration singleton
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    ensure_config(&db, &settings.pricing.to_model()).await?;

    // 5. Restore snapshot side channel
    let snapshot_dir = settings.snapshot_dir();
    let snapshots = FileSnapshotStore::open(&snapshot_dir)
        .inspect_err(|e| error!("Failed to open snapshot directory: {e}"))?;
    info!("Restore snapshots kept in {}", snapshot_dir.display());

    // 6. Initial load and dashboard summary
    let workshop = Workshop::open(db, snapshots, LogNotifier).await;
    let catalog = workshop.catalog();
    let stats = catalog.stats();
    let currency = &catalog.config.currency;

    info!(
        "Revenue {}, investment {}, balance {}, {} active orders",
        format_amount(stats.total_revenue, currency),
        format_amount(stats.investment, currency),
        format_amount(stats.net_balance, currency),
        stats.active_orders
    );
    info!(
        "{} designs in catalog, {} items in trash",
        catalog.catalog_designs().count(),
        catalog.deleted.len()
    );

    Ok(())
}
