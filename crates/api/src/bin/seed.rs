//! Fixture import (`archmap-seed`).
//!
//! Replaces every stored location and panorama with the contents of the
//! two JSON fixture files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use archmap_db::seed::{self, SeedFixture};

/// Command-line arguments for archmap-seed
#[derive(Parser, Debug)]
#[command(name = "archmap-seed")]
#[command(about = "Import archaeological sites and panorama tours from JSON fixtures")]
#[command(version)]
struct Args {
    /// Locations fixture (array of sites)
    #[arg(long, default_value = "data/locations.json")]
    locations: PathBuf,

    /// Panoramas fixture (array of tours with scenes keyed by id)
    #[arg(long, default_value = "data/panoramas.json")]
    panoramas: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archmap_seed=info,archmap_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let locations = std::fs::read_to_string(&args.locations)
        .with_context(|| format!("Failed to read {}", args.locations.display()))?;
    let panoramas = std::fs::read_to_string(&args.panoramas)
        .with_context(|| format!("Failed to read {}", args.panoramas.display()))?;
    let fixture = SeedFixture::from_json(&locations, &panoramas)?;
    tracing::info!(
        locations = fixture.locations.len(),
        panoramas = fixture.panoramas.len(),
        "Loaded fixtures",
    );

    let pool = archmap_db::create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;
    archmap_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let report = seed::run(&pool, &fixture).await?;
    tracing::info!(
        panoramas_created = report.panoramas_created,
        locations_created = report.locations_created,
        locations_skipped = report.locations_skipped,
        panoramas_linked = report.panoramas_linked,
        dangling_hotspots = report.dangling_hotspots,
        "Seed complete",
    );

    Ok(())
}
