mod discover;
mod transit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hostly_core::CanonicalCategory;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hostly-cli")]
#[command(about = "Hostly local discovery and transit matching")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover nearby places for a property and store new recommendations
    Populate {
        property_id: i64,

        /// Only run sources whose query resolves to this category (e.g. `nightlife`)
        #[arg(long)]
        category: Option<CanonicalCategory>,
    },
    /// Rank transit stops near a property
    Transit {
        property_id: i64,

        /// Search radius in meters (defaults to `HOSTLY_TRANSIT_RADIUS_METERS`)
        #[arg(long)]
        radius: Option<f64>,

        /// Show at most this many stops
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replace the transit dataset with the contents of a YAML file
    SeedTransit { file: PathBuf },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = hostly_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = hostly_db::PoolConfig::from_app_config(&config);
    let pool = hostly_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Populate {
            property_id,
            category,
        } => discover::run_populate(&pool, &config, property_id, category).await?,
        Commands::Transit {
            property_id,
            radius,
            limit,
        } => transit::run_transit(&pool, &config, property_id, radius, limit).await?,
        Commands::SeedTransit { file } => transit::run_seed_transit(&pool, &file).await?,
        Commands::Migrate => {
            hostly_db::ping(&pool).await?;
            let applied = hostly_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    Ok(())
}

/// Load a property and its discovery view, failing clearly if it is absent.
async fn load_property(
    pool: &sqlx::PgPool,
    property_id: i64,
) -> anyhow::Result<hostly_discovery::PropertyRef> {
    let row = hostly_db::get_property(pool, property_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("property {property_id} not found"))?;
    Ok(row.to_property_ref()?)
}
