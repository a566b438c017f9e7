//! # Shopverse Storefront CLI
//!
//! Finds stores around a location and previews checkout totals for a cart.
//!
//! ## Usage
//!
//! ```bash
//! # List every store in the catalog
//! shopverse stores
//!
//! # Closest store to a point
//! shopverse nearest --lat 10.7769 --lon 106.7009
//!
//! # Stores within 5 km, closest first
//! shopverse nearby --lat 10.7769 --lon 106.7009 --radius-km 5
//!
//! # Totals for the selected lines of a cart document
//! shopverse checkout --cart apps/storefront-cli/assets/cart.json --address "1 Le Loi"
//! ```
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► clap ──► AppConfig::load ──► StoreRepository ──► commands     │
//! │                        (env)              (catalog)         (stdout)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Logs go to stderr; set `RUST_LOG` to change the filter.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use shopverse_locator::{StoreRepository, StoreSource};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Parser)]
#[command(name = "shopverse")]
#[command(author, version, about = "Shopverse store finder and checkout preview")]
struct Cli {
    /// Store catalog to read instead of SHOPVERSE_STORES_PATH
    #[arg(long, global = true)]
    stores: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every store in the catalog
    Stores,
    /// Show the store closest to a location
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// List stores within a radius, closest first
    Nearby {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius (defaults to SHOPVERSE_NEARBY_RADIUS_KM)
        #[arg(long)]
        radius_km: Option<f64>,
    },
    /// Preview checkout totals for the selected lines of a cart document
    Checkout {
        /// Cart JSON document (`{"lines": [...]}`)
        #[arg(long)]
        cart: PathBuf,

        /// Shipping address
        #[arg(long)]
        address: String,

        /// Select every line before checking out
        #[arg(long)]
        select_all: bool,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load()?;
    debug!(?config, "Configuration loaded");

    let stores_path = cli.stores.unwrap_or_else(|| config.stores_path.clone());
    let repo = StoreRepository::new(StoreSource::file(stores_path));

    match cli.command {
        Commands::Stores => commands::list_stores(&repo).await,
        Commands::Nearest { lat, lon } => commands::nearest(&repo, lat, lon).await,
        Commands::Nearby {
            lat,
            lon,
            radius_km,
        } => {
            let radius_km = radius_km.unwrap_or(config.nearby_radius_km);
            commands::nearby(&repo, lat, lon, radius_km).await
        }
        Commands::Checkout {
            cart,
            address,
            select_all,
        } => commands::checkout(&cart, &address, select_all, config.shipping_fee).await,
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=shopverse=trace` - Trace level for shopverse crates only
/// - Default: `info,shopverse=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopverse=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
