use clap::{Parser, Subcommand};
use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoresheet_cache::{
    print_sheet, router, write_sheet_csv, CacheStore, RefreshConfig, RefreshScheduler, ScoresheetClient,
    DEFAULT_BASE_URL,
};

#[derive(Parser)]
#[command(name = "scoresheet_cache", about = "Live cache of weightlifting score sheets")]
struct Cli {
    /// Root URL of the score sheet site
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Keep the cache refreshed and serve it over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
        /// Milliseconds between two fast refreshes
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
        /// Ticks between two full refreshes
        #[arg(long, default_value_t = 100)]
        full_every: u32,
    },
    /// Fetch the competition listing once and print it as JSON
    Listing,
    /// Fetch one competition sheet
    Sheet {
        id: u32,
        #[arg(long)]
        team: bool,
        #[arg(long)]
        open: bool,
        /// Write the lifters to a CSV file instead of printing them
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scoresheet_cache=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, tick_ms, full_every } => {
            let config = RefreshConfig::default()
                .with_base_url(cli.base_url)
                .with_tick(Duration::from_millis(tick_ms))
                .with_full_refresh_every(full_every);

            let store = Arc::new(CacheStore::new());
            let mut scheduler = RefreshScheduler::new(config, Arc::clone(&store))?;
            scheduler.start();

            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!(%bind, "Serving cache");
            axum::serve(listener, router(store))
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;

            scheduler.stop().await;
        }
        Command::Listing => {
            let client = ScoresheetClient::new(&cli.base_url)?;
            let listing = client.fetch_listing().await?;
            let sorted: std::collections::BTreeMap<_, _> = listing.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        Command::Sheet { id, team, open, csv } => {
            let client = ScoresheetClient::new(&cli.base_url)?;
            let sheet = client.fetch_sheet(id, team, !open).await?;
            match csv {
                Some(path) => {
                    write_sheet_csv(File::create(&path)?, id, &sheet)?;
                    println!("Results written to {}", path.display());
                }
                None => print_sheet(id, &sheet),
            }
        }
    }

    Ok(())
}
