//! Interactive geocoding search shell.
//!
//! Every stdin line is forwarded to the search coordinator as the new
//! contents of the search box; lines starting with `:` are commands.
//! Notifications and map changes are printed to stdout, logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mapsearch::config::{ApiKey, Config};
use mapsearch::map::MapPresenter;
use mapsearch::search::{Notification, SearchCoordinator};
use mapsearch::GeocodeClient;

mod command;
use command::{parse_line, Command};

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Search-as-you-type geocoding shell")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Key/value file holding OPEN_CAGE_API_TOKEN [default: ./Keys.toml if present]
    #[arg(long)]
    keys: Option<PathBuf>,

    /// Geocoding API key (overrides environment and keys file)
    #[arg(long)]
    api_key: Option<String>,

    /// Debounce delay in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Run a single search, print the results as JSON and exit
    #[arg(short, long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(ms) = args.debounce_ms {
        config.search.debounce_ms = ms;
    }

    let api_key = match args.api_key.clone().filter(|k| !k.is_empty()) {
        Some(key) => Some(key),
        None => ApiKey::OpenCage.lookup(args.keys.as_deref())?,
    };
    if api_key.is_none() {
        warn!(
            "No {} found; searches will not be sent",
            ApiKey::OpenCage.name()
        );
    }

    let client = GeocodeClient::new(&config.geocoder)?;
    info!("Geocoding against {}", client.base_url());

    match args.query {
        Some(query) => run_once(&client, &query, api_key.as_deref()).await,
        None => run_interactive(Arc::new(client), api_key, &config).await,
    }
}

async fn run_once(client: &GeocodeClient, query: &str, api_key: Option<&str>) -> Result<()> {
    let api_key =
        api_key.with_context(|| format!("No {} configured", ApiKey::OpenCage.name()))?;

    let locations = client.search(query, api_key).await?;
    println!("{}", serde_json::to_string_pretty(&locations)?);

    Ok(())
}

async fn run_interactive(
    client: Arc<GeocodeClient>,
    api_key: Option<String>,
    config: &Config,
) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();

    let coordinator = SearchCoordinator::new(client, notify_tx, api_key, &config.search);
    let coordinator = tokio::spawn(coordinator.run(event_rx));

    let printer = tokio::spawn(async move {
        let mut map = MapPresenter::new();
        while let Some(notification) = notify_rx.recv().await {
            print_notification(&notification);
            if map.apply(&notification) {
                print_map(&map);
            }
        }
    });

    println!("Type to search. Commands: :submit :cancel :edit :select N :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_line(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Event(event)) => {
                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{:#}", e),
        }
    }

    drop(event_tx);
    let coordinator = coordinator
        .await
        .context("Search coordinator task failed")?;
    info!(
        "Final state: {} with {} results",
        coordinator.state(),
        coordinator.locations().len()
    );

    // Dropping the coordinator closes the notification stream.
    drop(coordinator);
    printer.await?;

    Ok(())
}

fn print_notification(notification: &Notification) {
    match notification {
        Notification::StateChanged(state) => println!("[{}]", state),
        Notification::LocationsUpdated(locations) => {
            for (row, location) in locations.iter().enumerate() {
                println!("  {:>2}. {}", row, location);
            }
        }
        Notification::Error(message) => println!("Oops! {}", message),
        Notification::PanelOpened
        | Notification::PanelClosed
        | Notification::LocationSelected(_) => {}
    }
}

fn print_map(map: &MapPresenter) {
    let region = map.region();
    match map.pin() {
        Some(pin) => println!(
            "map: panel {}, pin {:?}, centre {}",
            map.panel(),
            pin.description(),
            region.center
        ),
        None => println!("map: panel {}, centre {}", map.panel(), region.center),
    }
}
