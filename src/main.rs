//! Tacklor - fishing conditions and strategy assistant
//!
//! Builds a conditions snapshot from the command line, optionally syncs live
//! weather for a position, prints the settled report, and can ask the
//! strategy generator for advice.

use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tacklor::cli::{Cli, OutputFormat, StartupConfig};
use tacklor::data::{Coordinates, ExpertiseLevel, WeatherClient};
use tacklor::report::{render_text, Report};
use tacklor::store::ConditionsStore;
use tacklor::strategy::request_for_store;
use tacklor::sync::{SyncOutcome, WeatherSync};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tacklor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Applies live weather, leaving the store untouched on failure.
async fn sync_weather(store: &mut ConditionsStore, location: Coordinates, openweather_key: Option<&str>) {
    let mut client = WeatherClient::new();
    if let Some(key) = openweather_key {
        client = client.with_openweather_key(key);
    }

    let mut sync = WeatherSync::new(client);
    sync.request(location);
    while let Some(outcome) = sync.next_outcome().await {
        match outcome {
            SyncOutcome::Update {
                location, update, ..
            } => match store.update(update) {
                Ok(_) => eprintln!("Météo synchronisée : {}", location),
                Err(e) => eprintln!("Météo ignorée : {}", e),
            },
            SyncOutcome::Failed { message, .. } => eprintln!("{}", message),
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let mut store = ConditionsStore::default();

    // Weather first, so explicit flags win over live readings
    if let Some(location) = config.location {
        sync_weather(&mut store, location, config.openweather_key.as_deref()).await;
    }

    if let Err(e) = store.update(config.update.clone()) {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    if config.expert {
        if let Err(e) = store.set_expertise(ExpertiseLevel::Expert) {
            eprintln!("Mode expert refusé : {}", e);
        }
    }

    let strategy = match &config.strategy {
        Some(strategy_config) => match request_for_store(
            &store,
            strategy_config.api_key.as_deref(),
            &strategy_config.model,
        )
        .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                eprintln!("Stratégie indisponible : {}", e);
                None
            }
        },
        None => None,
    };

    match config.output {
        OutputFormat::Text => {
            print!("{}", render_text(&store));
            if let Some(text) = &strategy {
                println!("\nStratégie :\n{}", text.trim_end());
            }
        }
        OutputFormat::Json => {
            match Report::new(&store).with_strategy(strategy.as_deref()).to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
