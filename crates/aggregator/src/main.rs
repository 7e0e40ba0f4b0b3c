//! Cluster report aggregator service.
//!
//! One binary, three startup modes:
//! - `consumer`: run the report ingestion pipeline against the broker.
//! - `server`: serve stored results over the HTTP API.
//! - `produce`: publish a test report message to the configured topic.
//!
//! Logging is controlled via `RUST_LOG`; configuration comes from a TOML
//! file selected by `--config` or `AGGREGATOR_CONFIG_FILE`.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use aggregator_broker::{produce_report_message, Consumer};
use aggregator_server::AppState;
use aggregator_storage::SqliteStorage;

mod config;

use config::AppConfig;

/// Canonical test payload for the `produce` mode.
const TEST_MESSAGE: &str =
    r#"{"OrgID":1,"ClusterName":"aaaaaaaa-bbbb-cccc-dddd-000000000000","Report":"{}"}"#;

// Exit statuses, one per failure class.
const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_PRODUCER_ERROR: i32 = 2;
const EXIT_CONSUMER_ERROR: i32 = 3;
const EXIT_SERVER_ERROR: i32 = 4;

#[derive(Parser)]
#[command(name = "aggregator")]
#[command(about = "Cluster report aggregation service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(
        short,
        long,
        env = "AGGREGATOR_CONFIG_FILE",
        default_value = "config.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the report ingestion consumer
    Consumer,
    /// Start the HTTP API server
    Server,
    /// Publish a test report message to the configured topic
    Produce {
        /// Payload to publish instead of the built-in test message
        #[arg(long)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let app_config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "failed to load configuration");
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let (result, failure_code) = match cli.command {
        Command::Consumer => (run_consumer(app_config).await, EXIT_CONSUMER_ERROR),
        Command::Server => (run_server(app_config).await, EXIT_SERVER_ERROR),
        Command::Produce { message } => {
            (run_produce(app_config, message).await, EXIT_PRODUCER_ERROR)
        }
    };

    if let Err(error) = result {
        tracing::error!(error = %error, "fatal error");
        process::exit(failure_code);
    }
}

async fn run_consumer(app_config: AppConfig) -> anyhow::Result<()> {
    let storage = Arc::new(SqliteStorage::new(&app_config.storage.datasource).await?);

    let mut consumer = Consumer::connect(app_config.broker, storage.clone())?;
    let run_result = consumer.start().await;

    // The loop only returns on a transport failure; release resources
    // before surfacing it.
    if let Err(error) = consumer.close() {
        tracing::error!(error = %error, "failed to close consumer");
    }
    storage.close().await;

    run_result?;
    Ok(())
}

async fn run_server(app_config: AppConfig) -> anyhow::Result<()> {
    let storage = Arc::new(SqliteStorage::new(&app_config.storage.datasource).await?);

    aggregator_server::run(
        &app_config.server,
        AppState {
            storage: storage.clone(),
        },
    )
    .await?;

    storage.close().await;
    Ok(())
}

async fn run_produce(app_config: AppConfig, message: Option<String>) -> anyhow::Result<()> {
    let payload = message.unwrap_or_else(|| TEST_MESSAGE.to_string());
    let (partition, offset) = produce_report_message(&app_config.broker, &payload).await?;
    tracing::info!(partition, offset, "test message published");
    Ok(())
}
