//! This utility submits random data blobs to an Avail chain and waits for
//! them to be finalized, exercising single, concurrent and large submissions.

mod common;
mod concurrent;
mod single;
mod sizes;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use avail_client::{AvailClient, AvailClientConfig};
use clap::{Parser, Subcommand};
use log::{error, info};

/// Seconds each driver waits for a submission to be finalized.
const DEFAULT_TIMEOUT_SECS: u64 = 70;

/// Payload size of the single and concurrent drivers.
const DEFAULT_SIZE: usize = 200;

/// CLI entrypoint
#[derive(Parser)]
#[command(
    name = "avail-submit",
    version,
    about = "Submit data blobs to Avail and wait for finalization"
)]
struct Cli {
    /// Connection and signing settings.
    #[command(flatten)]
    client: AvailClientConfig,

    /// Driver to run.
    #[command(subcommand)]
    command: Commands,
}

/// Example drivers.
#[derive(Subcommand)]
enum Commands {
    /// Submit one random payload
    Single {
        /// Payload size in bytes
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Seconds to wait for finalization
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Submit several random payloads at once from one client
    Concurrent {
        /// Number of simultaneous submissions
        #[arg(long, default_value_t = 2)]
        count: usize,

        /// Payload size in bytes
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Seconds to wait for finalization
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Submit random payloads of increasing size, one after another
    Sizes {
        /// Payload sizes in bytes
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "1024,102400,1048576,2097152"
        )]
        sizes: Vec<usize>,

        /// Seconds to wait for finalization of each payload
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// One single submission followed by two concurrent ones
    Demo,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let client = match AvailClient::connect(&cli.client).await {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create Avail client: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Submitting as {} under app id {}",
        client.account_id(),
        client.app_id()
    );

    match cli.command {
        Commands::Single { size, timeout_secs } => {
            single::single(&client, size, Duration::from_secs(timeout_secs)).await;
        }
        Commands::Concurrent {
            count,
            size,
            timeout_secs,
        } => {
            let finalized =
                concurrent::concurrent(client, count, size, Duration::from_secs(timeout_secs))
                    .await;
            info!("{finalized} of {count} concurrent submissions finalized");
        }
        Commands::Sizes {
            sizes,
            timeout_secs,
        } => {
            sizes::sizes(&client, &sizes, Duration::from_secs(timeout_secs)).await;
        }
        Commands::Demo => {
            let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
            single::single(&client, DEFAULT_SIZE, timeout).await;
            let finalized = concurrent::concurrent(client, 2, DEFAULT_SIZE, timeout).await;
            info!("{finalized} of 2 concurrent submissions finalized");
        }
    }
}
