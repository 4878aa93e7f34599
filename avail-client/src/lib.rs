//! # Avail Data Submission Library
//!
//! This library submits arbitrary data blobs to an Avail data availability
//! chain, waits for each submission to be finalized, and optionally checks
//! the finalized block for the submitted data.
//!
//! ```no_run
//! # async fn run() -> avail_client::Result<()> {
//! use std::time::Duration;
//!
//! use avail_client::{AvailClient, AvailClientConfig};
//!
//! let config = AvailClientConfig::new(
//!     "wss://goldberg.avail.tools:443/ws".parse().unwrap(),
//!     0,
//!     "bottom drive obey lake curtain smoke basket hold race lonely fit walk//Alice",
//! );
//! let client = AvailClient::connect(&config).await?;
//! let block = client.submit_data(b"hello", Duration::from_secs(70)).await?;
//! println!("finalized in {block:?}");
//! # Ok(())
//! # }
//! ```

/// Chain configuration.
///
/// Avail's `subxt` config and signed extensions, including the `CheckAppId`
/// extension that carries the application id of a submission.
pub mod avail_config;

/// Chain access seam.
pub mod chain;

/// The submission client.
///
/// Signs, submits and follows `DataAvailability.submit_data` extrinsics, with
/// a locally tracked nonce shared by concurrent submitters.
pub mod client;

/// Client configuration.
///
/// Command-line and environment settings for connecting and signing.
pub mod config;

/// Error handling module.
///
/// Defines a custom error type using the `snafu` crate to provide detailed and structured
/// error messages for failures encountered when submitting data.
pub mod error;

/// Nonce tracking.
///
/// Reads an account's nonce once and hands out consecutive values after that.
pub mod nonce;

/// Payload helpers.
///
/// Random payload generation and the on-chain encoding of submitted data.
pub mod payload;

/// Cryptographic signer module.
///
/// Derives sr25519 keypairs from seed phrases and secret URIs.
pub mod signer;

/// Transaction status subscriptions.
pub mod subscription;

/// Live node backend.
pub mod subxt_chain;

/// Inclusion checks.
pub mod verify;

#[cfg(test)]
mod testing;

pub use chain::{ChainBackend, DEFAULT_SUBMIT_DATA_CALL_INDEX};
pub use client::AvailClient;
pub use config::{AvailClientConfig, SubmissionSettings};
pub use error::{Error, Result};
pub use payload::{random_payload, MAX_BLOB_SIZE};
pub use subscription::{StatusSubscription, TxStatus};
pub use subxt::utils::{AccountId32, H256};
pub use subxt_chain::SubxtChain;
