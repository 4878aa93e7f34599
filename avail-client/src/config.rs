use std::time::Duration;

use clap::{ArgAction, Args};
use url::Url;

/// Public Goldberg testnet endpoint.
pub const DEFAULT_API_URL: &str = "wss://goldberg.avail.tools:443/ws";

/// Tip attached to every submission unless configured otherwise.
pub const DEFAULT_TIP: u128 = 100;

/// Connection and signing settings for an [`AvailClient`](crate::client::AvailClient).
#[derive(Debug, Clone, Args)]
pub struct AvailClientConfig {
    /// WebSocket URL of the Avail node RPC
    #[arg(long, env = "AVAIL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Application id to submit under; 0 submits without an application namespace
    #[arg(long, env = "AVAIL_APP_ID", default_value_t = 0)]
    pub app_id: u32,

    /// Seed phrase or secret URI of the submitting account (e.g. "<mnemonic>//Alice")
    #[arg(long, env = "AVAIL_SEED", hide_env_values = true)]
    pub seed: String,

    /// Tip paid with every submission
    #[arg(long, env = "AVAIL_TIP", default_value_t = DEFAULT_TIP)]
    pub tip: u128,

    /// Check finalized blocks for the submitted data
    #[arg(
        long,
        env = "AVAIL_VERIFY_INCLUSION",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub verify_inclusion: bool,

    /// Timeout for individual RPC requests, in seconds
    #[arg(long, default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Timeout for establishing the WebSocket connection, in seconds
    #[arg(long, default_value_t = 10)]
    pub connection_timeout_secs: u64,
}

impl AvailClientConfig {
    /// Config for `api_url` with default tip, timeouts and verification.
    pub fn new(api_url: Url, app_id: u32, seed: impl Into<String>) -> Self {
        Self {
            api_url,
            app_id,
            seed: seed.into(),
            tip: DEFAULT_TIP,
            verify_inclusion: true,
            request_timeout_secs: 60,
            connection_timeout_secs: 10,
        }
    }

    /// Per-request RPC timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connection establishment timeout.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Settings the client keeps after connecting.
    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            app_id: self.app_id,
            tip: self.tip,
            verify_inclusion: self.verify_inclusion,
        }
    }
}

/// Per-submission settings held by a connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionSettings {
    /// Application id.
    pub app_id: u32,
    /// Tip paid with every submission.
    pub tip: u128,
    /// Whether finalized blocks are checked for the submitted data.
    pub verify_inclusion: bool,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            app_id: 0,
            tip: DEFAULT_TIP,
            verify_inclusion: true,
        }
    }
}
