//! The Avail data submission client.
use std::future::Future;
use std::time::Duration;

use log::{debug, error, info, warn};
use subxt::utils::{AccountId32, H256};
use subxt_signer::sr25519::Keypair;

use crate::chain::{ChainBackend, SigningParams};
use crate::config::{AvailClientConfig, SubmissionSettings};
use crate::error::{Error, Result};
use crate::nonce::NonceTracker;
use crate::payload::{encode_call_data, MAX_BLOB_SIZE};
use crate::signer::keypair_from_seed;
use crate::subscription::{StatusSubscription, TxStatus};
use crate::subxt_chain::SubxtChain;
use crate::verify::verify_inclusion;

/// Submits data blobs to Avail and waits for them to be finalized.
///
/// A client signs for a single account and keeps that account's nonce
/// locally, so it can be shared (e.g. behind an `Arc`) by concurrent
/// submitters without nonce collisions.
#[derive(Debug)]
pub struct AvailClient<C: ChainBackend = SubxtChain> {
    /// Chain access.
    chain: C,
    /// Signing keypair.
    keypair: Keypair,
    /// App id, tip and verification switch.
    settings: SubmissionSettings,
    /// Nonce for the next submission.
    nonce: NonceTracker,
}

impl AvailClient<SubxtChain> {
    /// Derive the signing keypair from `config.seed` and connect to `config.api_url`.
    pub async fn connect(config: &AvailClientConfig) -> Result<Self> {
        let keypair = keypair_from_seed(&config.seed)?;
        let chain = SubxtChain::connect(config).await?;
        Ok(Self::with_backend(chain, keypair, config.submission_settings()))
    }
}

impl<C: ChainBackend> AvailClient<C> {
    /// A client over an arbitrary chain backend.
    pub fn with_backend(chain: C, keypair: Keypair, settings: SubmissionSettings) -> Self {
        Self {
            chain,
            keypair,
            settings,
            nonce: NonceTracker::new(),
        }
    }

    /// The chain backend.
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Account that signs submissions.
    pub fn account_id(&self) -> AccountId32 {
        self.keypair.public_key().to_account_id()
    }

    /// Application id submissions are made under.
    pub fn app_id(&self) -> u32 {
        self.settings.app_id
    }

    /// Nonce the next submission will use, once it has been read from chain.
    pub async fn cached_nonce(&self) -> Option<u64> {
        self.nonce.peek().await
    }

    /// Make the next submission read its nonce from chain again.
    ///
    /// Useful after a failed or timed-out submission left the local nonce
    /// ahead of the chain.
    pub async fn resync_nonce(&self) {
        info!("🔄 Nonce will be re-read from chain on next submission");
        self.nonce.reset().await;
    }

    /// Submit `data` and wait up to `timeout` for it to be finalized.
    ///
    /// Returns the hash of the finalized block.
    pub async fn submit_data(&self, data: &[u8], timeout: Duration) -> Result<H256> {
        self.submit_data_until(data, tokio::time::sleep(timeout)).await
    }

    /// Submit `data` and wait for it to be finalized, giving up with
    /// [`Error::SubmissionTimeout`] as soon as `cancelled` completes.
    ///
    /// `cancelled` only races the wait for finalization. Once the finalized
    /// block is known, the inclusion check (if enabled) runs to completion
    /// and the block hash is returned whatever its verdict.
    ///
    /// The status subscription is released on every exit path. A nonce
    /// reserved before cancellation stays consumed, and a transaction that
    /// already reached the pool may still be included later.
    pub async fn submit_data_until<F>(&self, data: &[u8], cancelled: F) -> Result<H256>
    where
        F: Future<Output = ()>,
    {
        let call_data = encode_call_data(data);

        let block = tokio::select! {
            biased;
            result = self.submit_and_finalize(data.len(), &call_data) => result?,
            () = cancelled => {
                warn!(
                    "⏰ Gave up waiting for finalization of a {} byte submission",
                    data.len()
                );
                return Err(Error::SubmissionTimeout);
            }
        };

        if self.settings.verify_inclusion {
            if let Err(err) = verify_inclusion(&self.chain, block, &call_data).await {
                warn!("⚠️ Could not verify inclusion in {:?}: {}", block, err);
            }
        }

        Ok(block)
    }

    /// Build, sign and submit one `submit_data` extrinsic carrying
    /// `call_data`, then follow it to finalization.
    async fn submit_and_finalize(&self, data_len: usize, call_data: &[u8]) -> Result<H256> {
        if data_len > MAX_BLOB_SIZE {
            warn!(
                "⚠️ Payload of {} bytes exceeds the {} byte blob limit, expect a rejection",
                data_len, MAX_BLOB_SIZE
            );
        }

        let call = self.chain.submit_data_call(call_data).await?;

        let genesis_hash = self.chain.genesis_hash().await?;
        let runtime_version = self.chain.runtime_version().await?;

        let nonce = self.nonce.acquire(&self.chain, &self.account_id()).await?;
        info!("🔢 Submitting {} bytes with nonce {}", data_len, nonce);

        let params = SigningParams {
            genesis_hash,
            runtime_version,
            nonce,
            tip: self.settings.tip,
            app_id: self.settings.app_id,
        };
        let extrinsic = self.chain.sign(&call, &self.keypair, &params)?;
        debug!("Signed extrinsic {:?}", extrinsic.hash);

        let mut subscription = self.chain.submit_and_watch(extrinsic).await?;
        watch_until_finalized(&mut subscription).await
    }
}

/// Follow status events until the extrinsic is finalized or rejected.
async fn watch_until_finalized(subscription: &mut StatusSubscription) -> Result<H256> {
    while let Some(status) = subscription.next().await {
        match status? {
            TxStatus::Validated => debug!("📄 Transaction has been validated."),
            TxStatus::Broadcasted { num_peers } => {
                debug!("📡 Transaction broadcasted to {} peers.", num_peers);
            }
            TxStatus::InBestBlock(block) => {
                info!("📦 Txn inside block {:?}", block);
            }
            TxStatus::NoLongerInBestBlock => {
                warn!("⚠️ Transaction is no longer in the best block.");
            }
            TxStatus::InFinalizedBlock(block) => {
                info!("✅ Txn inside finalized block {:?}", block);
                subscription.unsubscribe();
                return Ok(block);
            }
            rejected @ (TxStatus::Invalid { .. }
            | TxStatus::Dropped { .. }
            | TxStatus::Error { .. }) => {
                let message = rejected.rejection().unwrap_or_default().to_string();
                error!("❌ Transaction rejected: {}", message);
                return Err(Error::TransactionRejected { message });
            }
        }
    }

    Err(Error::StatusStreamClosed)
}
