//! Per-account nonce tracking for consecutive submissions.
use log::info;
use subxt::utils::AccountId32;
use tokio::sync::Mutex;

use crate::chain::ChainBackend;
use crate::error::Result;

/// Hands out consecutive nonces for one signing account.
///
/// The first acquisition reads the account nonce from chain and returns it
/// unchanged; every later acquisition returns the previous value plus one.
/// The lock is held across the chain read so concurrent first callers cannot
/// both observe the same on-chain value.
#[derive(Debug, Default)]
pub struct NonceTracker {
    /// Nonce for the next submission, `None` until read from chain.
    next: Mutex<Option<u64>>,
}

impl NonceTracker {
    /// Creates a tracker that reads the chain on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next nonce for `account`.
    ///
    /// The reservation is final: a submission that fails afterwards still
    /// consumes the value. Call [`NonceTracker::reset`] to resynchronise.
    pub async fn acquire<C>(&self, chain: &C, account: &AccountId32) -> Result<u64>
    where
        C: ChainBackend + ?Sized,
    {
        let mut next = self.next.lock().await;
        let nonce = match *next {
            Some(nonce) => nonce,
            None => {
                let nonce = chain.account_nonce(account).await?;
                info!("🔢 Read starting nonce {} from chain", nonce);
                nonce
            }
        };
        *next = Some(nonce + 1);
        Ok(nonce)
    }

    /// Forget the cached value so the next acquisition reads the chain again.
    pub async fn reset(&self) {
        *self.next.lock().await = None;
    }

    /// Nonce the next acquisition will return, if already known.
    pub async fn peek(&self) -> Option<u64> {
        *self.next.lock().await
    }
}
