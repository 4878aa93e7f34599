//! In-memory chain used by the unit tests.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use codec::Encode;
use futures::channel::mpsc;
use subxt::utils::{AccountId32, H256};
use subxt_signer::sr25519::Keypair;

use crate::chain::{
    BlockCall,
    CallIndex,
    ChainBackend,
    RuntimeVersion,
    SignedExtrinsic,
    SigningParams,
    DEFAULT_SUBMIT_DATA_CALL_INDEX,
};
use crate::error::{Error, Result};
use crate::subscription::{StatusSubscription, TxStatus};

/// How the mock pool treats a submitted extrinsic.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    /// Included and finalized straight away.
    Finalize,
    /// Included in a best block, never finalized.
    NeverFinalize,
    /// Reported invalid with the given message.
    Reject(String),
    /// Status stream ends after validation.
    Close,
    /// The submit RPC itself fails.
    FailSubmit,
}

/// A [`ChainBackend`] that records what the client asks of it.
pub(crate) struct MockChain {
    /// Behaviour for every submission.
    outcome: Outcome,
    /// Nonce reported for any account.
    account_nonce: AtomicU64,
    /// Whether nonce reads fail.
    fail_nonce_reads: AtomicBool,
    /// Number of nonce reads served.
    nonce_reads: AtomicUsize,
    /// Nonces of every signed extrinsic, in signing order.
    signed_nonces: Mutex<Vec<u64>>,
    /// App ids of every signed extrinsic.
    signed_app_ids: Mutex<Vec<u32>>,
    /// Finalized blocks by hash.
    blocks: Mutex<HashMap<H256, Vec<BlockCall>>>,
    /// Senders of subscriptions the mock keeps open.
    open_subscriptions: Mutex<Vec<mpsc::UnboundedSender<Result<TxStatus>>>>,
    /// Unsubscriptions observed through the subscription hook.
    unsubscriptions: Arc<AtomicUsize>,
    /// Source of block numbers.
    block_number: AtomicU64,
    /// Latency of every block fetch.
    block_fetch_delay: Mutex<Duration>,
    /// Whether block fetches fail.
    fail_block_fetches: AtomicBool,
    /// Whether finalized blocks leave the submitted call out.
    omit_submitted_data: AtomicBool,
    /// Number of block fetches served.
    block_fetches: AtomicUsize,
}

impl MockChain {
    /// Chain with the given outcome and account nonce.
    pub(crate) fn new(outcome: Outcome, account_nonce: u64) -> Self {
        Self {
            outcome,
            account_nonce: AtomicU64::new(account_nonce),
            fail_nonce_reads: AtomicBool::new(false),
            nonce_reads: AtomicUsize::new(0),
            signed_nonces: Mutex::new(Vec::new()),
            signed_app_ids: Mutex::new(Vec::new()),
            blocks: Mutex::new(HashMap::new()),
            open_subscriptions: Mutex::new(Vec::new()),
            unsubscriptions: Arc::new(AtomicUsize::new(0)),
            block_number: AtomicU64::new(0),
            block_fetch_delay: Mutex::new(Duration::ZERO),
            fail_block_fetches: AtomicBool::new(false),
            omit_submitted_data: AtomicBool::new(false),
            block_fetches: AtomicUsize::new(0),
        }
    }

    /// Chain that finalizes every submission.
    pub(crate) fn finalizing(account_nonce: u64) -> Self {
        Self::new(Outcome::Finalize, account_nonce)
    }

    /// Chain that never finalizes anything.
    pub(crate) fn never_finalizing(account_nonce: u64) -> Self {
        Self::new(Outcome::NeverFinalize, account_nonce)
    }

    /// Change the on-chain nonce.
    pub(crate) fn set_account_nonce(&self, nonce: u64) {
        self.account_nonce.store(nonce, Ordering::SeqCst);
    }

    /// Make nonce reads fail or succeed.
    pub(crate) fn fail_nonce_reads(&self, fail: bool) {
        self.fail_nonce_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of nonce reads so far.
    pub(crate) fn nonce_reads(&self) -> usize {
        self.nonce_reads.load(Ordering::SeqCst)
    }

    /// Nonces used for signing so far.
    pub(crate) fn signed_nonces(&self) -> Vec<u64> {
        self.signed_nonces.lock().unwrap().clone()
    }

    /// App ids used for signing so far.
    pub(crate) fn signed_app_ids(&self) -> Vec<u32> {
        self.signed_app_ids.lock().unwrap().clone()
    }

    /// Number of subscriptions torn down.
    pub(crate) fn unsubscriptions(&self) -> usize {
        self.unsubscriptions.load(Ordering::SeqCst)
    }

    /// Whether every subscription the mock kept open has lost its receiver.
    pub(crate) fn all_subscriptions_released(&self) -> bool {
        self.open_subscriptions
            .lock()
            .unwrap()
            .iter()
            .all(|sender| sender.is_closed())
    }

    /// Make every block fetch take `delay`.
    pub(crate) fn delay_block_fetches(&self, delay: Duration) {
        *self.block_fetch_delay.lock().unwrap() = delay;
    }

    /// Make block fetches fail or succeed.
    pub(crate) fn fail_block_fetches(&self, fail: bool) {
        self.fail_block_fetches.store(fail, Ordering::SeqCst);
    }

    /// Finalize blocks without the submitted call in their body.
    pub(crate) fn omit_submitted_data(&self, omit: bool) {
        self.omit_submitted_data.store(omit, Ordering::SeqCst);
    }

    /// Number of block fetches so far.
    pub(crate) fn block_fetches(&self) -> usize {
        self.block_fetches.load(Ordering::SeqCst)
    }

    /// Register a block directly.
    pub(crate) fn insert_block(&self, hash: H256, calls: Vec<BlockCall>) {
        self.blocks.lock().unwrap().insert(hash, calls);
    }

    /// Produce a finalized block holding `extrinsic` next to a timestamp call.
    fn finalize(&self, extrinsic: &SignedExtrinsic) -> H256 {
        let number = self.block_number.fetch_add(1, Ordering::SeqCst) + 1;
        let hash = H256::from_low_u64_be(number);
        let index = self.submit_data_call_index();
        let mut calls = vec![BlockCall {
            pallet_index: 3,
            call_index: 0,
            args: number.encode(),
        }];
        if !self.omit_submitted_data.load(Ordering::SeqCst) {
            calls.push(BlockCall {
                pallet_index: index.pallet,
                call_index: index.call,
                args: extrinsic.encoded.clone(),
            });
        }
        self.insert_block(hash, calls);
        hash
    }
}

#[async_trait]
impl ChainBackend for MockChain {
    type Call = Vec<u8>;

    async fn submit_data_call(&self, data: &[u8]) -> Result<Self::Call> {
        Ok(data.to_vec())
    }

    fn submit_data_call_index(&self) -> CallIndex {
        DEFAULT_SUBMIT_DATA_CALL_INDEX
    }

    async fn genesis_hash(&self) -> Result<H256> {
        Ok(H256::repeat_byte(0xaa))
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion> {
        Ok(RuntimeVersion {
            spec_version: 39,
            transaction_version: 1,
        })
    }

    async fn account_nonce(&self, _account: &AccountId32) -> Result<u64> {
        // widen the window for racing first reads
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.nonce_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_nonce_reads.load(Ordering::SeqCst) {
            return Err(Error::Metadata {
                source: subxt::Error::Other("storage unavailable".into()),
            });
        }
        Ok(self.account_nonce.load(Ordering::SeqCst))
    }

    fn sign(
        &self,
        call: &Self::Call,
        _signer: &Keypair,
        params: &SigningParams,
    ) -> Result<SignedExtrinsic> {
        self.signed_nonces.lock().unwrap().push(params.nonce);
        self.signed_app_ids.lock().unwrap().push(params.app_id);
        Ok(SignedExtrinsic {
            hash: H256::from_low_u64_be(params.nonce),
            encoded: call.encode(),
        })
    }

    async fn submit_and_watch(&self, extrinsic: SignedExtrinsic) -> Result<StatusSubscription> {
        if let Outcome::FailSubmit = self.outcome {
            return Err(Error::Submission {
                source: subxt::Error::Other("1010: Invalid Transaction".into()),
            });
        }

        let (sender, receiver) = mpsc::unbounded();
        let send = |status| {
            sender
                .unbounded_send(Ok(status))
                .expect("receiver is alive");
        };
        send(TxStatus::Validated);

        match &self.outcome {
            Outcome::Finalize => {
                let hash = self.finalize(&extrinsic);
                send(TxStatus::Broadcasted { num_peers: 3 });
                send(TxStatus::InBestBlock(hash));
                send(TxStatus::InFinalizedBlock(hash));
            }
            Outcome::NeverFinalize => {
                send(TxStatus::InBestBlock(H256::repeat_byte(0xbb)));
            }
            Outcome::Reject(message) => send(TxStatus::Invalid {
                message: message.clone(),
            }),
            Outcome::Close | Outcome::FailSubmit => {}
        }

        if !matches!(self.outcome, Outcome::Close) {
            self.open_subscriptions.lock().unwrap().push(sender);
        }

        let unsubscriptions = self.unsubscriptions.clone();
        Ok(StatusSubscription::new(receiver).on_unsubscribe(move || {
            unsubscriptions.fetch_add(1, Ordering::SeqCst);
        }))
    }

    async fn block_calls(&self, block: H256) -> Result<Vec<BlockCall>> {
        self.block_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.block_fetch_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        if self.fail_block_fetches.load(Ordering::SeqCst) {
            return Err(Error::BlockFetch {
                source: subxt::Error::Other("rpc connection lost".into()),
            });
        }

        self.blocks
            .lock()
            .unwrap()
            .get(&block)
            .cloned()
            .ok_or_else(|| Error::BlockFetch {
                source: subxt::Error::Other(format!("block {block:?} not found")),
            })
    }
}
