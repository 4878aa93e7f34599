//! The seam between [`AvailClient`](crate::client::AvailClient) and the chain.
//!
//! [`ChainBackend`] names every chain interaction a data submission needs.
//! [`SubxtChain`](crate::subxt_chain::SubxtChain) implements it against a live
//! node; tests substitute an in-memory chain.
use async_trait::async_trait;
use subxt::utils::{AccountId32, H256};
use subxt_signer::sr25519::Keypair;

use crate::error::Result;
use crate::subscription::StatusSubscription;

/// Pallet and call indices of `DataAvailability.submit_data` on the Goldberg
/// runtime, used when metadata cannot resolve them.
pub const DEFAULT_SUBMIT_DATA_CALL_INDEX: CallIndex = CallIndex {
    pallet: 29,
    call: 1,
};

/// Runtime version fields that feed into the signature payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    /// Runtime spec version.
    pub spec_version: u32,
    /// Transaction format version.
    pub transaction_version: u32,
}

/// Position of a call within the runtime's call enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallIndex {
    /// Pallet index.
    pub pallet: u8,
    /// Call index within the pallet.
    pub call: u8,
}

/// Everything that goes into signing one extrinsic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningParams {
    /// Genesis hash of the chain; also the era checkpoint for immortal transactions.
    pub genesis_hash: H256,
    /// Runtime version the signature is bound to.
    pub runtime_version: RuntimeVersion,
    /// Account nonce.
    pub nonce: u64,
    /// Tip paid to the block author.
    pub tip: u128,
    /// Application namespace; 0 means none.
    pub app_id: u32,
}

/// A signed, SCALE-encoded extrinsic ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedExtrinsic {
    /// Extrinsic hash.
    pub hash: H256,
    /// Encoded extrinsic bytes.
    pub encoded: Vec<u8>,
}

/// One call found in a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCall {
    /// Pallet index of the call.
    pub pallet_index: u8,
    /// Call index within the pallet.
    pub call_index: u8,
    /// SCALE-encoded call arguments.
    pub args: Vec<u8>,
}

impl BlockCall {
    /// Index of this call.
    pub fn index(&self) -> CallIndex {
        CallIndex {
            pallet: self.pallet_index,
            call: self.call_index,
        }
    }
}

/// Chain operations needed to submit and track a data blob.
#[async_trait]
pub trait ChainBackend: Send + Sync + 'static {
    /// Unsigned `DataAvailability.submit_data` call, bound to the metadata it was built against.
    type Call: Send + Sync;

    /// Build the `submit_data` call carrying `data` against current metadata.
    async fn submit_data_call(&self, data: &[u8]) -> Result<Self::Call>;

    /// Index of the `submit_data` call, used to spot data submissions in blocks.
    fn submit_data_call_index(&self) -> CallIndex;

    /// Hash of block zero.
    async fn genesis_hash(&self) -> Result<H256>;

    /// Current runtime version.
    async fn runtime_version(&self) -> Result<RuntimeVersion>;

    /// Next nonce the chain expects from `account`.
    async fn account_nonce(&self, account: &AccountId32) -> Result<u64>;

    /// Sign `call` with `signer`.
    fn sign(
        &self,
        call: &Self::Call,
        signer: &Keypair,
        params: &SigningParams,
    ) -> Result<SignedExtrinsic>;

    /// Submit a signed extrinsic and subscribe to its status.
    async fn submit_and_watch(&self, extrinsic: SignedExtrinsic) -> Result<StatusSubscription>;

    /// Calls contained in the block with hash `block`.
    async fn block_calls(&self, block: H256) -> Result<Vec<BlockCall>>;
}
