//! [`ChainBackend`] backed by a live Avail node through `subxt`.
use async_trait::async_trait;
use futures::StreamExt;
use log::{error, info, warn};
use snafu::ResultExt;
use subxt::backend::rpc::reconnecting_rpc_client::{PingConfig, RpcClient};
use subxt::dynamic::Value;
use subxt::tx::{DynamicPayload, SubmittableExtrinsic};
use subxt::utils::{AccountId32, H256};
use subxt::{Metadata, OfflineClient, OnlineClient};
use subxt_signer::sr25519::Keypair;

use crate::avail_config::{tx_params, AvailConfig};
use crate::chain::{
    BlockCall,
    CallIndex,
    ChainBackend,
    RuntimeVersion,
    SignedExtrinsic,
    SigningParams,
    DEFAULT_SUBMIT_DATA_CALL_INDEX,
};
use crate::config::AvailClientConfig;
use crate::error::{
    BlockFetchSnafu,
    Error,
    MetadataSnafu,
    Result,
    SigningSnafu,
    SubmissionSnafu,
};
use crate::subscription::{StatusSubscription, TxStatus};

/// Pallet holding the data submission call.
pub const DATA_AVAILABILITY_PALLET: &str = "DataAvailability";

/// Call that submits a data blob.
pub const SUBMIT_DATA_CALL: &str = "submit_data";

/// Largest RPC request or response accepted, large enough for a hex-encoded max-size blob.
const MAX_RPC_MESSAGE_SIZE: u32 = 50 * 1024 * 1024;

/// Connected Avail API.
pub type AvailApi = OnlineClient<AvailConfig>;

/// A `submit_data` call together with the metadata it was encoded against.
pub struct SubxtCall {
    /// Dynamic call payload.
    payload: DynamicPayload,
    /// Metadata snapshot used for encoding and signing.
    metadata: Metadata,
}

/// Talks to an Avail node over a reconnecting WebSocket client.
#[derive(Clone, Debug)]
pub struct SubxtChain {
    /// The connected client.
    client: AvailApi,
}

impl SubxtChain {
    /// Connect to the node at `config.api_url`.
    ///
    /// A background task follows runtime upgrades so that metadata and the
    /// runtime version used for signing stay current.
    pub async fn connect(config: &AvailClientConfig) -> Result<Self> {
        let url = config.api_url.to_string();
        info!("🔵 Connecting to Avail node at {}", url);

        let rpc_client = RpcClient::builder()
            .max_request_size(MAX_RPC_MESSAGE_SIZE)
            .max_response_size(MAX_RPC_MESSAGE_SIZE)
            .request_timeout(config.request_timeout())
            .connection_timeout(config.connection_timeout())
            .enable_ws_ping(PingConfig::new())
            .build(url.clone())
            .await
            .map_err(|err| Error::Connection {
                url: url.clone(),
                message: err.to_string(),
            })?;

        let client = AvailApi::from_rpc_client(rpc_client)
            .await
            .map_err(|err| Error::Connection {
                url: url.clone(),
                message: err.to_string(),
            })?;

        let updater = client.updater();
        tokio::spawn(async move {
            if let Err(err) = updater.perform_runtime_updates().await {
                error!("❌ Runtime update task stopped: {}", err);
            }
        });

        info!("🟢 Connected to Avail node at {}", url);
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainBackend for SubxtChain {
    type Call = SubxtCall;

    async fn submit_data_call(&self, data: &[u8]) -> Result<Self::Call> {
        let metadata = self.client.metadata();
        let payload = subxt::dynamic::tx(
            DATA_AVAILABILITY_PALLET,
            SUBMIT_DATA_CALL,
            vec![Value::from_bytes(data)],
        );

        // fails when the runtime has no such pallet or call
        self.client.tx().call_data(&payload).context(MetadataSnafu)?;

        Ok(SubxtCall { payload, metadata })
    }

    fn submit_data_call_index(&self) -> CallIndex {
        let metadata = self.client.metadata();
        let resolved = metadata
            .pallet_by_name(DATA_AVAILABILITY_PALLET)
            .and_then(|pallet| {
                pallet
                    .call_variant_by_name(SUBMIT_DATA_CALL)
                    .map(|call| CallIndex {
                        pallet: pallet.index(),
                        call: call.index,
                    })
            });

        resolved.unwrap_or_else(|| {
            warn!("⚠️ submit_data not found in metadata, assuming default call index");
            DEFAULT_SUBMIT_DATA_CALL_INDEX
        })
    }

    async fn genesis_hash(&self) -> Result<H256> {
        self.client
            .backend()
            .genesis_hash()
            .await
            .context(MetadataSnafu)
    }

    async fn runtime_version(&self) -> Result<RuntimeVersion> {
        let version = self
            .client
            .backend()
            .current_runtime_version()
            .await
            .context(MetadataSnafu)?;

        Ok(RuntimeVersion {
            spec_version: version.spec_version,
            transaction_version: version.transaction_version,
        })
    }

    async fn account_nonce(&self, account: &AccountId32) -> Result<u64> {
        self.client
            .tx()
            .account_nonce(account)
            .await
            .context(MetadataSnafu)
    }

    fn sign(
        &self,
        call: &Self::Call,
        signer: &Keypair,
        params: &SigningParams,
    ) -> Result<SignedExtrinsic> {
        let offline = OfflineClient::<AvailConfig>::new(
            params.genesis_hash,
            subxt::client::RuntimeVersion {
                spec_version: params.runtime_version.spec_version,
                transaction_version: params.runtime_version.transaction_version,
            },
            call.metadata.clone(),
        );

        let signed = offline
            .tx()
            .create_signed_offline(
                &call.payload,
                signer,
                tx_params(params.nonce, params.tip, params.app_id),
            )
            .context(SigningSnafu)?;

        Ok(SignedExtrinsic {
            hash: signed.hash(),
            encoded: signed.into_encoded(),
        })
    }

    async fn submit_and_watch(&self, extrinsic: SignedExtrinsic) -> Result<StatusSubscription> {
        let progress = SubmittableExtrinsic::from_bytes(self.client.clone(), extrinsic.encoded)
            .submit_and_watch()
            .await
            .context(SubmissionSnafu)?;

        info!("✅ Submitted extrinsic {:?}", progress.extrinsic_hash());

        let events = progress.map(|status| {
            status.context(SubmissionSnafu).map(|status| match status {
                subxt::tx::TxStatus::Validated => TxStatus::Validated,
                subxt::tx::TxStatus::Broadcasted { num_peers } => {
                    TxStatus::Broadcasted { num_peers }
                }
                subxt::tx::TxStatus::NoLongerInBestBlock => TxStatus::NoLongerInBestBlock,
                subxt::tx::TxStatus::InBestBlock(details) => {
                    TxStatus::InBestBlock(details.block_hash())
                }
                subxt::tx::TxStatus::InFinalizedBlock(details) => {
                    TxStatus::InFinalizedBlock(details.block_hash())
                }
                subxt::tx::TxStatus::Error { message } => TxStatus::Error { message },
                subxt::tx::TxStatus::Invalid { message } => TxStatus::Invalid { message },
                subxt::tx::TxStatus::Dropped { message } => TxStatus::Dropped { message },
            })
        });

        Ok(StatusSubscription::new(events))
    }

    async fn block_calls(&self, block: H256) -> Result<Vec<BlockCall>> {
        let block = self
            .client
            .blocks()
            .at(block)
            .await
            .context(BlockFetchSnafu)?;
        let extrinsics = block.extrinsics().await.context(BlockFetchSnafu)?;

        Ok(extrinsics
            .iter()
            .map(|ext| BlockCall {
                pallet_index: ext.pallet_index(),
                call_index: ext.variant_index(),
                args: ext.field_bytes().to_vec(),
            })
            .collect())
    }
}
