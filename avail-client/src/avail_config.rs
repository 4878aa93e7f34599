//! `subxt` configuration for the Avail chain.
//!
//! Avail extends the usual Substrate signed extensions with `CheckAppId`,
//! which places every transaction in an application namespace. Extrinsics
//! that omit it are rejected, so the stock `PolkadotConfig` cannot sign for
//! Avail.
use codec::{Compact, Encode};
use scale_info::PortableRegistry;
use subxt::client::ClientState;
use subxt::config::signed_extensions::{
    AnyOf,
    ChargeTransactionPayment,
    ChargeTransactionPaymentParams,
    CheckGenesis,
    CheckMortality,
    CheckMortalityParams,
    CheckNonce,
    CheckNonceParams,
    CheckSpecVersion,
    CheckTxVersion,
    SignedExtension,
};
use subxt::config::substrate::{BlakeTwo256, SubstrateHeader};
use subxt::config::{
    Config,
    ExtrinsicParams,
    ExtrinsicParamsEncoder,
    ExtrinsicParamsError,
    RefineParams,
};
use subxt::utils::{AccountId32, MultiAddress, MultiSignature, H256};

/// Name under which the runtime metadata lists the app id extension.
pub const CHECK_APP_ID: &str = "CheckAppId";

/// Marker type carrying the Avail chain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailConfig {}

impl Config for AvailConfig {
    type Hash = H256;
    type AccountId = AccountId32;
    type Address = MultiAddress<Self::AccountId, u32>;
    type Signature = MultiSignature;
    type Hasher = BlakeTwo256;
    type Header = SubstrateHeader<u32, BlakeTwo256>;
    type ExtrinsicParams = AvailExtrinsicParams<Self>;
    type AssetId = u32;
}

/// Signed extensions attached to every Avail extrinsic.
///
/// Extensions the runtime lists with an empty payload (`CheckNonZeroSender`,
/// `CheckWeight`) are skipped by [`AnyOf`].
pub type AvailExtrinsicParams<T> = AnyOf<
    T,
    (
        CheckSpecVersion,
        CheckTxVersion,
        CheckNonce,
        CheckGenesis<T>,
        CheckMortality<T>,
        ChargeTransactionPayment,
        CheckAppId,
    ),
>;

/// Parameters accepted when signing an [`AvailConfig`] extrinsic.
pub type AvailTxParams =
    <AvailExtrinsicParams<AvailConfig> as ExtrinsicParams<AvailConfig>>::Params;

/// Build immortal signing parameters with an explicit nonce, tip and app id.
pub fn tx_params(nonce: u64, tip: u128, app_id: u32) -> AvailTxParams {
    (
        (),
        (),
        CheckNonceParams(Some(nonce)),
        (),
        CheckMortalityParams::immortal(),
        ChargeTransactionPaymentParams::tip(tip),
        CheckAppIdParams(app_id),
    )
}

/// The `CheckAppId` signed extension.
///
/// The app id is SCALE encoded as a compact `u32` in the extrinsic's extra
/// data and contributes nothing to the signed payload's additional data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckAppId(pub u32);

/// Parameters for [`CheckAppId`]: the application id to sign for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckAppIdParams(pub u32);

impl<T: Config> RefineParams<T> for CheckAppIdParams {}

impl<T: Config> ExtrinsicParams<T> for CheckAppId {
    type Params = CheckAppIdParams;

    fn new(_client: &ClientState<T>, params: Self::Params) -> Result<Self, ExtrinsicParamsError> {
        Ok(CheckAppId(params.0))
    }
}

impl ExtrinsicParamsEncoder for CheckAppId {
    fn encode_extra_to(&self, v: &mut Vec<u8>) {
        Compact(self.0).encode_to(v);
    }
}

impl<T: Config> SignedExtension<T> for CheckAppId {
    type Decoded = Compact<u32>;

    fn matches(identifier: &str, _type_id: u32, _types: &PortableRegistry) -> bool {
        identifier == CHECK_APP_ID
    }
}
