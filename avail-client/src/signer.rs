use std::str::FromStr;

use snafu::ResultExt;
use subxt_signer::sr25519::Keypair;
use subxt_signer::SecretUri;

use crate::error::{InvalidSecretUriSnafu, KeypairSnafu, Result};

/// Derive an sr25519 keypair from a seed phrase or secret URI.
///
/// `"bottom drive obey lake curtain smoke basket hold race lonely fit walk//Alice"`
/// and `"//Alice"` style URIs are both accepted.
pub fn keypair_from_seed(seed: &str) -> Result<Keypair> {
    let uri = SecretUri::from_str(seed.trim()).context(InvalidSecretUriSnafu)?;
    Keypair::from_uri(&uri).context(KeypairSnafu)
}
