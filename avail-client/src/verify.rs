//! Best-effort check that submitted data made it into a block.
use codec::Decode;
use log::{info, warn};
use subxt::utils::H256;

use crate::chain::{BlockCall, CallIndex, ChainBackend};
use crate::error::Result;

/// Whether any `submit_data` call among `calls` carries exactly `expected`.
///
/// Arguments of calls matching `index` are decoded as a SCALE
/// compact-length-prefixed byte vector before comparison; calls whose
/// arguments do not decode that way are skipped.
pub fn find_submitted_data(calls: &[BlockCall], index: CallIndex, expected: &[u8]) -> bool {
    calls
        .iter()
        .filter(|call| call.index() == index)
        .filter_map(|call| Vec::<u8>::decode(&mut &call.args[..]).ok())
        .any(|data| data == expected)
}

/// Fetch `block` and look for a data submission carrying `expected`.
pub async fn verify_inclusion<C>(chain: &C, block: H256, expected: &[u8]) -> Result<bool>
where
    C: ChainBackend + ?Sized,
{
    let calls = chain.block_calls(block).await?;
    let found = find_submitted_data(&calls, chain.submit_data_call_index(), expected);

    if found {
        info!("🔍 Data found in block {:?}", block);
    } else {
        warn!(
            "🔍 No data submission matching the payload in block {:?} ({} extrinsics scanned)",
            block,
            calls.len()
        );
    }

    Ok(found)
}
