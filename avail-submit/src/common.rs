use std::time::Duration;

use avail_client::{AvailClient, Result, H256};
use log::{debug, info};

/// Print the outcome of one submission the way every driver reports it.
pub(crate) fn report(label: &str, outcome: &Result<H256>) {
    match outcome {
        Ok(block) => {
            debug!("{label}: finalized");
            println!("hash of tx: {block:?}");
        }
        Err(e) => {
            debug!("{label}: submission failed");
            println!("error: {e}");
        }
    }
}

/// Submit `data`, report the outcome and hand it back.
pub(crate) async fn submit_and_report(
    client: &AvailClient,
    label: &str,
    data: &[u8],
    timeout: Duration,
) -> Result<H256> {
    info!("{label}: submitting {} bytes", data.len());
    let outcome = client.submit_data(data, timeout).await;
    report(label, &outcome);
    outcome
}
