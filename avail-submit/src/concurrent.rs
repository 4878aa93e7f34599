use std::sync::Arc;
use std::time::Duration;

use avail_client::{random_payload, AvailClient};
use futures::future::join_all;
use log::error;

use crate::common::submit_and_report;

/// Submit `count` random payloads of `size` bytes at once from one shared client.
///
/// Returns how many of them were finalized.
pub(crate) async fn concurrent(
    client: Arc<AvailClient>,
    count: usize,
    size: usize,
    timeout: Duration,
) -> usize {
    let handles = (0..count).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            let label = format!("concurrent #{i}");
            let data = random_payload(size);
            submit_and_report(&client, &label, &data, timeout).await
        })
    });

    join_all(handles)
        .await
        .into_iter()
        .filter(|joined| match joined {
            Ok(outcome) => outcome.is_ok(),
            Err(e) => {
                error!("submission task panicked: {e}");
                false
            }
        })
        .count()
}
