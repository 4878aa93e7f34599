use std::time::Duration;

use avail_client::{random_payload, AvailClient};

use crate::common::submit_and_report;

/// Submit one random payload of `size` bytes.
pub(crate) async fn single(client: &AvailClient, size: usize, timeout: Duration) {
    let data = random_payload(size);
    let _ = submit_and_report(client, "single", &data, timeout).await;
}
