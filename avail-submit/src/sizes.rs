use std::time::Duration;

use avail_client::{random_payload, AvailClient, MAX_BLOB_SIZE};
use log::warn;

use crate::common::submit_and_report;

/// Submit one random payload per entry of `sizes`, one after another.
pub(crate) async fn sizes(client: &AvailClient, sizes: &[usize], timeout: Duration) {
    for &size in sizes {
        if size > MAX_BLOB_SIZE {
            warn!("{size} bytes is above the {MAX_BLOB_SIZE} byte blob limit");
        }
        let label = format!("{size} bytes");
        let data = random_payload(size);
        let _ = submit_and_report(client, &label, &data, timeout).await;
    }
}
