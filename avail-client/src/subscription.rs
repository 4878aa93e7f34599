//! Transaction status events and the cancellable subscription that yields them.
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use log::debug;
use subxt::utils::H256;

use crate::error::Result;

/// Lifecycle events reported by the node for a submitted extrinsic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Accepted into the transaction pool.
    Validated,
    /// Gossiped to peers.
    Broadcasted {
        /// Number of peers the extrinsic was sent to.
        num_peers: u32,
    },
    /// Included in a best block.
    InBestBlock(H256),
    /// The best block that contained the extrinsic was retracted.
    NoLongerInBestBlock,
    /// Included in a finalized block.
    InFinalizedBlock(H256),
    /// The pool judged the extrinsic invalid.
    Invalid {
        /// Reason given by the node.
        message: String,
    },
    /// The pool dropped the extrinsic.
    Dropped {
        /// Reason given by the node.
        message: String,
    },
    /// The node failed while tracking the extrinsic.
    Error {
        /// Reason given by the node.
        message: String,
    },
}

impl TxStatus {
    /// Message of a terminal failure status, if this is one.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            TxStatus::Invalid { message }
            | TxStatus::Dropped { message }
            | TxStatus::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Callback run once when a subscription is torn down.
type UnsubscribeHook = Box<dyn FnOnce() + Send + Sync>;

/// A live stream of [`TxStatus`] events for one submitted extrinsic.
///
/// Dropping the underlying stream is what releases the RPC subscription, so
/// [`StatusSubscription::unsubscribe`] swaps it for an empty stream. It runs
/// at most once and is repeated by `Drop`; every path out of a watch loop
/// therefore unsubscribes.
pub struct StatusSubscription {
    /// Remaining events.
    events: BoxStream<'static, Result<TxStatus>>,
    /// Observer for the unsubscription, if any.
    on_unsubscribe: Option<UnsubscribeHook>,
    /// Whether `unsubscribe` already ran.
    closed: bool,
}

impl StatusSubscription {
    /// Wrap a stream of status events.
    pub fn new<S>(events: S) -> Self
    where
        S: Stream<Item = Result<TxStatus>> + Send + 'static,
    {
        Self {
            events: events.boxed(),
            on_unsubscribe: None,
            closed: false,
        }
    }

    /// Register a callback to run when the subscription is torn down.
    pub fn on_unsubscribe<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.on_unsubscribe = Some(Box::new(hook));
        self
    }

    /// Next event, or `None` once the stream ended or was unsubscribed.
    pub async fn next(&mut self) -> Option<Result<TxStatus>> {
        if self.closed {
            return None;
        }
        self.events.next().await
    }

    /// Whether [`StatusSubscription::unsubscribe`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the subscription. Idempotent.
    pub fn unsubscribe(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.events = stream::empty().boxed();
        if let Some(hook) = self.on_unsubscribe.take() {
            hook();
        }
        debug!("Unsubscribed from transaction status updates");
    }
}

impl Drop for StatusSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for StatusSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSubscription")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
