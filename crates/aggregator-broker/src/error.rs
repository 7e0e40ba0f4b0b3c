//! Error types for the broker transport and the ingestion pipeline.
//!
//! Two layers: [`TransportError`] covers the broker itself (connection,
//! metadata, subscription, reads) and is fatal to construction or to the
//! running loop; [`ConsumerError`] covers per-message processing and is
//! recovered locally by the loop. Callers branch on the variant, never on
//! type identity.

use aggregator_storage::StorageError;
use thiserror::Error;

/// Errors raised by the broker transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Broker client could not be created or the broker is unreachable.
    #[error("broker connection failed: {0}")]
    Connection(String),

    /// Topic metadata could not be fetched.
    #[error("metadata fetch for topic '{0}' failed: {1}")]
    Metadata(String, String),

    /// The topic exists but exposes no partitions to subscribe to.
    #[error("topic '{0}' has no partitions")]
    NoPartitions(String),

    /// Partition subscription setup or teardown failed.
    #[error("subscription failed: {0}")]
    Subscription(String),

    /// Reading the next message from the subscription failed.
    #[error("partition read failed: {0}")]
    Read(String),

    /// Publishing a message failed.
    #[error("message produce failed: {0}")]
    Produce(String),
}

/// Errors raised while processing a single consumed message.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// Transport-level failure, fatal to the loop.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Payload is not a structurally valid report message.
    #[error("malformed report message: {0}")]
    Decode(#[source] serde_json::Error),

    /// Payload decoded but a required attribute is absent.
    #[error("missing required attribute '{0}'")]
    MissingAttribute(&'static str),

    /// The storage sink rejected the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ConsumerError {
    /// Pipeline stage the error originates from, for log context.
    pub fn stage(&self) -> &'static str {
        match self {
            ConsumerError::Transport(_) => "transport",
            ConsumerError::Decode(_) => "decode",
            ConsumerError::MissingAttribute(_) => "validation",
            ConsumerError::Storage(_) => "storage",
        }
    }
}
