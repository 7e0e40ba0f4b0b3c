//! The report ingestion loop.
//!
//! A [`Consumer`] owns one broker connection and one partition
//! subscription, and drives messages sequentially through decode,
//! validation, and the storage sink. Delivery is at-most-once with
//! respect to this pipeline: a message that fails processing is logged
//! and dropped, never retried or requeued.

use std::sync::Arc;

use aggregator_storage::Storage;

use crate::config::BrokerConfig;
use crate::error::{ConsumerError, TransportError};
use crate::kafka::KafkaConnection;
use crate::message::parse_report_message;
use crate::transport::{BrokerConnection, PartitionSubscription, ReceivedMessage};

/// Sequential consumer of cluster report messages.
///
/// Owns its broker connection and partition subscription exclusively;
/// duplicating either would duplicate the underlying network resources,
/// so the consumer is neither cloned nor shared. [`Consumer::close`]
/// consumes the value, making a second release unrepresentable.
pub struct Consumer {
    config: BrokerConfig,
    connection: Box<dyn BrokerConnection>,
    subscription: Box<dyn PartitionSubscription>,
    storage: Arc<dyn Storage>,
}

impl Consumer {
    /// Connect to the configured Kafka broker and subscribe.
    ///
    /// Fails if the broker is unreachable, the topic has no partitions,
    /// or subscription setup fails; no partially constructed consumer is
    /// returned.
    pub fn connect(config: BrokerConfig, storage: Arc<dyn Storage>) -> Result<Self, TransportError> {
        let connection = KafkaConnection::connect(&config)?;
        Self::with_connection(config, Box::new(connection), storage)
    }

    /// Subscribe over an already-open connection.
    ///
    /// Resolves the topic's partitions and subscribes to the first one at
    /// the newest offset: messages published before the subscription
    /// begins are never seen.
    pub fn with_connection(
        config: BrokerConfig,
        connection: Box<dyn BrokerConnection>,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, TransportError> {
        let partitions = connection.partitions(&config.topic)?;
        let partition = partitions
            .first()
            .copied()
            .ok_or_else(|| TransportError::NoPartitions(config.topic.clone()))?;

        let subscription = connection.subscribe(&config.topic, partition)?;

        Ok(Self {
            config,
            connection,
            subscription,
            storage,
        })
    }

    /// Run the ingestion loop.
    ///
    /// Blocks on the next message, processes it, and moves on. Processing
    /// errors are logged with the offset and failing stage and the loop
    /// continues; only a transport-level read failure makes this return.
    /// Whether to reconnect after that is the caller's decision.
    pub async fn start(&mut self) -> Result<(), TransportError> {
        tracing::info!(
            topic = %self.config.topic,
            "consumer started, waiting for messages"
        );

        let mut consumed: u64 = 0;
        loop {
            let message = self.subscription.next_message().await?;

            if let Err(error) = self.process_message(&message).await {
                tracing::error!(
                    offset = message.offset,
                    stage = error.stage(),
                    error = %error,
                    "error processing consumed message"
                );
            }

            consumed += 1;
            tracing::debug!(offset = message.offset, consumed, "message consumed");
        }
    }

    /// Process one consumed message: decode and validate the payload,
    /// then persist the report.
    ///
    /// On failure the message still counts as consumed; the error is
    /// returned for logging only and storage is never touched after a
    /// decode or validation failure.
    pub async fn process_message(&self, message: &ReceivedMessage) -> Result<(), ConsumerError> {
        let incoming = parse_report_message(&message.payload)?;

        self.storage
            .write_report_for_cluster(incoming.org_id, &incoming.cluster_name, &incoming.report)
            .await?;

        Ok(())
    }

    /// Release owned resources in reverse acquisition order.
    ///
    /// The partition subscription is closed first; only if that succeeds
    /// is the broker connection closed. A subscription-close failure is
    /// returned immediately and the connection close is not attempted.
    pub fn close(mut self) -> Result<(), TransportError> {
        self.subscription.close()?;
        self.connection.close()
    }
}
