//! Kafka-backed broker transport.
//!
//! The only production implementation of [`BrokerConnection`] and
//! [`PartitionSubscription`]. One `StreamConsumer` backs both: the
//! connection hands out a subscription that shares the client, the
//! subscription's `close` drops the partition assignment, and dropping
//! the connection tears down the client itself.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer as KafkaClient, StreamConsumer};
use rdkafka::{Message, Offset, TopicPartitionList};

use crate::config::BrokerConfig;
use crate::error::TransportError;
use crate::transport::{BrokerConnection, PartitionSubscription, ReceivedMessage};

const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection to a Kafka broker.
pub struct KafkaConnection {
    consumer: Arc<StreamConsumer>,
}

impl KafkaConnection {
    /// Create a Kafka client for the configured broker address and
    /// consumer group.
    ///
    /// The client connects lazily; an unreachable broker surfaces on the
    /// first metadata fetch.
    pub fn connect(config: &BrokerConfig) -> Result<Self, TransportError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.address)
            .set("group.id", &config.group)
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "true")
            .create()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            consumer: Arc::new(consumer),
        })
    }
}

impl BrokerConnection for KafkaConnection {
    fn partitions(&self, topic: &str) -> Result<Vec<i32>, TransportError> {
        let metadata = self
            .consumer
            .fetch_metadata(Some(topic), METADATA_TIMEOUT)
            .map_err(|e| TransportError::Metadata(topic.to_string(), e.to_string()))?;

        Ok(metadata
            .topics()
            .iter()
            .find(|t| t.name() == topic)
            .map(|t| t.partitions().iter().map(|p| p.id()).collect())
            .unwrap_or_default())
    }

    fn subscribe(
        &self,
        topic: &str,
        partition: i32,
    ) -> Result<Box<dyn PartitionSubscription>, TransportError> {
        let mut assignment = TopicPartitionList::new();
        assignment
            .add_partition_offset(topic, partition, Offset::End)
            .map_err(|e| TransportError::Subscription(e.to_string()))?;

        self.consumer
            .assign(&assignment)
            .map_err(|e| TransportError::Subscription(e.to_string()))?;

        tracing::debug!(topic, partition, "assigned partition at newest offset");

        Ok(Box::new(KafkaSubscription {
            consumer: Arc::clone(&self.consumer),
        }))
    }

    fn close(self: Box<Self>) -> Result<(), TransportError> {
        // Dropping the client closes the broker connection.
        Ok(())
    }
}

/// Subscription to a single Kafka partition.
struct KafkaSubscription {
    consumer: Arc<StreamConsumer>,
}

#[async_trait]
impl PartitionSubscription for KafkaSubscription {
    async fn next_message(&mut self) -> Result<ReceivedMessage, TransportError> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;

        Ok(ReceivedMessage {
            offset: message.offset(),
            payload: Bytes::copy_from_slice(message.payload().unwrap_or_default()),
        })
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.consumer
            .unassign()
            .map_err(|e| TransportError::Subscription(e.to_string()))
    }
}
