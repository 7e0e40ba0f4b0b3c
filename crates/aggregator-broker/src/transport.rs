//! Broker transport abstraction.
//!
//! The ingestion loop depends on these traits rather than on a concrete
//! broker client, so tests can substitute scripted fakes. Exactly one
//! production implementation exists, in [`crate::kafka`].

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;

/// A message delivered from a partition subscription.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Offset of the message within its partition.
    pub offset: i64,
    /// Raw payload bytes.
    pub payload: Bytes,
}

/// An open connection to a broker.
///
/// The connection is owned exclusively by its consumer and is not shared
/// across instances. `close` consumes the connection; release happens at
/// most once.
pub trait BrokerConnection: Send {
    /// Partition ids of the given topic.
    fn partitions(&self, topic: &str) -> Result<Vec<i32>, TransportError>;

    /// Subscribe to one partition starting at the newest offset.
    ///
    /// Only messages published after the subscription begins are seen;
    /// history is not replayed.
    fn subscribe(
        &self,
        topic: &str,
        partition: i32,
    ) -> Result<Box<dyn PartitionSubscription>, TransportError>;

    /// Release the connection.
    fn close(self: Box<Self>) -> Result<(), TransportError>;
}

/// An active subscription to a single partition.
#[async_trait]
pub trait PartitionSubscription: Send {
    /// Block until the next message is available.
    ///
    /// There is no timeout on this wait. An error means the subscription
    /// read failed at the transport level.
    async fn next_message(&mut self) -> Result<ReceivedMessage, TransportError>;

    /// Release the subscription.
    fn close(&mut self) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // ReceivedMessage
    // ---------------------------------------------------------------

    #[test]
    fn test_received_message_construction() {
        let msg = ReceivedMessage {
            offset: 42,
            payload: Bytes::from(r#"{"OrgID":1}"#),
        };
        assert_eq!(msg.offset, 42);
        assert_eq!(msg.payload, Bytes::from(r#"{"OrgID":1}"#));
    }

    #[test]
    fn test_received_message_clone() {
        let msg = ReceivedMessage {
            offset: 7,
            payload: Bytes::from("payload"),
        };
        let cloned = msg.clone();
        assert_eq!(cloned.offset, msg.offset);
        assert_eq!(cloned.payload, msg.payload);
    }

    // ---------------------------------------------------------------
    // Object safety (compile-time verification)
    // ---------------------------------------------------------------

    struct NullSubscription;

    #[async_trait]
    impl PartitionSubscription for NullSubscription {
        async fn next_message(&mut self) -> Result<ReceivedMessage, TransportError> {
            Err(TransportError::Read("closed".into()))
        }
        fn close(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    struct NullConnection;

    impl BrokerConnection for NullConnection {
        fn partitions(&self, _topic: &str) -> Result<Vec<i32>, TransportError> {
            Ok(vec![0])
        }
        fn subscribe(
            &self,
            _topic: &str,
            _partition: i32,
        ) -> Result<Box<dyn PartitionSubscription>, TransportError> {
            Ok(Box::new(NullSubscription))
        }
        fn close(self: Box<Self>) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn test_connection_object_safety() {
        let connection: Box<dyn BrokerConnection> = Box::new(NullConnection);
        assert_eq!(connection.partitions("t").unwrap(), vec![0]);
        connection.close().unwrap();
    }

    #[tokio::test]
    async fn test_subscription_object_safety() {
        let connection = NullConnection;
        let mut subscription = connection.subscribe("t", 0).unwrap();
        assert!(subscription.next_message().await.is_err());
        subscription.close().unwrap();
    }
}
