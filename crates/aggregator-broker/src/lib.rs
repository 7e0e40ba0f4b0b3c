//! Broker transport and report ingestion for the cluster report aggregator.
//!
//! The ingestion pipeline lives here: a [`Consumer`] owns one broker
//! connection and one partition subscription, pulls report messages
//! sequentially, decodes and validates each one, and hands validated
//! records to the storage sink. Per-message failures are logged and the
//! loop moves on; only a transport-level read failure stops it.
//!
//! The transport is abstracted behind [`BrokerConnection`] and
//! [`PartitionSubscription`] so the loop can be tested against scripted
//! fakes; [`kafka`] holds the single production implementation.

pub mod config;
pub mod consumer;
pub mod error;
pub mod kafka;
pub mod message;
pub mod producer;
pub mod transport;

pub use config::BrokerConfig;
pub use consumer::Consumer;
pub use error::{ConsumerError, TransportError};
pub use kafka::KafkaConnection;
pub use message::{parse_report_message, IncomingMessage};
pub use producer::produce_report_message;
pub use transport::{BrokerConnection, PartitionSubscription, ReceivedMessage};
