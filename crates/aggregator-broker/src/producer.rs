//! One-shot publisher for report messages.
//!
//! Used by the CLI `produce` mode to push test payloads onto the
//! configured topic; the production publisher for real reports is the
//! upstream pipeline, not this process.

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};

use crate::config::BrokerConfig;
use crate::error::TransportError;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Publish one payload to the configured topic.
///
/// Returns the (partition, offset) the message landed on.
pub async fn produce_report_message(
    config: &BrokerConfig,
    payload: &str,
) -> Result<(i32, i64), TransportError> {
    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", &config.address)
        .set("message.timeout.ms", "10000")
        .create()
        .map_err(|e| TransportError::Connection(e.to_string()))?;

    let record = FutureRecord::<(), str>::to(&config.topic).payload(payload);

    let (partition, offset) = producer
        .send(record, SEND_TIMEOUT)
        .await
        .map_err(|(e, _)| TransportError::Produce(e.to_string()))?;

    tracing::info!(
        topic = %config.topic,
        partition,
        offset,
        "report message produced"
    );

    Ok((partition, offset))
}
