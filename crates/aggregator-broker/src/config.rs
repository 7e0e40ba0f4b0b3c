//! Broker configuration.

use serde::Deserialize;

/// Connection settings for the message broker, loaded once at process
/// start and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Broker address, e.g. `localhost:9092`.
    pub address: String,
    /// Topic carrying cluster report messages.
    pub topic: String,
    /// Consumer group id.
    pub group: String,
}
