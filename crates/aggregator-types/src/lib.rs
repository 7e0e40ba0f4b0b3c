//! Shared domain types for the cluster report aggregator.
//!
//! These newtypes flow through the whole pipeline: the broker consumer
//! decodes incoming messages into them, the storage layer persists them,
//! and the HTTP API returns them. They are deliberately thin wrappers --
//! validation beyond basic shape (UUID syntax, positivity) happens at the
//! boundaries that care about it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a customer organization.
///
/// Positive in every valid context; boundary code (HTTP parameter
/// extraction) enforces `> 0` before constructing one from client input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrgId(pub u64);

impl OrgId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a cluster, UUID-formatted in every valid context.
///
/// Stored as the raw string so reports published with an unexpected name
/// shape are still persisted verbatim; the HTTP boundary rejects non-UUID
/// names before they reach a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterName(pub String);

impl ClusterName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Serialized analysis report for a cluster.
///
/// Opaque at this layer: the pipeline never interprets the content, it
/// only moves it from the broker into storage and back out of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterReport(pub String);

impl ClusterReport {
    pub fn new(report: impl Into<String>) -> Self {
        Self(report.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterReport {
    fn from(report: &str) -> Self {
        Self(report.to_string())
    }
}
