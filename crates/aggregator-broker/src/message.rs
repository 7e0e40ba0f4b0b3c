//! Decoding and validation of incoming report messages.
//!
//! One pass, two checks: the payload must structurally decode as a JSON
//! object with the expected primitive types, then every required
//! attribute must actually be present. Presence is tracked with
//! `Option` wrappers during decode and collapsed here, so a missing
//! attribute is reported by name while a type mismatch surfaces as a
//! decode error.

use serde::Deserialize;

use aggregator_types::{ClusterName, ClusterReport, OrgId};

use crate::error::ConsumerError;

/// A validated report message, alive only between decode and the handoff
/// to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub org_id: OrgId,
    pub cluster_name: ClusterName,
    pub report: ClusterReport,
}

/// Wire shape of a report message. Attributes are optional during decode
/// and required afterwards; unrecognized keys are ignored.
#[derive(Debug, Deserialize)]
struct RawReportMessage {
    #[serde(rename = "OrgID")]
    org_id: Option<OrgId>,
    #[serde(rename = "ClusterName")]
    cluster_name: Option<ClusterName>,
    #[serde(rename = "Report")]
    report: Option<ClusterReport>,
}

/// Decode and validate one report message payload.
///
/// Pure and deterministic: identical bytes always yield an identical
/// outcome. The first missing attribute encountered determines the
/// reported error.
pub fn parse_report_message(payload: &[u8]) -> Result<IncomingMessage, ConsumerError> {
    let raw: RawReportMessage =
        serde_json::from_slice(payload).map_err(ConsumerError::Decode)?;

    let org_id = raw.org_id.ok_or(ConsumerError::MissingAttribute("OrgID"))?;
    let cluster_name = raw
        .cluster_name
        .ok_or(ConsumerError::MissingAttribute("ClusterName"))?;
    let report = raw.report.ok_or(ConsumerError::MissingAttribute("Report"))?;

    Ok(IncomingMessage {
        org_id,
        cluster_name,
        report,
    })
}
