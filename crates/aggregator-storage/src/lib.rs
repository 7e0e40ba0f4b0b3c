//! Report storage for the cluster report aggregator.
//!
//! The [`Storage`] trait is the sink contract the ingestion pipeline hands
//! validated records to, plus the read operations the HTTP API serves
//! results from. One production implementation exists,
//! [`SqliteStorage`]; tests substitute their own fakes behind the trait.
//!
//! Writes are upserts keyed on (organization, cluster): the pipeline
//! performs no deduplication of its own, so replaying a message simply
//! writes the same row again.

use async_trait::async_trait;
use serde::Deserialize;

use aggregator_types::{ClusterName, ClusterReport, OrgId};

pub mod error;
mod sqlite;

pub use error::{Result, StorageError};
pub use sqlite::SqliteStorage;

/// Storage configuration, loaded once at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite datasource: a file path, or `:memory:` for an ephemeral
    /// database.
    pub datasource: String,
}

/// Persistence operations over cluster reports.
///
/// A single write call is atomic; the trait imposes no further locking and
/// callers may share one instance across tasks.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist the report for a cluster, replacing any previous report
    /// stored for the same (organization, cluster) pair.
    async fn write_report_for_cluster(
        &self,
        org_id: OrgId,
        cluster: &ClusterName,
        report: &ClusterReport,
    ) -> Result<()>;

    /// Fetch the latest report for a cluster.
    ///
    /// Returns [`StorageError::ReportNotFound`] when nothing has been
    /// stored for the pair.
    async fn read_report_for_cluster(
        &self,
        org_id: OrgId,
        cluster: &ClusterName,
    ) -> Result<ClusterReport>;

    /// All organizations with at least one stored report, ascending.
    async fn list_of_orgs(&self) -> Result<Vec<OrgId>>;

    /// All clusters with a stored report for the organization, ascending.
    async fn list_of_clusters_for_org(&self, org_id: OrgId) -> Result<Vec<ClusterName>>;
}
