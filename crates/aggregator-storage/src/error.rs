//! Error types for the storage layer.

use aggregator_types::{ClusterName, OrgId};
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure on startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No report stored for the given organization and cluster.
    #[error("no report found for organization {0} and cluster {1}")]
    ReportNotFound(OrgId, ClusterName),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
