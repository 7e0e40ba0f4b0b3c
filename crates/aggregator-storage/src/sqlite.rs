//! SQLite-backed [`Storage`] implementation.
//!
//! Uses runtime queries (`sqlx::query`) instead of the compile-time
//! macros so builds do not need a `DATABASE_URL`; values are read back
//! with explicit `.get()` calls. The schema is created by the bundled
//! sqlx migration on startup.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use aggregator_types::{ClusterName, ClusterReport, OrgId};

use crate::error::Result;
use crate::{Storage, StorageError};

/// SQLite-backed report store.
///
/// The pool is thread-safe; a single instance is shared across the
/// ingestion loop and the HTTP server.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (or create) the database at `datasource` and run migrations.
    ///
    /// `datasource` is a file path, or `:memory:` for an ephemeral
    /// database.
    pub async fn new(datasource: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", datasource))
            .map_err(StorageError::Database)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Ephemeral in-memory database, for tests.
    pub async fn new_in_memory() -> Result<Self> {
        Self::new(":memory:").await
    }

    /// Close the connection pool. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn write_report_for_cluster(
        &self,
        org_id: OrgId,
        cluster: &ClusterName,
        report: &ClusterReport,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO report (org_id, cluster, report, reported_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (org_id, cluster)
            DO UPDATE SET report = excluded.report, reported_at = excluded.reported_at
            "#,
        )
        .bind(org_id.as_u64() as i64)
        .bind(cluster.as_str())
        .bind(report.as_str())
        .bind(Self::now_ms())
        .execute(&self.pool)
        .await?;

        tracing::debug!(org_id = %org_id, cluster = %cluster, "stored report");
        Ok(())
    }

    async fn read_report_for_cluster(
        &self,
        org_id: OrgId,
        cluster: &ClusterName,
    ) -> Result<ClusterReport> {
        let row = sqlx::query("SELECT report FROM report WHERE org_id = ? AND cluster = ?")
            .bind(org_id.as_u64() as i64)
            .bind(cluster.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(ClusterReport::new(row.get::<String, _>("report"))),
            None => Err(StorageError::ReportNotFound(org_id, cluster.clone())),
        }
    }

    async fn list_of_orgs(&self) -> Result<Vec<OrgId>> {
        let rows = sqlx::query("SELECT DISTINCT org_id FROM report ORDER BY org_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| OrgId(row.get::<i64, _>("org_id") as u64))
            .collect())
    }

    async fn list_of_clusters_for_org(&self, org_id: OrgId) -> Result<Vec<ClusterName>> {
        let rows = sqlx::query("SELECT cluster FROM report WHERE org_id = ? ORDER BY cluster")
            .bind(org_id.as_u64() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| ClusterName::new(row.get::<String, _>("cluster")))
            .collect())
    }
}
