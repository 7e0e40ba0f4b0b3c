//! Integration tests for the SQLite report store.

use aggregator_storage::{SqliteStorage, Storage, StorageError};
use aggregator_types::{ClusterName, ClusterReport, OrgId};

const CLUSTER_A: &str = "aaaaaaaa-bbbb-cccc-dddd-000000000000";
const CLUSTER_B: &str = "bbbbbbbb-cccc-dddd-eeee-111111111111";

async fn store() -> SqliteStorage {
    SqliteStorage::new_in_memory().await.unwrap()
}

#[tokio::test]
async fn test_write_then_read_roundtrip() {
    let storage = store().await;
    let cluster = ClusterName::from(CLUSTER_A);
    let report = ClusterReport::from(r#"{"findings":[]}"#);

    storage
        .write_report_for_cluster(OrgId(1), &cluster, &report)
        .await
        .unwrap();

    let fetched = storage
        .read_report_for_cluster(OrgId(1), &cluster)
        .await
        .unwrap();
    assert_eq!(fetched, report);
}

#[tokio::test]
async fn test_rewrite_replaces_previous_report() {
    let storage = store().await;
    let cluster = ClusterName::from(CLUSTER_A);

    storage
        .write_report_for_cluster(OrgId(1), &cluster, &ClusterReport::from("old"))
        .await
        .unwrap();
    storage
        .write_report_for_cluster(OrgId(1), &cluster, &ClusterReport::from("new"))
        .await
        .unwrap();

    let fetched = storage
        .read_report_for_cluster(OrgId(1), &cluster)
        .await
        .unwrap();
    assert_eq!(fetched.as_str(), "new");

    // Still a single cluster entry for the org.
    let clusters = storage.list_of_clusters_for_org(OrgId(1)).await.unwrap();
    assert_eq!(clusters, vec![cluster]);
}

#[tokio::test]
async fn test_read_missing_report_is_not_found() {
    let storage = store().await;
    let err = storage
        .read_report_for_cluster(OrgId(5), &ClusterName::from(CLUSTER_A))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ReportNotFound(OrgId(5), _)));
}

#[tokio::test]
async fn test_reports_are_isolated_per_org() {
    let storage = store().await;
    let cluster = ClusterName::from(CLUSTER_A);

    storage
        .write_report_for_cluster(OrgId(1), &cluster, &ClusterReport::from("org1"))
        .await
        .unwrap();

    let err = storage
        .read_report_for_cluster(OrgId(2), &cluster)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ReportNotFound(..)));
}

#[tokio::test]
async fn test_list_of_orgs_distinct_and_sorted() {
    let storage = store().await;
    let report = ClusterReport::from("{}");

    storage
        .write_report_for_cluster(OrgId(3), &ClusterName::from(CLUSTER_A), &report)
        .await
        .unwrap();
    storage
        .write_report_for_cluster(OrgId(1), &ClusterName::from(CLUSTER_A), &report)
        .await
        .unwrap();
    storage
        .write_report_for_cluster(OrgId(1), &ClusterName::from(CLUSTER_B), &report)
        .await
        .unwrap();

    let orgs = storage.list_of_orgs().await.unwrap();
    assert_eq!(orgs, vec![OrgId(1), OrgId(3)]);
}

#[tokio::test]
async fn test_list_of_clusters_for_org() {
    let storage = store().await;
    let report = ClusterReport::from("{}");

    storage
        .write_report_for_cluster(OrgId(1), &ClusterName::from(CLUSTER_B), &report)
        .await
        .unwrap();
    storage
        .write_report_for_cluster(OrgId(1), &ClusterName::from(CLUSTER_A), &report)
        .await
        .unwrap();
    storage
        .write_report_for_cluster(OrgId(2), &ClusterName::from(CLUSTER_B), &report)
        .await
        .unwrap();

    let clusters = storage.list_of_clusters_for_org(OrgId(1)).await.unwrap();
    assert_eq!(
        clusters,
        vec![ClusterName::from(CLUSTER_A), ClusterName::from(CLUSTER_B)]
    );

    assert!(storage
        .list_of_clusters_for_org(OrgId(9))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_report_content_is_opaque() {
    // Payloads that are not JSON are stored and returned verbatim.
    let storage = store().await;
    let cluster = ClusterName::from(CLUSTER_A);
    let report = ClusterReport::from("not json at all \u{1F980}");

    storage
        .write_report_for_cluster(OrgId(1), &cluster, &report)
        .await
        .unwrap();
    let fetched = storage
        .read_report_for_cluster(OrgId(1), &cluster)
        .await
        .unwrap();
    assert_eq!(fetched, report);
}
