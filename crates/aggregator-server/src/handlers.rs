//! Request handlers for the report API.
//!
//! Organization ids and cluster names arrive as path parameters and go
//! through the typed extraction helpers before any storage access. The
//! status-code split is deliberate and asymmetric: a bad organization id
//! is client error (400), while a missing or malformed `cluster`
//! parameter is treated as a routing-layer fault and always surfaces as
//! an internal error (500).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use aggregator_storage::StorageError;
use aggregator_types::{ClusterName, ClusterReport, OrgId};

use crate::params::{get_positive_int_param, ParamError};
use crate::response::{bad_request, internal_server_error, not_found, ok_response};
use crate::AppState;

#[derive(Debug, Serialize)]
struct OrganizationsResponse {
    status: &'static str,
    organizations: Vec<OrgId>,
}

#[derive(Debug, Serialize)]
struct ClustersResponse {
    status: &'static str,
    clusters: Vec<ClusterName>,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    status: &'static str,
    report: ClusterReport,
}

/// Liveness endpoint.
pub(crate) async fn main_endpoint() -> Response {
    ok_response()
}

/// List all organizations with stored reports.
pub(crate) async fn list_organizations(State(state): State<AppState>) -> Response {
    match state.storage.list_of_orgs().await {
        Ok(organizations) => (
            StatusCode::OK,
            Json(OrganizationsResponse {
                status: "ok",
                organizations,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "failed to list organizations");
            internal_server_error("unable to read list of organizations")
        }
    }
}

/// List clusters with stored reports for one organization.
pub(crate) async fn clusters_for_organization(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Response {
    let org_id = match read_organization_id(&params) {
        Ok(org_id) => org_id,
        Err(response) => return response,
    };

    match state.storage.list_of_clusters_for_org(org_id).await {
        Ok(clusters) => (
            StatusCode::OK,
            Json(ClustersResponse {
                status: "ok",
                clusters,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, org_id = %org_id, "failed to list clusters");
            internal_server_error("unable to read list of clusters")
        }
    }
}

/// Fetch the latest report for one cluster.
pub(crate) async fn report_for_cluster(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Response {
    let org_id = match read_organization_id(&params) {
        Ok(org_id) => org_id,
        Err(response) => return response,
    };
    let cluster = match read_cluster_name(&params) {
        Ok(cluster) => cluster,
        Err(response) => return response,
    };

    match state.storage.read_report_for_cluster(org_id, &cluster).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ReportResponse {
                status: "ok",
                report,
            }),
        )
            .into_response(),
        Err(error @ StorageError::ReportNotFound(..)) => not_found(error.to_string()),
        Err(error) => {
            tracing::error!(error = %error, org_id = %org_id, cluster = %cluster, "failed to read report");
            internal_server_error("unable to read report")
        }
    }
}

/// Extract and validate the `organization` path parameter.
///
/// A parsing failure is the client's fault (400); anything else is ours
/// (500). The status is chosen by the error kind alone.
fn read_organization_id(params: &HashMap<String, String>) -> Result<OrgId, Response> {
    match get_positive_int_param(params, "organization") {
        Ok(value) => Ok(OrgId(value as u64)),
        Err(error @ ParamError::Parsing { .. }) => {
            tracing::error!(error = %error, "error getting organization ID from request");
            Err(bad_request(error.to_string()))
        }
        Err(error) => {
            tracing::error!(error = %error, "error getting organization ID from request");
            Err(internal_server_error(error.to_string()))
        }
    }
}

/// Extract and validate the `cluster` path parameter.
///
/// The parameter is looked up directly: if it is absent the route table
/// itself is misconfigured, so both the missing and the malformed case
/// surface as internal errors, never as client errors.
fn read_cluster_name(params: &HashMap<String, String>) -> Result<ClusterName, Response> {
    let Some(cluster) = params.get("cluster") else {
        const MESSAGE: &str = "Cluster name is not provided";
        tracing::error!("{}", MESSAGE);
        return Err(internal_server_error(MESSAGE));
    };

    if uuid::Uuid::parse_str(cluster).is_err() {
        const MESSAGE: &str = "Cluster name format is invalid";
        tracing::error!("{}", MESSAGE);
        return Err(internal_server_error(MESSAGE));
    }

    Ok(ClusterName::new(cluster.clone()))
}
