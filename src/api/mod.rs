use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Error;
use crate::jobs::model::{ClientFields, Job, ReportRemarks, TechnicianChecks};
use crate::jobs::{JobLifecycle, JobStore};
use crate::report::ReportBundle;
use crate::sheet::reconcile::ReconcileResult;
use crate::sheet::SheetReconciler;

#[derive(Clone)]
pub struct ApiState {
    pub lifecycle: JobLifecycle,
    pub store: Arc<dyn JobStore>,
    /// Absent when the sheet target is not configured; the sync route then
    /// answers 503 while everything else keeps working.
    pub reconciler: Option<Arc<SheetReconciler>>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:job_no", get(get_job))
        .route("/jobs/:job_no/client", put(amend_client))
        .route("/jobs/:job_no/inspect", post(inspect_job))
        .route("/jobs/:job_no/complete", post(complete_job))
        .route("/jobs/:job_no/report", get(get_report))
        .route("/sync", post(sync_sheet))
        .route("/health", get(health))
        .with_state(state)
}

fn api_err(e: Error) -> (StatusCode, String) {
    let status = match &e {
        Error::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::ExternalRead { .. } | Error::ExternalWrite { .. } => StatusCode::BAD_GATEWAY,
        Error::Configuration { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

pub async fn create_job(
    State(state): State<ApiState>,
    Json(body): Json<ClientFields>,
) -> Result<(StatusCode, Json<Job>), (StatusCode, String)> {
    let job = state.lifecycle.create_job(body).await.map_err(api_err)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list_jobs(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Job>>, (StatusCode, String)> {
    let jobs = state.store.list_all().await.map_err(api_err)?;
    Ok(Json(jobs))
}

pub async fn get_job(
    State(state): State<ApiState>,
    Path(job_no): Path<String>,
) -> Result<Json<Job>, (StatusCode, String)> {
    let job = state
        .store
        .get(&job_no)
        .await
        .map_err(api_err)?
        .ok_or_else(|| api_err(Error::NotFound { job_no }))?;
    Ok(Json(job))
}

pub async fn amend_client(
    State(state): State<ApiState>,
    Path(job_no): Path<String>,
    Json(body): Json<ClientFields>,
) -> Result<Json<Job>, (StatusCode, String)> {
    let job = state
        .lifecycle
        .amend_client_fields(&job_no, body)
        .await
        .map_err(api_err)?;
    Ok(Json(job))
}

pub async fn inspect_job(
    State(state): State<ApiState>,
    Path(job_no): Path<String>,
    Json(body): Json<TechnicianChecks>,
) -> Result<Json<Job>, (StatusCode, String)> {
    let job = state
        .lifecycle
        .advance_to_inspected(&job_no, body)
        .await
        .map_err(api_err)?;
    Ok(Json(job))
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub job: Job,
    pub report: ReportBundle,
}

pub async fn complete_job(
    State(state): State<ApiState>,
    Path(job_no): Path<String>,
    Json(body): Json<ReportRemarks>,
) -> Result<Json<CompleteResponse>, (StatusCode, String)> {
    let job = state
        .lifecycle
        .advance_to_complete(&job_no, body)
        .await
        .map_err(api_err)?;
    let report = ReportBundle::for_job(&job);
    Ok(Json(CompleteResponse { job, report }))
}

pub async fn get_report(
    State(state): State<ApiState>,
    Path(job_no): Path<String>,
) -> Result<Json<ReportBundle>, (StatusCode, String)> {
    let job = state
        .store
        .get(&job_no)
        .await
        .map_err(api_err)?
        .ok_or_else(|| api_err(Error::NotFound { job_no }))?;
    Ok(Json(ReportBundle::for_job(&job)))
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub updated: usize,
    pub appended: usize,
    pub updated_ranges: Vec<String>,
    pub appended_range: Option<String>,
}

impl From<ReconcileResult> for SyncResponse {
    fn from(r: ReconcileResult) -> Self {
        Self {
            updated: r.updated,
            appended: r.appended,
            updated_ranges: r.updated_ranges,
            appended_range: r.appended_range,
        }
    }
}

pub async fn sync_sheet(
    State(state): State<ApiState>,
) -> Result<Json<SyncResponse>, (StatusCode, String)> {
    let reconciler = state.reconciler.as_ref().ok_or_else(|| {
        api_err(Error::configuration(
            "sheet sync is not configured (RFLOW_SHEET_ID / RFLOW_SHEETS_TOKEN)",
        ))
    })?;

    let jobs = state.store.list_all().await.map_err(api_err)?;
    let result = reconciler.reconcile(&jobs).await.map_err(api_err)?;
    Ok(Json(result.into()))
}

pub async fn health() -> &'static str {
    "ok"
}
