use crate::error::{Error, Result};
use crate::jobs::model::{ClientFields, Job, JobStatus, ReportRemarks, TechnicianChecks};
use crate::jobs::store::JobStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Governs `advance_to_inspected` on a job that is already complete.
///
/// The original variants disagreed on this, so both behaviors exist behind
/// the `RFLOW_ALLOW_REOPEN` flag rather than silently picking one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReentryPolicy {
    /// Forward-only: a complete job cannot re-enter inspection.
    Strict,
    /// A complete job may be re-opened; its status drops back to inspected.
    Permissive,
}

/// The job state machine: `received -> inspected -> complete`.
///
/// This layer is the only writer of technician and report fields; nothing
/// else may touch them. Client fields are writable at intake and through the
/// explicit [`JobLifecycle::amend_client_fields`] override, which is an
/// authorized edit path, not a transition.
#[derive(Clone)]
pub struct JobLifecycle {
    store: Arc<dyn JobStore>,
    reentry: ReentryPolicy,
}

impl JobLifecycle {
    pub fn new(store: Arc<dyn JobStore>, reentry: ReentryPolicy) -> Self {
        Self { store, reentry }
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    /// Intake: reserves a job number and creates the record as `received`.
    pub async fn create_job(&self, client: ClientFields) -> Result<Job> {
        validate_client(&client)?;

        let job_no = self.store.reserve_job_no().await?;
        let job = Job::received(job_no, client, Utc::now());
        self.store.put(&job).await?;

        info!(job_no = %job.job_no, "job received");
        Ok(job)
    }

    /// Writes the technician checks and moves the job to `inspected`.
    ///
    /// Re-entry while already `inspected` is allowed so a technician can
    /// correct their data. Re-entry after `complete` depends on the
    /// configured [`ReentryPolicy`]. Never touches `dispatch_date`.
    pub async fn advance_to_inspected(
        &self,
        job_no: &str,
        checks: TechnicianChecks,
    ) -> Result<Job> {
        let mut job = self.fetch(job_no).await?;

        if job.status() == Some(JobStatus::Complete) && self.reentry == ReentryPolicy::Strict {
            return Err(Error::validation(format!(
                "job {job_no} is complete and cannot be re-opened"
            )));
        }

        job.input = checks.input;
        job.output = checks.output;
        job.choke = checks.choke;
        job.control_board = checks.control_board;
        job.control_board_supply = checks.control_board_supply;
        job.fan = checks.fan;
        job.power_card_condition = checks.power_card_condition;
        job.remarks = checks.remarks;
        job.checked_by = checks.checked_by;
        job.repaired_by = checks.repaired_by;
        job.repair_date = checks.repair_date;
        job.warranty_start = checks.warranty_start;
        job.warranty_end = checks.warranty_end;
        job.status = JobStatus::Inspected.as_str().to_string();

        self.store.put(&job).await?;
        info!(job_no, "job inspected");
        Ok(job)
    }

    /// Stores the report remarks (remarks only — merged report text is
    /// derived on demand, never persisted) and moves the job to `complete`.
    ///
    /// `dispatch_date` is set to today's date in UTC, date-only. Calling
    /// this again re-sets it to the new today: an intentional re-dispatch.
    pub async fn advance_to_complete(&self, job_no: &str, remarks: ReportRemarks) -> Result<Job> {
        let mut job = self.fetch(job_no).await?;

        job.inspection_remarks = remarks.inspection;
        job.service_remarks = remarks.service;
        job.testing_remarks = remarks.testing;
        job.warranty_remarks = remarks.warranty;
        job.status = JobStatus::Complete.as_str().to_string();
        let dispatched = Utc::now().date_naive();
        job.dispatch_date = Some(dispatched);

        self.store.put(&job).await?;
        info!(job_no, dispatch_date = %dispatched, "job complete");
        Ok(job)
    }

    /// Explicit override: re-write the client intake fields regardless of
    /// status. Deliberately not a lifecycle transition — status is untouched.
    pub async fn amend_client_fields(&self, job_no: &str, client: ClientFields) -> Result<Job> {
        validate_client(&client)?;

        let mut job = self.fetch(job_no).await?;

        job.client_name = client.client_name;
        job.entry_date = client.entry_date;
        job.make = client.make;
        job.model_no = client.model_no;
        job.serial_no = client.serial_no;

        self.store.put(&job).await?;
        info!(job_no, "client fields amended");
        Ok(job)
    }

    async fn fetch(&self, job_no: &str) -> Result<Job> {
        self.store.get(job_no).await?.ok_or_else(|| Error::NotFound {
            job_no: job_no.to_string(),
        })
    }
}

fn validate_client(client: &ClientFields) -> Result<()> {
    if client.client_name.trim().is_empty() {
        return Err(Error::validation("client_name must not be empty"));
    }
    Ok(())
}
