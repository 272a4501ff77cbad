use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One repair-tracking record, keyed by `job_no`.
///
/// The persisted shape is flat and its field names are an external contract
/// (PDF collaborator, sheet projection). Which fields an operation may write
/// is enforced by the lifecycle layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub job_no: String,

    // client intake
    pub client_name: String,
    pub entry_date: String,
    pub make: String,
    pub model_no: String,
    pub serial_no: String,

    pub status: String,

    // technician checks
    pub input: String,
    pub output: String,
    pub choke: String,
    pub control_board: String,
    pub control_board_supply: String,
    pub fan: String,
    pub power_card_condition: String,
    pub remarks: String,
    pub checked_by: String,
    pub repaired_by: String,
    pub repair_date: String,
    pub warranty_start: String,
    pub warranty_end: String,

    // report remarks only; merged report text is derived on demand
    pub inspection_remarks: String,
    pub service_remarks: String,
    pub testing_remarks: String,
    pub warranty_remarks: String,

    pub dispatch_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields writable through the intake path (and the explicit amend override).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFields {
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model_no: String,
    #[serde(default)]
    pub serial_no: String,
    pub client_name: String,
}

/// Fields written only by the inspected transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicianChecks {
    pub input: String,
    pub output: String,
    pub choke: String,
    pub control_board: String,
    pub control_board_supply: String,
    pub fan: String,
    pub power_card_condition: String,
    pub remarks: String,
    pub checked_by: String,
    pub repaired_by: String,
    pub repair_date: String,
    pub warranty_start: String,
    pub warranty_end: String,
}

/// Additional remarks per report section, written only by the complete
/// transition. Empty remarks leave the section template untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRemarks {
    pub inspection: String,
    pub service: String,
    pub testing: String,
    pub warranty: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Received,
    Inspected,
    Complete,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Received => "received",
            JobStatus::Inspected => "inspected",
            JobStatus::Complete => "complete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "received" => Some(JobStatus::Received),
            "inspected" => Some(JobStatus::Inspected),
            "complete" => Some(JobStatus::Complete),
            _ => None,
        }
    }
}

impl Job {
    /// Builds a freshly received job. Field gating happens in the lifecycle;
    /// this only assembles the record shape.
    pub fn received(job_no: String, client: ClientFields, created_at: DateTime<Utc>) -> Self {
        Self {
            job_no,
            client_name: client.client_name,
            entry_date: client.entry_date,
            make: client.make,
            model_no: client.model_no,
            serial_no: client.serial_no,
            status: JobStatus::Received.as_str().to_string(),
            input: String::new(),
            output: String::new(),
            choke: String::new(),
            control_board: String::new(),
            control_board_supply: String::new(),
            fan: String::new(),
            power_card_condition: String::new(),
            remarks: String::new(),
            checked_by: String::new(),
            repaired_by: String::new(),
            repair_date: String::new(),
            warranty_start: String::new(),
            warranty_end: String::new(),
            inspection_remarks: String::new(),
            service_remarks: String::new(),
            testing_remarks: String::new(),
            warranty_remarks: String::new(),
            dispatch_date: None,
            created_at,
        }
    }

    pub fn status(&self) -> Option<JobStatus> {
        JobStatus::parse(&self.status)
    }
}
