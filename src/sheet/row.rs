use crate::jobs::model::Job;

/// Cells per sheet row. The sheet only ever carries the minimal client
/// projection; technician and report fields are never exported.
pub const ROW_WIDTH: usize = 7;

/// Header row of the jobs tab, column order fixed.
pub const HEADER: [&str; ROW_WIDTH] = [
    "Job No",
    "Client Name",
    "Entry Date",
    "Make",
    "Model No",
    "Serial No",
    "Dispatch Date",
];

/// Maps a job to its sheet row. Total: missing optional fields become empty
/// strings, never nulls (the sheet has no null representation).
pub fn to_row(job: &Job) -> Vec<String> {
    vec![
        job.job_no.clone(),
        job.client_name.clone(),
        job.entry_date.clone(),
        job.make.clone(),
        job.model_no.clone(),
        job.serial_no.clone(),
        job.dispatch_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    ]
}

/// The reconciliation key of a raw sheet row: the first cell, or the empty
/// string for a blank row.
pub fn key_of(row: &[String]) -> &str {
    row.first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::model::{ClientFields, Job};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn bare_job() -> Job {
        Job::received(
            "JB-0001".to_string(),
            ClientFields {
                client_name: "Acme".to_string(),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn to_row_is_total_over_missing_optionals() {
        let mut job = bare_job();
        job.client_name = String::new();

        let row = to_row(&job);
        assert_eq!(row.len(), ROW_WIDTH);
        assert_eq!(row[0], "JB-0001");
        assert!(row[1..].iter().all(String::is_empty));
    }

    #[test]
    fn to_row_is_idempotent() {
        let job = bare_job();
        assert_eq!(to_row(&job), to_row(&job));
    }

    #[test]
    fn dispatch_date_renders_date_only() {
        let mut job = bare_job();
        job.dispatch_date = NaiveDate::from_ymd_opt(2024, 3, 9);

        let row = to_row(&job);
        assert_eq!(row[6], "2024-03-09");
    }

    #[test]
    fn key_of_blank_row_is_empty() {
        assert_eq!(key_of(&[]), "");
        assert_eq!(key_of(&["JB-0002".to_string()]), "JB-0002");
    }
}
