//! Report composition: section templates merged with operator remarks.
//!
//! Pure and stateless. Only the remarks are ever persisted; the merged text
//! is recomputed on demand so the two can never drift.

use crate::jobs::model::Job;
use serde::Serialize;

pub const INSPECTION_TEMPLATE: &str = "After detailed inspection and diagnostic evaluation, the unit was found to have internal electrical malfunction.\n\nNecessary diagnostic checks were carried out to identify the root cause.\n\n(Detailed internal inspection checklists are maintained for internal service records and are not included in this report.)";

// The trailing double-spaces on the bullet and result lines are part of the
// canonical report text; the PDF collaborator renders these bytes as-is.
pub const SERVICE_TEMPLATE: &str = "The following service actions were performed:\n\n\u{2022} Internal electrical section serviced  \n\u{2022} Defective components replaced  \n\u{2022} Internal connections cleaned and secured  \n\u{2022} Cooling system checked and restored  \n\u{2022} Complete functional verification completed  \n\nAll repairs were carried out using standard industrial service procedures.";

pub const TESTING_TEMPLATE: &str = "The drive was tested under controlled conditions with rated input supply.\n\nTest Results:\n- Drive operates normally  \n- No abnormal heating observed  \n- Output parameters within permissible limits  \n- Unit successfully passed load testing";

/// Rendered literally when a warranty date is absent. Part of the external
/// contract with the PDF collaborator.
pub const MISSING_DATE: &str = "N/A";

/// Merges a section template with the operator's additional remarks.
/// Empty remarks return the template unchanged.
pub fn compose(template: &str, remarks: &str) -> String {
    if remarks.is_empty() {
        template.to_string()
    } else {
        format!("{template}\n\nAdditional Remarks:\n{remarks}")
    }
}

/// The warranty template interpolates the warranty period.
pub fn warranty_template(warranty_start: &str, warranty_end: &str) -> String {
    let start = if warranty_start.is_empty() {
        MISSING_DATE
    } else {
        warranty_start
    };
    let end = if warranty_end.is_empty() {
        MISSING_DATE
    } else {
        warranty_end
    };

    format!(
        "The repair is covered under warranty against workmanship-related defects.\n\nWARRANTY PERIOD:\nStart Date: {start}\nEnd Date: {end}\n\nWarranty does not cover physical damage, mishandling, improper installation, or electrical misuse."
    )
}

/// Everything the PDF collaborator needs: the six client-info fields, the
/// four composed report strings, and the warranty date pair.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub job_no: String,
    pub client_name: String,
    pub entry_date: String,
    pub make: String,
    pub model_no: String,
    pub serial_no: String,

    pub warranty_start: String,
    pub warranty_end: String,

    pub inspection_report: String,
    pub service_report: String,
    pub testing_report: String,
    pub warranty_report: String,
}

impl ReportBundle {
    pub fn for_job(job: &Job) -> Self {
        Self {
            job_no: job.job_no.clone(),
            client_name: job.client_name.clone(),
            entry_date: job.entry_date.clone(),
            make: job.make.clone(),
            model_no: job.model_no.clone(),
            serial_no: job.serial_no.clone(),
            warranty_start: job.warranty_start.clone(),
            warranty_end: job.warranty_end.clone(),
            inspection_report: compose(INSPECTION_TEMPLATE, &job.inspection_remarks),
            service_report: compose(SERVICE_TEMPLATE, &job.service_remarks),
            testing_report: compose(TESTING_TEMPLATE, &job.testing_remarks),
            warranty_report: compose(
                &warranty_template(&job.warranty_start, &job.warranty_end),
                &job.warranty_remarks,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_remarks_leave_template_unchanged() {
        assert_eq!(compose(INSPECTION_TEMPLATE, ""), INSPECTION_TEMPLATE);
    }

    #[test]
    fn remarks_are_appended_exactly() {
        assert_eq!(
            compose("template", "extra"),
            "template\n\nAdditional Remarks:\nextra"
        );
    }

    #[test]
    fn list_lines_keep_their_trailing_spaces() {
        assert!(SERVICE_TEMPLATE.contains("serviced  \n"));
        assert!(SERVICE_TEMPLATE.contains("completed  \n\n"));
        assert!(TESTING_TEMPLATE.contains("normally  \n"));
        assert!(TESTING_TEMPLATE.ends_with("passed load testing"));
    }

    #[test]
    fn warranty_dates_fall_back_to_sentinel() {
        let text = warranty_template("", "");
        assert!(text.contains("Start Date: N/A"));
        assert!(text.contains("End Date: N/A"));

        let text = warranty_template("2024-01-01", "2024-07-01");
        assert!(text.contains("Start Date: 2024-01-01"));
        assert!(text.contains("End Date: 2024-07-01"));
    }
}
