//! Match-or-append reconciliation between the job ledger and the sheet.

use crate::error::Result;
use crate::jobs::model::Job;
use crate::sheet::client::{RangeWrite, SheetValues, ValueInput};
use crate::sheet::row::{key_of, to_row};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Rows above the data region (the header row).
const HEADER_ROWS: usize = 1;

/// Summary of one reconcile run: counts and the ranges it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub updated: usize,
    pub appended: usize,
    pub updated_ranges: Vec<String>,
    pub appended_range: Option<String>,
}

/// Pushes the minimal job projection into the sheet.
///
/// The sheet is a derived, eventually-consistent copy: this component reads
/// jobs and writes the sheet, never the other way around. Concurrent runs
/// can race on the read step and double-append a new job; usage is
/// single-actor-at-a-time by design.
pub struct SheetReconciler {
    api: Arc<dyn SheetValues>,
    sheet_id: String,
    tab: String,
}

impl SheetReconciler {
    pub fn new(api: Arc<dyn SheetValues>, sheet_id: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            api,
            sheet_id: sheet_id.into(),
            tab: tab.into(),
        }
    }

    /// Reconciles `jobs` against the sheet's current data rows.
    ///
    /// Existing rows are matched by job number (first occurrence wins when
    /// the sheet carries duplicates from earlier partial syncs; later
    /// duplicates are left untouched). Matched jobs become one batched
    /// multi-range update; the rest are appended after the last existing
    /// row, updates first.
    ///
    /// A failed read aborts before any write — only a successful fetch with
    /// no data rows counts as an empty sheet. Write failures propagate
    /// without retry: re-running from a fresh fetch is the only safe retry.
    pub async fn reconcile(&self, jobs: &[Job]) -> Result<ReconcileResult> {
        let first_data_row = HEADER_ROWS + 1;
        let data_range = format!("{}!A{}:G", self.tab, first_data_row);

        let existing = self.api.get_rows(&self.sheet_id, &data_range).await?;
        debug!(rows = existing.len(), "fetched existing sheet rows");

        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, row) in existing.iter().enumerate() {
            let key = key_of(row);
            if !key.is_empty() {
                index.entry(key).or_insert(i);
            }
        }

        let mut updates: Vec<RangeWrite> = Vec::new();
        let mut appends: Vec<Vec<String>> = Vec::new();

        for job in jobs {
            let row = to_row(job);
            match index.get(job.job_no.as_str()) {
                Some(&i) => {
                    let row_no = i + first_data_row;
                    updates.push(RangeWrite {
                        range: format!("{}!A{row_no}:G{row_no}", self.tab),
                        values: vec![row],
                    });
                }
                None => appends.push(row),
            }
        }

        let updated_ranges: Vec<String> = updates.iter().map(|w| w.range.clone()).collect();

        if !updates.is_empty() {
            self.api
                .update_ranges(&self.sheet_id, &updates, ValueInput::UserEntered)
                .await?;
        }

        let appended_range = if appends.is_empty() {
            None
        } else {
            self.api
                .append_rows(
                    &self.sheet_id,
                    &format!("{}!A{first_data_row}", self.tab),
                    &appends,
                    ValueInput::UserEntered,
                )
                .await?;

            // Appends land directly after the rows we fetched.
            let start = existing.len() + first_data_row;
            let end = start + appends.len() - 1;
            Some(format!("{}!A{start}:G{end}", self.tab))
        };

        let result = ReconcileResult {
            updated: updated_ranges.len(),
            appended: appends.len(),
            updated_ranges,
            appended_range,
        };

        info!(
            updated = result.updated,
            appended = result.appended,
            "sheet reconcile complete"
        );
        Ok(result)
    }
}
