use async_trait::async_trait;
use repairflow::error::{Error, Result};
use repairflow::jobs::model::{ClientFields, TechnicianChecks};
use repairflow::jobs::{JobLifecycle, ReentryPolicy, SqliteJobStore};
use repairflow::sheet::client::{RangeWrite, SheetValues, ValueInput};
use repairflow::{db, jobs::JobStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub async fn setup_store() -> Arc<SqliteJobStore> {
    let pool = db::make_pool("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    db::run_migrations(&pool).await.expect("migrations failed");

    Arc::new(SqliteJobStore::new(pool, "JB-"))
}

#[allow(dead_code)]
pub async fn setup_lifecycle(reentry: ReentryPolicy) -> (Arc<SqliteJobStore>, JobLifecycle) {
    let store = setup_store().await;
    let lifecycle = JobLifecycle::new(store.clone() as Arc<dyn JobStore>, reentry);
    (store, lifecycle)
}

#[allow(dead_code)]
pub fn client(name: &str) -> ClientFields {
    ClientFields {
        client_name: name.to_string(),
        entry_date: "2024-02-01".to_string(),
        make: "ABB".to_string(),
        model_no: "ACS550".to_string(),
        serial_no: "SN-000123".to_string(),
    }
}

#[allow(dead_code)]
pub fn checks() -> TechnicianChecks {
    TechnicianChecks {
        input: "OK".to_string(),
        output: "OK".to_string(),
        choke: "OK".to_string(),
        control_board: "Repaired".to_string(),
        control_board_supply: "OK".to_string(),
        fan: "Replaced".to_string(),
        power_card_condition: "Good".to_string(),
        remarks: "IGBT module replaced".to_string(),
        checked_by: "tech-1".to_string(),
        repaired_by: "tech-2".to_string(),
        repair_date: "2024-02-03".to_string(),
        warranty_start: "2024-02-03".to_string(),
        warranty_end: "2024-08-03".to_string(),
    }
}

/// Scriptable in-memory stand-in for the sheet values API.
///
/// Holds data rows only (no header); row 0 corresponds to sheet row 2.
/// Reads and either write operation can be forced to fail, and every write
/// attempt bumps a counter so tests can prove short-circuit behavior.
#[allow(dead_code)]
pub struct MemSheet {
    pub rows: Mutex<Vec<Vec<String>>>,
    pub fail_reads: AtomicBool,
    pub fail_updates: AtomicBool,
    pub fail_appends: AtomicBool,
    pub write_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MemSheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_reads: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            fail_appends: AtomicBool::new(false),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Sheet row number out of a `Tab!A<n>:G<n>` range.
    fn row_no(range: &str) -> usize {
        let after = range.split('!').nth(1).unwrap_or(range);
        after
            .trim_start_matches('A')
            .split(':')
            .next()
            .and_then(|s| s.parse().ok())
            .expect("range is not a single-row A:G range")
    }
}

#[async_trait]
impl SheetValues for MemSheet {
    async fn get_rows(&self, _sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::ExternalRead {
                range: range.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.snapshot())
    }

    async fn update_ranges(
        &self,
        _sheet_id: &str,
        writes: &[RangeWrite],
        _input: ValueInput,
    ) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_updates.load(Ordering::SeqCst) {
            // Same range detail the HTTP client reports: the batch's ranges.
            let ranges = writes
                .iter()
                .map(|w| w.range.as_str())
                .collect::<Vec<_>>()
                .join(",");
            return Err(Error::ExternalWrite {
                operation: "update",
                range: ranges,
                message: "injected write failure".to_string(),
            });
        }

        let mut rows = self.rows.lock().unwrap();
        for write in writes {
            // Data rows start at sheet row 2.
            let idx = Self::row_no(&write.range) - 2;
            for (offset, values) in write.values.iter().enumerate() {
                rows[idx + offset] = values.clone();
            }
        }
        Ok(())
    }

    async fn append_rows(
        &self,
        _sheet_id: &str,
        range_hint: &str,
        values: &[Vec<String>],
        _input: ValueInput,
    ) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::ExternalWrite {
                operation: "append",
                range: range_hint.to_string(),
                message: "injected write failure".to_string(),
            });
        }

        self.rows.lock().unwrap().extend(values.iter().cloned());
        Ok(())
    }
}
