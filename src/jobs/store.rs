use crate::error::Result;
use crate::jobs::model::Job;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Abstract keyed persistence for job records: the single source of truth.
///
/// The sheet reconciler only ever reads through this trait; the lifecycle is
/// the only writer of technician and report fields.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get(&self, job_no: &str) -> Result<Option<Job>>;

    /// Inserts or fully replaces the record keyed by `job.job_no`.
    ///
    /// Concurrent writers on the same `job_no` are a caller error: last
    /// write wins, there is no version check at this layer.
    async fn put(&self, job: &Job) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<Job>>;

    /// Atomically reserves the next job number. Numbers are unique and
    /// monotonically increasing across all callers of one store.
    async fn reserve_job_no(&self) -> Result<String>;
}

/// Reference `JobStore` backed by SQLite.
#[derive(Clone)]
pub struct SqliteJobStore {
    pool: SqlitePool,
    job_no_prefix: String,
}

impl SqliteJobStore {
    pub fn new(pool: SqlitePool, job_no_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            job_no_prefix: job_no_prefix.into(),
        }
    }
}

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn get(&self, job_no: &str) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE job_no = ?1")
            .bind(job_no)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn put(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                job_no,
                client_name, entry_date, make, model_no, serial_no,
                status,
                input, output, choke, control_board, control_board_supply,
                fan, power_card_condition, remarks, checked_by, repaired_by,
                repair_date, warranty_start, warranty_end,
                inspection_remarks, service_remarks, testing_remarks, warranty_remarks,
                dispatch_date, created_at
            )
            VALUES (
                ?1,
                ?2, ?3, ?4, ?5, ?6,
                ?7,
                ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17,
                ?18, ?19, ?20,
                ?21, ?22, ?23, ?24,
                ?25, ?26
            )
            ON CONFLICT(job_no) DO UPDATE SET
                client_name = excluded.client_name,
                entry_date = excluded.entry_date,
                make = excluded.make,
                model_no = excluded.model_no,
                serial_no = excluded.serial_no,
                status = excluded.status,
                input = excluded.input,
                output = excluded.output,
                choke = excluded.choke,
                control_board = excluded.control_board,
                control_board_supply = excluded.control_board_supply,
                fan = excluded.fan,
                power_card_condition = excluded.power_card_condition,
                remarks = excluded.remarks,
                checked_by = excluded.checked_by,
                repaired_by = excluded.repaired_by,
                repair_date = excluded.repair_date,
                warranty_start = excluded.warranty_start,
                warranty_end = excluded.warranty_end,
                inspection_remarks = excluded.inspection_remarks,
                service_remarks = excluded.service_remarks,
                testing_remarks = excluded.testing_remarks,
                warranty_remarks = excluded.warranty_remarks,
                dispatch_date = excluded.dispatch_date
            "#,
        )
        .bind(&job.job_no)
        .bind(&job.client_name)
        .bind(&job.entry_date)
        .bind(&job.make)
        .bind(&job.model_no)
        .bind(&job.serial_no)
        .bind(&job.status)
        .bind(&job.input)
        .bind(&job.output)
        .bind(&job.choke)
        .bind(&job.control_board)
        .bind(&job.control_board_supply)
        .bind(&job.fan)
        .bind(&job.power_card_condition)
        .bind(&job.remarks)
        .bind(&job.checked_by)
        .bind(&job.repaired_by)
        .bind(&job.repair_date)
        .bind(&job.warranty_start)
        .bind(&job.warranty_end)
        .bind(&job.inspection_remarks)
        .bind(&job.service_remarks)
        .bind(&job.testing_remarks)
        .bind(&job.warranty_remarks)
        .bind(job.dispatch_date)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT *
            FROM jobs
            ORDER BY created_at ASC, job_no ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn reserve_job_no(&self) -> Result<String> {
        let n: i64 = sqlx::query_scalar(
            r#"
            UPDATE job_counter
            SET last_no = last_no + 1
            WHERE id = 1
            RETURNING last_no
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(format!("{}{:04}", self.job_no_prefix, n))
    }
}
