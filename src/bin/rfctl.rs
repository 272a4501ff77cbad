use repairflow::config::Config;
use repairflow::db;
use repairflow::jobs::{
    ClientFields, JobLifecycle, JobStore, ReportRemarks, SqliteJobStore, TechnicianChecks,
};
use repairflow::report::ReportBundle;
use repairflow::sheet::client::{RangeWrite, SheetValues, ValueInput};
use repairflow::sheet::row::HEADER;
use repairflow::sheet::{GoogleSheetValues, SheetReconciler};
use sqlx::SqlitePool;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "rfctl <command>\n\
             Commands:\n\
             - reset\n\
             - seed <n>\n\
             - list\n\
             - show <job_no>\n\
             - report <job_no>\n\
             - sync\n\
             \n\
             Uses RFLOW_DATABASE_URL (default sqlite:repairflow.db).\n"
        );
        std::process::exit(2);
    }

    let cfg = Config::from_env()?;
    let pool = db::make_pool(&cfg.database_url).await?;
    db::run_migrations(&pool).await?;

    let store = Arc::new(SqliteJobStore::new(pool.clone(), cfg.job_no_prefix.clone()));
    let lifecycle = JobLifecycle::new(store.clone(), cfg.reentry_policy());

    match args[1].as_str() {
        "reset" => reset(&pool).await?,
        "seed" => {
            let n: i64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);
            seed(&lifecycle, n).await?;
        }
        "list" => list(store.as_ref()).await?,
        "show" => {
            let job_no = args.get(2).expect("usage: rfctl show <job_no>");
            show(store.as_ref(), job_no).await?;
        }
        "report" => {
            let job_no = args.get(2).expect("usage: rfctl report <job_no>");
            report(store.as_ref(), job_no).await?;
        }
        "sync" => sync(&cfg, store.as_ref()).await?,
        other => {
            eprintln!("Unknown command: {other}");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn reset(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM jobs").execute(pool).await?;
    sqlx::query("UPDATE job_counter SET last_no = 0 WHERE id = 1")
        .execute(pool)
        .await?;

    println!("reset OK");
    Ok(())
}

async fn seed(lifecycle: &JobLifecycle, n: i64) -> anyhow::Result<()> {
    for i in 0..n {
        let job = lifecycle
            .create_job(ClientFields {
                client_name: format!("Demo Client {}", i + 1),
                entry_date: "2024-01-15".to_string(),
                make: "Danfoss".to_string(),
                model_no: format!("FC-30{i}"),
                serial_no: format!("SN-{:06}", 1000 + i),
            })
            .await?;
        println!("+ received job {}", job.job_no);

        // Walk every other job further along the lifecycle.
        if i % 2 == 0 {
            lifecycle
                .advance_to_inspected(
                    &job.job_no,
                    TechnicianChecks {
                        input: "OK".to_string(),
                        output: "OK".to_string(),
                        fan: "Replaced".to_string(),
                        checked_by: "demo".to_string(),
                        ..Default::default()
                    },
                )
                .await?;
            println!("  -> inspected");
        }
        if i % 4 == 0 {
            lifecycle
                .advance_to_complete(&job.job_no, ReportRemarks::default())
                .await?;
            println!("  -> complete (dispatched)");
        }
    }
    Ok(())
}

async fn list(store: &dyn JobStore) -> anyhow::Result<()> {
    let jobs = store.list_all().await?;
    for job in &jobs {
        println!(
            "{}  {:10}  {}  dispatch={}",
            job.job_no,
            job.status,
            job.client_name,
            job.dispatch_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!("total: {}", jobs.len());
    Ok(())
}

async fn show(store: &dyn JobStore, job_no: &str) -> anyhow::Result<()> {
    match store.get(job_no).await? {
        Some(job) => println!("{}", serde_json::to_string_pretty(&job)?),
        None => {
            eprintln!("job {job_no} not found");
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn report(store: &dyn JobStore, job_no: &str) -> anyhow::Result<()> {
    match store.get(job_no).await? {
        Some(job) => {
            let bundle = ReportBundle::for_job(&job);
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        None => {
            eprintln!("job {job_no} not found");
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn sync(cfg: &Config, store: &dyn JobStore) -> anyhow::Result<()> {
    let target = cfg.sheet_target()?;
    let api = Arc::new(GoogleSheetValues::new(&target)?);

    // A fresh sheet has no header yet; write it once so the data region the
    // reconciler works on always starts at row 2.
    let header_range = format!("{}!A1:G1", target.tab);
    if api.get_rows(&target.sheet_id, &header_range).await?.is_empty() {
        api.update_ranges(
            &target.sheet_id,
            &[RangeWrite {
                range: header_range,
                values: vec![HEADER.iter().map(|s| s.to_string()).collect()],
            }],
            ValueInput::Raw,
        )
        .await?;
        println!("wrote header row");
    }

    let reconciler = SheetReconciler::new(api, target.sheet_id, target.tab);

    let jobs = store.list_all().await?;
    let result = reconciler.reconcile(&jobs).await?;

    println!(
        "sync OK: updated={} appended={}",
        result.updated, result.appended
    );
    for range in &result.updated_ranges {
        println!("  updated {range}");
    }
    if let Some(range) = &result.appended_range {
        println!("  appended {range}");
    }
    Ok(())
}
