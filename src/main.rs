use repairflow::api::{self, ApiState};
use repairflow::config::Config;
use repairflow::jobs::{JobLifecycle, SqliteJobStore};
use repairflow::sheet::{GoogleSheetValues, SheetReconciler};
use repairflow::{db, Error};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env()?;

    let pool = db::make_pool(&cfg.database_url).await?;
    if cfg.migrate_on_startup {
        db::run_migrations(&pool).await?;
    }

    let store = Arc::new(SqliteJobStore::new(pool, cfg.job_no_prefix.clone()));
    let lifecycle = JobLifecycle::new(store.clone(), cfg.reentry_policy());

    // Sheet sync is optional: without a target the /sync route answers 503
    // while the job ledger keeps working.
    let reconciler = match cfg.sheet_target() {
        Ok(target) => {
            let api = Arc::new(GoogleSheetValues::new(&target)?);
            Some(Arc::new(SheetReconciler::new(
                api,
                target.sheet_id,
                target.tab,
            )))
        }
        Err(Error::Configuration { message }) => {
            warn!(%message, "sheet sync disabled");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = ApiState {
        lifecycle,
        store,
        reconciler,
    };

    let addr = cfg
        .admin_addr
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    info!(%addr, "repairflow listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
