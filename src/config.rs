use crate::error::{Error, Result};
use crate::jobs::lifecycle::ReentryPolicy;

/// Runtime configuration, loaded from environment variables.
///
/// Everything needed by the job ledger has a default; the Google Sheet
/// target is optional and only required once the sync feature is used
/// (see [`Config::sheet_target`]).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub admin_addr: Option<String>,
    pub migrate_on_startup: bool,
    pub job_no_prefix: String,
    pub allow_reopen: bool,

    pub sheet_id: Option<String>,
    pub sheet_tab: String,
    pub sheets_token: Option<String>,
    pub sheets_api_base: String,
}

/// Resolved sheet target: only materializes when id + token are present.
#[derive(Clone, Debug)]
pub struct SheetTarget {
    pub sheet_id: String,
    pub tab: String,
    pub token: String,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env_or_fallback("RFLOW_DATABASE_URL", "DATABASE_URL")
            .unwrap_or_else(|| "sqlite:repairflow.db".to_string());

        let admin_addr = env_or_fallback("RFLOW_ADMIN_ADDR", "ADMIN_ADDR")
            .and_then(|s| normalize_optional_addr(&s));

        let migrate_on_startup = env_bool("RFLOW_MIGRATE_ON_STARTUP").unwrap_or(true);

        let job_no_prefix = env_or_fallback("RFLOW_JOB_NO_PREFIX", "JOB_NO_PREFIX")
            .unwrap_or_else(|| "JB-".to_string());

        let allow_reopen = env_bool("RFLOW_ALLOW_REOPEN").unwrap_or(false);

        let sheet_id = env_or_fallback("RFLOW_SHEET_ID", "SHEET_ID");

        let sheet_tab =
            env_or_fallback("RFLOW_SHEET_TAB", "SHEET_TAB").unwrap_or_else(|| "Jobs".to_string());

        let sheets_token = env_or_fallback("RFLOW_SHEETS_TOKEN", "SHEETS_TOKEN");

        let sheets_api_base = env_or_fallback("RFLOW_SHEETS_API_BASE", "SHEETS_API_BASE")
            .unwrap_or_else(|| "https://sheets.googleapis.com".to_string());

        Ok(Self {
            database_url,
            admin_addr,
            migrate_on_startup,
            job_no_prefix,
            allow_reopen,
            sheet_id,
            sheet_tab,
            sheets_token,
            sheets_api_base,
        })
    }

    /// Whether a finished job may be re-opened by `advance_to_inspected`.
    pub fn reentry_policy(&self) -> ReentryPolicy {
        if self.allow_reopen {
            ReentryPolicy::Permissive
        } else {
            ReentryPolicy::Strict
        }
    }

    /// Resolves the sheet target, or a `Configuration` error naming what is
    /// missing. Lifecycle operations never call this; only the sync path does.
    pub fn sheet_target(&self) -> Result<SheetTarget> {
        let sheet_id = self
            .sheet_id
            .clone()
            .ok_or_else(|| Error::configuration("RFLOW_SHEET_ID is missing"))?;
        let token = self
            .sheets_token
            .clone()
            .ok_or_else(|| Error::configuration("RFLOW_SHEETS_TOKEN is missing"))?;

        Ok(SheetTarget {
            sheet_id,
            tab: self.sheet_tab.clone(),
            token,
            api_base: self.sheets_api_base.clone(),
        })
    }
}

fn env_or_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var(fallback).ok().filter(|s| !s.trim().is_empty()))
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn normalize_optional_addr(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if matches!(v.to_lowercase().as_str(), "0" | "off" | "false" | "none") {
        return None;
    }
    Some(v.to_string())
}
