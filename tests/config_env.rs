use repairflow::config::Config;
use repairflow::error::Error;
use repairflow::jobs::ReentryPolicy;
use serial_test::serial;

fn clear_env() {
    for key in [
        "RFLOW_DATABASE_URL",
        "DATABASE_URL",
        "RFLOW_ADMIN_ADDR",
        "ADMIN_ADDR",
        "RFLOW_MIGRATE_ON_STARTUP",
        "RFLOW_JOB_NO_PREFIX",
        "JOB_NO_PREFIX",
        "RFLOW_ALLOW_REOPEN",
        "RFLOW_SHEET_ID",
        "SHEET_ID",
        "RFLOW_SHEET_TAB",
        "SHEET_TAB",
        "RFLOW_SHEETS_TOKEN",
        "SHEETS_TOKEN",
        "RFLOW_SHEETS_API_BASE",
        "SHEETS_API_BASE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_apply_without_environment() {
    clear_env();

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.database_url, "sqlite:repairflow.db");
    assert_eq!(cfg.job_no_prefix, "JB-");
    assert_eq!(cfg.sheet_tab, "Jobs");
    assert_eq!(cfg.reentry_policy(), ReentryPolicy::Strict);
}

#[test]
#[serial]
fn missing_sheet_target_is_a_configuration_error() {
    clear_env();

    let cfg = Config::from_env().unwrap();
    let err = cfg.sheet_target().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
#[serial]
fn sheet_target_resolves_when_configured() {
    clear_env();
    std::env::set_var("RFLOW_SHEET_ID", "sheet-123");
    std::env::set_var("RFLOW_SHEETS_TOKEN", "token-abc");
    std::env::set_var("RFLOW_SHEET_TAB", "Ledger");

    let cfg = Config::from_env().unwrap();
    let target = cfg.sheet_target().unwrap();
    assert_eq!(target.sheet_id, "sheet-123");
    assert_eq!(target.token, "token-abc");
    assert_eq!(target.tab, "Ledger");
    assert_eq!(target.api_base, "https://sheets.googleapis.com");

    clear_env();
}

#[test]
#[serial]
fn reopen_flag_switches_the_reentry_policy() {
    clear_env();
    std::env::set_var("RFLOW_ALLOW_REOPEN", "true");

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.reentry_policy(), ReentryPolicy::Permissive);

    clear_env();
}
