//! repairflow: a repair-job ledger with spreadsheet mirroring.
//!
//! Jobs move `received -> inspected -> complete`, with each transition
//! gating which fields it may write. A minimal client projection of the
//! ledger is reconciled into an external spreadsheet on demand
//! (match-by-key, batched updates, append for new rows). Report text is
//! composed from section templates plus stored remarks whenever a PDF is
//! generated.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod report;
pub mod sheet;

pub use config::Config;
pub use error::{Error, Result};
