pub mod client;
pub mod reconcile;
pub mod row;

pub use client::{GoogleSheetValues, RangeWrite, SheetValues, ValueInput};
pub use reconcile::{ReconcileResult, SheetReconciler};
