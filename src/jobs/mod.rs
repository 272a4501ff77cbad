pub mod lifecycle;
pub mod model;
pub mod store;

pub use lifecycle::{JobLifecycle, ReentryPolicy};
pub use model::{ClientFields, Job, JobStatus, ReportRemarks, TechnicianChecks};
pub use store::{JobStore, SqliteJobStore};
