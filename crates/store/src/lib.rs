//! `dishstock-store` — the data-access layer over SQLite.
//!
//! The rest of the workspace never sees a SQL statement: this crate exposes a
//! typed capability set per entity (create/read/update/delete), transactional
//! movement recording, and the aggregation queries behind the dashboard and
//! the reports.

pub mod articles;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod movements;
pub mod users;

mod integration_tests;

pub use dashboard::{DashboardStats, MovementSummary};
pub use db::Store;
pub use error::{StoreError, StoreResult};
pub use movements::{EntryRecord, ExitRecord};
