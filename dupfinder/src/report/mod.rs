//! Everything a run hands back to the user.
//!
//! - [`logs`] - Status lines on the console
//! - [`summary`] - The fixed-format summary block
//! - [`export`] - The duplicate subset as CSV

pub mod export;
pub mod logs;
pub mod summary;

pub use export::{export_csv, write_duplicates};
pub use logs::{Console, LogEntry, LogLevel};
pub use summary::{RecordCount, RunStatus, SummaryReport};
