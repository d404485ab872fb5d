//! n8n-status Report
//!
//! Renders enriched executions as a fixed four-column table:
//!
//! ```text
//! Workflow                                     Started At          Status                             Execution ID
//! ----------------------------------------------------------------------------------------------------------------
//! ✕ CRM sync                                   2025-03-01 11:10:00 Error in 3.0s                      11
//!     Error: Invalid credentials (Schedule Trigger (ID: 0))
//! ```
//!
//! Rendering produces a `String`; printing is left to the caller. Colors are
//! opt-in so output can be piped or compared in tests.

mod format;
mod table;

pub use format::{format_duration, format_timestamp, truncate};
pub use table::{NO_DATA, render_table};
