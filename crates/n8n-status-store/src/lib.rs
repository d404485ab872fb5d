//! n8n-status Store
//!
//! This crate provides read-only access to the execution history an n8n
//! instance persists in SQLite. Three tables are consumed:
//! - `execution_entity`: one row per execution (status, time bounds, retries)
//! - `workflow_entity`: workflow definitions (name, JSON node array)
//! - `execution_data`: the detailed JSON payload of each execution
//!
//! The [`Store`] trait defines the queries the report needs. Executions are
//! joined to their workflow in a single round trip; failure payloads are
//! fetched on demand, one execution at a time.

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::{ExecutionRecord, parse_timestamp};

use async_trait::async_trait;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The database could not be opened or a query failed.
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),
}

/// Read-only queries over n8n execution history.
#[async_trait]
pub trait Store: Send + Sync {
  /// List the most recent started executions, newest first, at most `limit`.
  async fn fetch_executions(&self, limit: u32) -> Result<Vec<ExecutionRecord>, Error>;

  /// Get a single execution by its exact ID.
  async fn fetch_execution(&self, execution_id: &str) -> Result<Option<ExecutionRecord>, Error>;

  /// Get the raw JSON payload recorded for an execution, if any.
  async fn fetch_error_payload(&self, execution_id: &str) -> Result<Option<String>, Error>;
}
