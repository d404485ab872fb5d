use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;

/// An execution row as selected from the joined execution/workflow tables.
///
/// Timestamps are kept as the text n8n wrote; they are parsed when the row is
/// turned into an [`ExecutionRecord`].
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ExecutionRow {
  pub id: String,
  pub finished: bool,
  pub status: String,
  pub started_at: Option<String>,
  pub stopped_at: Option<String>,
  pub workflow_id: String,
  pub workflow_name: String,
  pub workflow_nodes: Option<String>,
  pub retry_of: Option<String>,
  pub mode: String,
}

/// A snapshot of one workflow execution joined with its workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
  pub id: String,
  pub finished: bool,
  /// Raw status as stored (`running`, `success`, `error`, `crashed`, ...).
  pub status: String,
  pub started_at: Option<DateTime<Utc>>,
  pub stopped_at: Option<DateTime<Utc>>,
  pub workflow_id: String,
  pub workflow_name: String,
  /// JSON text of the workflow's node array.
  #[serde(skip_serializing)]
  pub workflow_nodes: Option<String>,
  pub retry_of: Option<String>,
  pub mode: String,
}

impl From<ExecutionRow> for ExecutionRecord {
  fn from(row: ExecutionRow) -> Self {
    let started_at = timestamp_column(&row.id, "startedAt", row.started_at.as_deref());
    let stopped_at = timestamp_column(&row.id, "stoppedAt", row.stopped_at.as_deref());

    Self {
      id: row.id,
      finished: row.finished,
      status: row.status,
      started_at,
      stopped_at,
      workflow_id: row.workflow_id,
      workflow_name: row.workflow_name,
      workflow_nodes: row.workflow_nodes,
      retry_of: row.retry_of.filter(|id| !id.is_empty()),
      mode: row.mode,
    }
  }
}

fn timestamp_column(execution_id: &str, column: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
  let raw = raw?;
  let parsed = parse_timestamp(raw);
  if parsed.is_none() {
    warn!(execution_id, column, value = raw, "unrecognized timestamp format");
  }
  parsed
}

/// Parse a timestamp as n8n stores it in SQLite.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]` (UTC, no offset), the same with a `T`
/// separator, and RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }

  [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
  ]
  .iter()
  .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
  .map(|naive| naive.and_utc())
}
