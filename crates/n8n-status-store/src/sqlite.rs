use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::types::ExecutionRow;
use crate::{Error, ExecutionRecord, Store};

/// Time a query waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Time spent waiting for the pool to hand out its connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// SQLite-based store implementation.
pub struct SqliteStore {
  pool: SqlitePool,
}

impl SqliteStore {
  /// Create a new SQLite store with the given connection pool.
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Open an n8n database file read-only.
  ///
  /// The connection is established lazily, so a missing or corrupt file is
  /// reported by the first query rather than here.
  pub fn open(path: impl AsRef<Path>) -> Self {
    let options = SqliteConnectOptions::new()
      .filename(path.as_ref())
      .read_only(true)
      .create_if_missing(false)
      .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .acquire_timeout(ACQUIRE_TIMEOUT)
      .connect_lazy_with(options);

    Self::new(pool)
  }
}

#[async_trait]
impl Store for SqliteStore {
  async fn fetch_executions(&self, limit: u32) -> Result<Vec<ExecutionRecord>, Error> {
    let rows: Vec<ExecutionRow> = sqlx::query_as(
      r#"
            SELECT
                CAST(e.id AS TEXT) AS id,
                CASE WHEN e.finished = 1 THEN 1 ELSE 0 END AS finished,
                COALESCE(e.status, '') AS status,
                e.startedAt AS started_at,
                e.stoppedAt AS stopped_at,
                CAST(e.workflowId AS TEXT) AS workflow_id,
                w.name AS workflow_name,
                w.nodes AS workflow_nodes,
                CAST(e.retryOf AS TEXT) AS retry_of,
                COALESCE(e.mode, '') AS mode
            FROM execution_entity e
            JOIN workflow_entity w ON e.workflowId = w.id
            WHERE e.startedAt IS NOT NULL
            ORDER BY e.startedAt DESC
            LIMIT ?
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    debug!(limit, rows = rows.len(), "fetched executions");

    Ok(rows.into_iter().map(ExecutionRecord::from).collect())
  }

  async fn fetch_execution(&self, execution_id: &str) -> Result<Option<ExecutionRecord>, Error> {
    let row: Option<ExecutionRow> = sqlx::query_as(
      r#"
            SELECT
                CAST(e.id AS TEXT) AS id,
                CASE WHEN e.finished = 1 THEN 1 ELSE 0 END AS finished,
                COALESCE(e.status, '') AS status,
                e.startedAt AS started_at,
                e.stoppedAt AS stopped_at,
                CAST(e.workflowId AS TEXT) AS workflow_id,
                w.name AS workflow_name,
                w.nodes AS workflow_nodes,
                CAST(e.retryOf AS TEXT) AS retry_of,
                COALESCE(e.mode, '') AS mode
            FROM execution_entity e
            JOIN workflow_entity w ON e.workflowId = w.id
            WHERE CAST(e.id AS TEXT) = ?
            "#,
    )
    .bind(execution_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(ExecutionRecord::from))
  }

  async fn fetch_error_payload(&self, execution_id: &str) -> Result<Option<String>, Error> {
    let data: Option<Option<String>> = sqlx::query_scalar(
      r#"
            SELECT data
            FROM execution_data
            WHERE CAST(executionId AS TEXT) = ?
            LIMIT 1
            "#,
    )
    .bind(execution_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(data.flatten().filter(|data| !data.trim().is_empty()))
  }
}
