//! Store-backed enrichment.
//!
//! The `Enricher` fetches execution records, looks up failure payloads for
//! failed executions only, and applies [`enrich`] to each record in store
//! order. Store failures are logged and absorbed here: a failed listing
//! yields an empty report, a failed payload lookup yields default error
//! details for that one record.

use chrono::{DateTime, Utc};
use n8n_status_store::{ExecutionRecord, Store};
use tracing::{debug, error, warn};

use crate::enrich::{EnrichedExecution, enrich};
use crate::status::DisplayStatus;

/// Runs enrichment over executions read from a [`Store`].
pub struct Enricher<S> {
  store: S,
}

impl<S: Store> Enricher<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Enrich the most recent `limit` executions, newest first.
  ///
  /// Returns an empty list if the store cannot be queried.
  pub async fn recent(&self, limit: u32, now: DateTime<Utc>) -> Vec<EnrichedExecution> {
    let records = match self.store.fetch_executions(limit).await {
      Ok(records) => records,
      Err(e) => {
        error!(error = %e, limit, "failed to fetch executions");
        return Vec::new();
      }
    };

    let mut enriched = Vec::with_capacity(records.len());
    for record in records {
      enriched.push(self.enrich_record(record, now).await);
    }
    enriched
  }

  /// Enrich a single execution by exact ID.
  ///
  /// Returns `None` if the execution does not exist or the store cannot be
  /// queried.
  pub async fn by_id(&self, execution_id: &str, now: DateTime<Utc>) -> Option<EnrichedExecution> {
    let record = match self.store.fetch_execution(execution_id).await {
      Ok(record) => record?,
      Err(e) => {
        error!(error = %e, execution_id, "failed to fetch execution");
        return None;
      }
    };

    Some(self.enrich_record(record, now).await)
  }

  /// Get a reference to the store.
  pub fn store(&self) -> &S {
    &self.store
  }

  async fn enrich_record(&self, record: ExecutionRecord, now: DateTime<Utc>) -> EnrichedExecution {
    if DisplayStatus::of(&record) != DisplayStatus::Error {
      return enrich(record, None, now);
    }

    let payload = match self.store.fetch_error_payload(&record.id).await {
      Ok(payload) => payload,
      Err(e) => {
        warn!(error = %e, execution_id = %record.id, "failed to fetch failure payload");
        None
      }
    };

    debug!(
      execution_id = %record.id,
      has_payload = payload.is_some(),
      "enriching failed execution"
    );

    enrich(record, payload.as_deref(), now)
  }
}
