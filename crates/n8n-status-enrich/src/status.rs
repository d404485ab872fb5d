use std::fmt;

use chrono::{DateTime, Utc};
use n8n_status_store::ExecutionRecord;
use serde::{Serialize, Serializer};
use tracing::warn;

/// Report-facing status of an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStatus {
  Running,
  Waiting,
  Error,
  Success,
  Crashed,
  Canceled,
  /// A raw status with no fixed label, passed through as stored.
  Other(String),
}

impl DisplayStatus {
  /// Derive the display status of an execution.
  ///
  /// An execution that has started but has no stop time is `Running`
  /// whatever its raw status says.
  pub fn of(record: &ExecutionRecord) -> Self {
    if record.stopped_at.is_none() && record.started_at.is_some() {
      return Self::Running;
    }
    Self::from_raw(&record.status)
  }

  fn from_raw(status: &str) -> Self {
    match status {
      "waiting" => Self::Waiting,
      "error" => Self::Error,
      "success" => Self::Success,
      "crashed" => Self::Crashed,
      "canceled" => Self::Canceled,
      other => Self::Other(other.to_string()),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      Self::Running => "Running",
      Self::Waiting => "Waiting",
      Self::Error => "Error",
      Self::Success => "Success",
      Self::Crashed => "Crashed",
      Self::Canceled => "Canceled",
      Self::Other(raw) => raw,
    }
  }
}

impl fmt::Display for DisplayStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl Serialize for DisplayStatus {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.label())
  }
}

/// Elapsed time of an execution in milliseconds.
///
/// Finished executions measure start to stop, running ones start to `now`,
/// and executions without a start time report zero. A negative span (stop
/// before start, or a start time ahead of the local clock) is logged and
/// reported as zero.
pub fn duration_ms(record: &ExecutionRecord, now: DateTime<Utc>) -> u64 {
  let Some(started_at) = record.started_at else {
    return 0;
  };
  let ended_at = record.stopped_at.unwrap_or(now);
  let elapsed = (ended_at - started_at).num_milliseconds();

  u64::try_from(elapsed).unwrap_or_else(|_| {
    warn!(
      execution_id = %record.id,
      elapsed_ms = elapsed,
      "negative execution duration, possible clock skew; reporting 0"
    );
    0
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn record(status: &str, started: Option<i64>, stopped: Option<i64>) -> ExecutionRecord {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    ExecutionRecord {
      id: "1".to_string(),
      finished: false,
      status: status.to_string(),
      started_at: started.map(|ms| base + Duration::milliseconds(ms)),
      stopped_at: stopped.map(|ms| base + Duration::milliseconds(ms)),
      workflow_id: "wf".to_string(),
      workflow_name: "Workflow".to_string(),
      workflow_nodes: None,
      retry_of: None,
      mode: "trigger".to_string(),
    }
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 1, 0).unwrap()
  }

  #[test]
  fn test_running_when_not_stopped() {
    for status in ["running", "error", "success", "waiting", "new"] {
      assert_eq!(
        DisplayStatus::of(&record(status, Some(0), None)),
        DisplayStatus::Running
      );
    }
  }

  #[test]
  fn test_fixed_labels() {
    let cases = [
      ("waiting", DisplayStatus::Waiting),
      ("error", DisplayStatus::Error),
      ("success", DisplayStatus::Success),
      ("crashed", DisplayStatus::Crashed),
      ("canceled", DisplayStatus::Canceled),
    ];
    for (raw, expected) in cases {
      assert_eq!(DisplayStatus::of(&record(raw, Some(0), Some(10))), expected);
    }
  }

  #[test]
  fn test_unknown_status_passes_through() {
    let status = DisplayStatus::of(&record("new", Some(0), Some(10)));
    assert_eq!(status, DisplayStatus::Other("new".to_string()));
    assert_eq!(status.to_string(), "new");

    // no start time, so never Running
    let status = DisplayStatus::of(&record("running", None, None));
    assert_eq!(status, DisplayStatus::Other("running".to_string()));
  }

  #[test]
  fn test_status_serializes_as_label() {
    assert_eq!(
      serde_json::to_string(&DisplayStatus::Success).unwrap(),
      "\"Success\""
    );
  }

  #[test]
  fn test_finished_duration() {
    assert_eq!(duration_ms(&record("success", Some(0), Some(2_500)), now()), 2_500);
    assert_eq!(duration_ms(&record("success", Some(100), Some(100)), now()), 0);
  }

  #[test]
  fn test_running_duration_uses_now() {
    assert_eq!(duration_ms(&record("running", Some(0), None), now()), 60_000);
  }

  #[test]
  fn test_duration_without_start_is_zero() {
    assert_eq!(duration_ms(&record("new", None, None), now()), 0);
    assert_eq!(duration_ms(&record("new", None, Some(10)), now()), 0);
  }

  #[test]
  fn test_negative_duration_reports_zero() {
    assert_eq!(duration_ms(&record("success", Some(500), Some(0)), now()), 0);
    assert_eq!(duration_ms(&record("running", Some(120_000), None), now()), 0);
  }
}
