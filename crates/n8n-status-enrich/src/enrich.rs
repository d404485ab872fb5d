use chrono::{DateTime, Utc};
use n8n_status_store::ExecutionRecord;
use n8n_status_workflow::{NodeRef, resolve_node_name};
use serde::Serialize;

use crate::payload::{ErrorInfo, parse_error_payload};
use crate::status::{DisplayStatus, duration_ms};

/// Node label used when a failure payload names no node at all.
pub const UNKNOWN_NODE: &str = "Unknown node";

/// Failure attribution for an execution whose display status is `Error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureInfo {
  pub message: String,
  /// Resolved node name, `Node {ref}` when the reference cannot be resolved,
  /// or [`UNKNOWN_NODE`].
  pub node_label: String,
  pub node_ref: Option<NodeRef>,
}

/// An execution with the derived fields the report renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedExecution {
  #[serde(flatten)]
  pub record: ExecutionRecord,
  pub display_status: DisplayStatus,
  pub duration_ms: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<FailureInfo>,
}

/// Enrich one execution.
///
/// `payload` is the execution's raw failure payload; it is only read when the
/// execution's display status is `Error`. The node reference is resolved
/// against the record's own workflow node list.
pub fn enrich(record: ExecutionRecord, payload: Option<&str>, now: DateTime<Utc>) -> EnrichedExecution {
  let display_status = DisplayStatus::of(&record);
  let duration_ms = duration_ms(&record, now);

  let failure =
    (display_status == DisplayStatus::Error).then(|| failure_info(&record, payload));

  EnrichedExecution {
    record,
    display_status,
    duration_ms,
    failure,
  }
}

fn failure_info(record: &ExecutionRecord, payload: Option<&str>) -> FailureInfo {
  let ErrorInfo { message, node_ref } = parse_error_payload(payload);

  let node_label = resolve_node_name(record.workflow_nodes.as_deref(), node_ref.as_ref())
    .or_else(|| {
      node_ref
        .as_ref()
        .map(NodeRef::to_string)
        .filter(|r| !r.is_empty())
        .map(|r| format!("Node {r}"))
    })
    .unwrap_or_else(|| UNKNOWN_NODE.to_string());

  FailureInfo {
    message,
    node_label,
    node_ref,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::payload::UNKNOWN_ERROR;
  use chrono::{Duration, TimeZone};

  const NODES: &str = r#"[
    {"id":"a","name":"Webhook","type":"n8n-nodes-base.webhook"},
    {"id":"b","name":"Field Mapping","type":"n8n-nodes-base.set"},
    {"id":"c","name":"Send Email","type":"n8n-nodes-base.emailSend"}
  ]"#;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
  }

  fn failed_record() -> ExecutionRecord {
    ExecutionRecord {
      id: "17".to_string(),
      finished: false,
      status: "error".to_string(),
      started_at: Some(now() - Duration::seconds(10)),
      stopped_at: Some(now() - Duration::seconds(7)),
      workflow_id: "wf-1".to_string(),
      workflow_name: "Lead intake".to_string(),
      workflow_nodes: Some(NODES.to_string()),
      retry_of: None,
      mode: "webhook".to_string(),
    }
  }

  #[test]
  fn test_failure_resolves_node_name() {
    let payload = r#"{"error":{"message":"Invalid email"},"lastNodeExecuted":"0"}"#;
    let enriched = enrich(failed_record(), Some(payload), now());

    assert_eq!(enriched.display_status, DisplayStatus::Error);
    assert_eq!(enriched.duration_ms, 3_000);

    let failure = enriched.failure.unwrap();
    assert_eq!(failure.message, "Invalid email");
    assert_eq!(failure.node_label, "Webhook");
    assert_eq!(failure.node_ref, Some(NodeRef::from("0")));
  }

  #[test]
  fn test_unresolvable_reference_falls_back_to_ref() {
    let payload = r#"{"error":"boom","lastNodeExecuted":"9"}"#;
    let failure = enrich(failed_record(), Some(payload), now()).failure.unwrap();
    assert_eq!(failure.node_label, "Node 9");

    let payload = r#"{"error":"boom","lastNodeExecuted":"Send Email"}"#;
    let failure = enrich(failed_record(), Some(payload), now()).failure.unwrap();
    assert_eq!(failure.node_label, "Node Send Email");
  }

  #[test]
  fn test_missing_node_list_falls_back_to_ref() {
    let mut record = failed_record();
    record.workflow_nodes = None;

    let payload = r#"{"error":"boom","lastNodeExecuted":"1"}"#;
    let failure = enrich(record, Some(payload), now()).failure.unwrap();
    assert_eq!(failure.node_label, "Node 1");
  }

  #[test]
  fn test_no_reference_is_unknown_node() {
    let failure = enrich(failed_record(), Some(r#"{"error":"boom"}"#), now())
      .failure
      .unwrap();
    assert_eq!(failure.message, "boom");
    assert_eq!(failure.node_label, UNKNOWN_NODE);
    assert_eq!(failure.node_ref, None);
  }

  #[test]
  fn test_missing_or_malformed_payload_degrades() {
    for payload in [None, Some("{broken"), Some("")] {
      let failure = enrich(failed_record(), payload, now()).failure.unwrap();
      assert_eq!(failure.message, UNKNOWN_ERROR);
      assert_eq!(failure.node_label, UNKNOWN_NODE);
    }
  }

  #[test]
  fn test_non_error_records_have_no_failure() {
    let mut record = failed_record();
    record.status = "success".to_string();

    let payload = r#"{"error":"ignored","lastNodeExecuted":"0"}"#;
    let enriched = enrich(record, Some(payload), now());
    assert_eq!(enriched.display_status, DisplayStatus::Success);
    assert!(enriched.failure.is_none());
  }

  #[test]
  fn test_running_error_status_has_no_failure() {
    let mut record = failed_record();
    record.stopped_at = None;

    let enriched = enrich(record, Some(r#"{"error":"x"}"#), now());
    assert_eq!(enriched.display_status, DisplayStatus::Running);
    assert_eq!(enriched.duration_ms, 10_000);
    assert!(enriched.failure.is_none());
  }

  #[test]
  fn test_enrich_is_idempotent() {
    let payload = r#"[{"lastNodeExecuted":"2"},{"error":{"message":"SMTP down"}}]"#;

    let first = enrich(failed_record(), Some(payload), now());
    let second = enrich(failed_record(), Some(payload), now());
    assert_eq!(first, second);
    assert_eq!(first.failure.unwrap().node_label, "Send Email");
  }

  #[test]
  fn test_serializes_flat() {
    let enriched = enrich(failed_record(), Some(r#"{"error":"boom"}"#), now());
    let json = serde_json::to_value(&enriched).unwrap();

    assert_eq!(json["id"], "17");
    assert_eq!(json["workflow_name"], "Lead intake");
    assert_eq!(json["display_status"], "Error");
    assert_eq!(json["duration_ms"], 3_000);
    assert_eq!(json["failure"]["node_label"], UNKNOWN_NODE);
    assert!(json.get("workflow_nodes").is_none());
  }
}
