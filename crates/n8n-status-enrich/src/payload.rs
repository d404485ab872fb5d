//! Failure payload parsing.
//!
//! n8n has stored the `execution_data.data` blob in two shapes over time, with
//! no version marker:
//!
//! ```json
//! { "error": { "message": "Boom" }, "lastNodeExecuted": "2" }
//! ```
//!
//! ```json
//! [ { "lastNodeExecuted": "1" }, { "error": "oops" } ]
//! ```
//!
//! The shape is decided once, in [`ErrorPayload::parse`]; extraction then works
//! on the tagged variant.

use n8n_status_workflow::NodeRef;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Message reported when a payload carries no usable error message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

const ERROR_KEY: &str = "error";
const LAST_NODE_KEY: &str = "lastNodeExecuted";

#[derive(Debug, Error)]
pub enum PayloadError {
  #[error("payload is empty")]
  Empty,

  #[error("payload is not valid JSON: {0}")]
  Malformed(#[from] serde_json::Error),
}

/// Error details extracted from a failure payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
  pub message: String,
  pub node_ref: Option<NodeRef>,
}

impl Default for ErrorInfo {
  fn default() -> Self {
    Self {
      message: UNKNOWN_ERROR.to_string(),
      node_ref: None,
    }
  }
}

/// A failure payload, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
  /// A single object with top-level `error` and `lastNodeExecuted` entries.
  Single(Map<String, Value>),
  /// An ordered list of event objects.
  Events(Vec<Value>),
  /// Valid JSON of any other shape.
  Unrecognized,
}

impl ErrorPayload {
  /// Parse and classify a raw payload.
  pub fn parse(raw: &str) -> Result<Self, PayloadError> {
    if raw.trim().is_empty() {
      return Err(PayloadError::Empty);
    }
    Ok(Self::from_value(serde_json::from_str(raw)?))
  }

  /// Classify an already-parsed payload.
  pub fn from_value(value: Value) -> Self {
    match value {
      Value::Object(map) => Self::Single(map),
      Value::Array(events) => Self::Events(events),
      _ => Self::Unrecognized,
    }
  }

  /// Extract the error message and node reference.
  ///
  /// For event lists every event is scanned; a later event's `error` or
  /// `lastNodeExecuted` replaces what earlier events recorded, field by field.
  pub fn error_info(&self) -> ErrorInfo {
    let mut info = ErrorInfo::default();

    match self {
      Self::Single(map) => {
        if let Some(error) = map.get(ERROR_KEY) {
          info.message = error_message(error);
          info.node_ref = map.get(LAST_NODE_KEY).and_then(node_ref);
        }
      }
      Self::Events(events) => {
        for event in events.iter().filter_map(Value::as_object) {
          if let Some(error) = event.get(ERROR_KEY) {
            info.message = error_message(error);
          }
          if let Some(last_node) = event.get(LAST_NODE_KEY) {
            info.node_ref = node_ref(last_node);
          }
        }
      }
      Self::Unrecognized => {}
    }

    info
  }
}

/// Extract error details from a raw payload, falling back to the default
/// [`ErrorInfo`] when the payload is absent or cannot be parsed.
pub fn parse_error_payload(raw: Option<&str>) -> ErrorInfo {
  let Some(raw) = raw else {
    return ErrorInfo::default();
  };

  match ErrorPayload::parse(raw) {
    Ok(payload) => payload.error_info(),
    Err(e) => {
      debug!(error = %e, "unreadable failure payload");
      ErrorInfo::default()
    }
  }
}

fn error_message(error: &Value) -> String {
  match error {
    Value::Object(fields) => fields
      .get("message")
      .map(display_value)
      .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
    other => display_value(other),
  }
}

/// Strings print bare; any other value prints as JSON (`null`, `true`, `500`).
fn display_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn node_ref(value: &Value) -> Option<NodeRef> {
  (!value.is_null()).then(|| NodeRef::new(value.clone()))
}
