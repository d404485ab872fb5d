use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// A single step of a workflow, as stored in the `nodes` JSON array.
///
/// Only the fields the report reads are modeled; everything else in the
/// stored object (parameters, position, credentials) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, rename = "type")]
  pub node_type: Option<String>,
}

/// The ordered node array of a workflow.
///
/// A node's position in this list is its identity for failure attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList(Vec<WorkflowNode>);

impl NodeList {
  /// Parse the JSON text of a workflow's `nodes` column.
  pub fn parse(json: &str) -> Result<Self, WorkflowError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Get the node at a position.
  pub fn get(&self, index: usize) -> Option<&WorkflowNode> {
    self.0.get(index)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<Vec<WorkflowNode>> for NodeList {
  fn from(nodes: Vec<WorkflowNode>) -> Self {
    Self(nodes)
  }
}

/// The raw node reference recorded in a failure payload.
///
/// Usually a string-encoded integer such as `"3"`, but older payloads may hold
/// plain numbers, so the JSON value is kept as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(serde_json::Value);

impl NodeRef {
  pub fn new(value: serde_json::Value) -> Self {
    Self(value)
  }

  /// The underlying JSON value.
  pub fn value(&self) -> &serde_json::Value {
    &self.0
  }

  /// Coerce the reference to an integer index.
  ///
  /// Accepts integers, finite floats (truncated toward zero), booleans and
  /// strings holding an integer (surrounding whitespace allowed). Returns
  /// `None` for anything else.
  pub fn as_index(&self) -> Option<i64> {
    match &self.0 {
      serde_json::Value::Number(n) => n.as_i64().or_else(|| {
        n.as_f64()
          .filter(|f| f.is_finite())
          .map(|f| f.trunc() as i64)
      }),
      serde_json::Value::String(s) => s.trim().parse().ok(),
      serde_json::Value::Bool(b) => Some(i64::from(*b)),
      _ => None,
    }
  }
}

impl From<&str> for NodeRef {
  fn from(value: &str) -> Self {
    Self(serde_json::Value::String(value.to_string()))
  }
}

impl From<serde_json::Value> for NodeRef {
  fn from(value: serde_json::Value) -> Self {
    Self(value)
  }
}

impl fmt::Display for NodeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      serde_json::Value::String(s) => f.write_str(s),
      other => write!(f, "{other}"),
    }
  }
}
