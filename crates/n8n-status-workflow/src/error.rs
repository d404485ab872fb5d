use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("invalid node list: {0}")]
  InvalidNodeList(#[from] serde_json::Error),
}
