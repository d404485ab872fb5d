//! n8n-status Workflow
//!
//! This crate models the parts of an n8n workflow definition that the status
//! report needs: the ordered node array stored in `workflow_entity.nodes`, and
//! the raw node references recorded in failure payloads.
//!
//! Node references found in failure payloads are positional indexes into the
//! node array, not the nodes' declared ids. [`resolve_node_name`] keeps that
//! contract: reordering a workflow's nodes changes which name a stored
//! reference resolves to.

mod error;
mod node;
mod resolve;

pub use error::WorkflowError;
pub use node::{NodeList, NodeRef, WorkflowNode};
pub use resolve::resolve_node_name;
