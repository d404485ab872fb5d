//! n8n-status Enrich
//!
//! Turns raw execution records into the view the status report renders.
//!
//! # Flow
//! 1. Display status and duration are derived from the raw status and the
//!    execution's time bounds.
//! 2. For failed executions only, the stored failure payload is parsed for an
//!    error message and a node reference.
//! 3. The node reference is resolved to a node name using the workflow's own
//!    node array (positional lookup).
//!
//! [`enrich`] is a pure function of its inputs. [`Enricher`] drives it over a
//! [`Store`](n8n_status_store::Store), degrading failed lookups to defaults so
//! that one bad record never blanks out the report.

mod enrich;
mod enricher;
mod payload;
mod status;

pub use enrich::{EnrichedExecution, FailureInfo, UNKNOWN_NODE, enrich};
pub use enricher::Enricher;
pub use payload::{ErrorInfo, ErrorPayload, PayloadError, UNKNOWN_ERROR, parse_error_payload};
pub use status::{DisplayStatus, duration_ms};
