use crate::node::{NodeList, NodeRef};

/// Resolve a failure payload's node reference to the node's declared name.
///
/// The reference is treated as a position in the workflow's node array. Any
/// missing input, malformed node list, non-numeric reference, out-of-range
/// index or unnamed node resolves to `None`; a miss is never an error.
pub fn resolve_node_name(nodes_json: Option<&str>, node_ref: Option<&NodeRef>) -> Option<String> {
  let (nodes_json, node_ref) = (nodes_json?, node_ref?);

  let nodes = NodeList::parse(nodes_json).ok()?;
  let index = usize::try_from(node_ref.as_index()?).ok()?;

  nodes.get(index)?.name.clone()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  const TWO_NODES: &str = r#"[{"name":"A"},{"name":"B"}]"#;

  #[test]
  fn test_resolves_by_position() {
    let name = resolve_node_name(Some(TWO_NODES), Some(&NodeRef::from("1")));
    assert_eq!(name.as_deref(), Some("B"));

    let name = resolve_node_name(Some(TWO_NODES), Some(&NodeRef::new(json!(0))));
    assert_eq!(name.as_deref(), Some("A"));
  }

  #[test]
  fn test_out_of_range_is_no_match() {
    assert_eq!(resolve_node_name(Some(TWO_NODES), Some(&NodeRef::from("5"))), None);
    assert_eq!(resolve_node_name(Some(TWO_NODES), Some(&NodeRef::from("2"))), None);
    assert_eq!(resolve_node_name(Some(TWO_NODES), Some(&NodeRef::from("-1"))), None);
  }

  #[test]
  fn test_non_numeric_is_no_match() {
    assert_eq!(resolve_node_name(Some(TWO_NODES), Some(&NodeRef::from("x"))), None);
    assert_eq!(
      resolve_node_name(Some(TWO_NODES), Some(&NodeRef::new(json!(null)))),
      None
    );
  }

  #[test]
  fn test_absent_inputs_are_no_match() {
    assert_eq!(resolve_node_name(Some(TWO_NODES), None), None);
    assert_eq!(resolve_node_name(None, Some(&NodeRef::from("1"))), None);
    assert_eq!(resolve_node_name(None, None), None);
  }

  #[test]
  fn test_malformed_node_list_is_no_match() {
    assert_eq!(resolve_node_name(Some("{oops"), Some(&NodeRef::from("0"))), None);
    assert_eq!(resolve_node_name(Some(""), Some(&NodeRef::from("0"))), None);
  }

  #[test]
  fn test_unnamed_node_is_no_match() {
    let nodes = r#"[{"type":"n8n-nodes-base.noOp"}]"#;
    assert_eq!(resolve_node_name(Some(nodes), Some(&NodeRef::from("0"))), None);
  }

  #[test]
  fn test_declared_id_is_not_used_for_lookup() {
    let nodes = r#"[{"id":"1","name":"First"},{"id":"0","name":"Second"}]"#;
    let name = resolve_node_name(Some(nodes), Some(&NodeRef::from("1")));
    assert_eq!(name.as_deref(), Some("Second"));
  }
}
