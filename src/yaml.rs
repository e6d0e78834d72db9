//! YAML front-end bridge
//!
//! The core never touches raw text; serde_yaml is the external tokenizer.
//! This module lowers its `Value` tree into [`Node`]: booleans and numbers
//! become scalar text (interpretation is the primitive adaptors' job), tags
//! are dropped to their inner value, and scalar-ish mapping keys are
//! stringified. Keys the document model cannot hold are rejected.

use serde_yaml::Value;

use crate::error::{BindError, Result};
use crate::node::Node;

/// Tokenize YAML text and lower it into a node tree.
pub fn from_yaml_str(text: &str) -> Result<Node> {
    let value: Value = serde_yaml::from_str(text)?;
    from_yaml_value(value)
}

/// Lower an already-tokenized YAML value into a node tree.
pub fn from_yaml_value(value: Value) -> Result<Node> {
    match value {
        Value::Null => Ok(Node::Null),
        Value::Bool(b) => Ok(Node::Scalar(b.to_string())),
        Value::Number(n) => Ok(Node::Scalar(n.to_string())),
        Value::String(s) => Ok(Node::Scalar(s)),
        Value::Sequence(items) => {
            let items: Result<Vec<Node>> = items.into_iter().map(from_yaml_value).collect();
            Ok(Node::Sequence(items?))
        }
        Value::Mapping(entries) => {
            let mut mapping = indexmap::IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                mapping.insert(key_text(key)?, from_yaml_value(value)?);
            }
            Ok(Node::Mapping(mapping))
        }
        Value::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}

fn key_text(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(BindError::InvalidDocument {
            reason: format!("mapping key must be scalar, found {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_stay_textual() {
        let node = from_yaml_str("3").unwrap();
        assert_eq!(node, Node::scalar("3"));

        let node = from_yaml_str("true").unwrap();
        assert_eq!(node, Node::scalar("true"));

        let node = from_yaml_str("build").unwrap();
        assert_eq!(node, Node::scalar("build"));
    }

    #[test]
    fn null_lowers_to_null() {
        assert_eq!(from_yaml_str("~").unwrap(), Node::Null);
    }

    #[test]
    fn sequences_keep_order() {
        let node = from_yaml_str("[a, b, c]").unwrap();
        let items = node.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_scalar(), Some("a"));
        assert_eq!(items[2].as_scalar(), Some("c"));
    }

    #[test]
    fn mappings_keep_insertion_order() {
        let node = from_yaml_str("z: 1\na: 2\nm: 3\n").unwrap();
        let entries = node.as_mapping().unwrap();
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn numeric_and_boolean_keys_stringify() {
        let node = from_yaml_str("1: one\ntrue: yes\n").unwrap();
        let entries = node.as_mapping().unwrap();
        assert!(entries.contains_key("1"));
        assert!(entries.contains_key("true"));
    }

    #[test]
    fn complex_keys_are_rejected() {
        let result = from_yaml_str("[a, b]: value");
        assert!(matches!(result, Err(BindError::InvalidDocument { .. })));
    }

    #[test]
    fn tags_drop_to_inner_value() {
        let node = from_yaml_str("!Ref inner").unwrap();
        assert_eq!(node, Node::scalar("inner"));
    }

    #[test]
    fn bad_yaml_surfaces_tokenizer_error() {
        let result = from_yaml_str("a: [unclosed");
        assert!(matches!(result, Err(BindError::Yaml(_))));
    }
}
