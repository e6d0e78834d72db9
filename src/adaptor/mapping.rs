//! Mapping adaptor
//!
//! Binds a mapping node entry by entry. The document model only has string
//! keys, so the key descriptor must be the plain string type; the value
//! adaptor is resolved once and applied per entry. Insertion order is
//! preserved.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::{raw, TypeDesc};
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::value::ErasedValue;

pub(crate) struct MappingAdaptor {
    descriptor: TypeDesc,
    value: Arc<dyn Adaptor>,
}

impl Adaptor for MappingAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let entries = node.as_mapping().ok_or_else(|| BindError::UnsupportedType {
            descriptor: self.descriptor.to_string(),
            reason: format!("expected mapping node, found {}", node.kind()),
        })?;
        let mut out: IndexMap<String, ErasedValue> = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            out.insert(key.clone(), self.value.read(value)?);
        }
        Ok(Box::new(out))
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let entries = value
            .downcast_ref::<IndexMap<String, ErasedValue>>()
            .ok_or_else(|| BindError::ShapeMismatch {
                descriptor: self.descriptor.to_string(),
            })?;
        let mut out: IndexMap<String, Node> = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            out.insert(key.clone(), self.value.write(value)?);
        }
        Ok(Node::Mapping(out))
    }
}

pub(crate) struct MappingFactory;

impl AdaptorFactory for MappingFactory {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn handles(&self, descriptor: &TypeDesc, _registry: &AdaptorRegistry) -> bool {
        descriptor.raw() == raw::MAPPING && descriptor.args().len() == 2
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let key = &descriptor.args()[0];
        if !key.is_string() {
            return Err(BindError::UnsupportedType {
                descriptor: descriptor.to_string(),
                reason: format!("mapping keys must be strings, not `{key}`"),
            });
        }
        let value = registry.resolve(&descriptor.args()[1])?;
        Ok(Arc::new(MappingAdaptor {
            descriptor: descriptor.clone(),
            value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::BindValue;
    use crate::yaml::from_yaml_str;

    fn string_to_int() -> Arc<dyn Adaptor> {
        let registry = AdaptorRegistry::new();
        MappingFactory
            .build(
                &TypeDesc::mapping(TypeDesc::string(), TypeDesc::int()),
                &registry,
            )
            .unwrap()
    }

    #[test]
    fn binds_entries_in_order() {
        let node = from_yaml_str("b: 2\na: 1\n").unwrap();
        let value = string_to_int().read(&node).unwrap();
        let map = IndexMap::<String, i32>::from_erased(value).unwrap();
        let entries: Vec<(&str, i32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("b", 2), ("a", 1)]);
    }

    #[test]
    fn wrong_shape_is_unsupported() {
        let result = string_to_int().read(&Node::Sequence(vec![]));
        assert!(matches!(result, Err(BindError::UnsupportedType { .. })));
    }

    #[test]
    fn non_string_keys_rejected_at_build() {
        let registry = AdaptorRegistry::new();
        let result = MappingFactory.build(
            &TypeDesc::mapping(TypeDesc::int(), TypeDesc::string()),
            &registry,
        );
        match result {
            Err(BindError::UnsupportedType { reason, .. }) => {
                assert!(reason.contains("keys"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn write_mirrors_read() {
        let adaptor = string_to_int();
        let node = from_yaml_str("x: 10\ny: 20\n").unwrap();
        let value = adaptor.read(&node).unwrap();
        assert_eq!(adaptor.write(&value).unwrap(), node);
    }
}
