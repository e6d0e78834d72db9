//! Sequence adaptor
//!
//! Binds a sequence node elementwise. The element adaptor is resolved once
//! at construction and reused for every element; input order is preserved.

use std::sync::Arc;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::{raw, TypeDesc};
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::value::ErasedValue;

pub(crate) struct SequenceAdaptor {
    descriptor: TypeDesc,
    element: Arc<dyn Adaptor>,
}

impl Adaptor for SequenceAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let items = node
            .as_sequence()
            .ok_or_else(|| BindError::UnsupportedType {
                descriptor: self.descriptor.to_string(),
                reason: format!("expected sequence node, found {}", node.kind()),
            })?;
        let items: Result<Vec<ErasedValue>> =
            items.iter().map(|item| self.element.read(item)).collect();
        Ok(Box::new(items?))
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let items = value
            .downcast_ref::<Vec<ErasedValue>>()
            .ok_or_else(|| BindError::ShapeMismatch {
                descriptor: self.descriptor.to_string(),
            })?;
        let items: Result<Vec<Node>> =
            items.iter().map(|item| self.element.write(item)).collect();
        Ok(Node::Sequence(items?))
    }
}

pub(crate) struct SequenceFactory;

impl AdaptorFactory for SequenceFactory {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn handles(&self, descriptor: &TypeDesc, _registry: &AdaptorRegistry) -> bool {
        descriptor.raw() == raw::SEQUENCE && descriptor.args().len() == 1
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let element = registry.resolve(&descriptor.args()[0])?;
        Ok(Arc::new(SequenceAdaptor {
            descriptor: descriptor.clone(),
            element,
        }))
    }
}
