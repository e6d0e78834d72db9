//! Option adaptor
//!
//! A null node binds to `None`; anything else delegates to the inner
//! adaptor. Writing `None` emits a null node.

use std::sync::Arc;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::{raw, TypeDesc};
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::value::ErasedValue;

pub(crate) struct OptionAdaptor {
    descriptor: TypeDesc,
    inner: Arc<dyn Adaptor>,
}

impl Adaptor for OptionAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let value: Option<ErasedValue> = if node.is_null() {
            None
        } else {
            Some(self.inner.read(node)?)
        };
        Ok(Box::new(value))
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let value = value
            .downcast_ref::<Option<ErasedValue>>()
            .ok_or_else(|| BindError::ShapeMismatch {
                descriptor: self.descriptor.to_string(),
            })?;
        match value {
            Some(inner) => self.inner.write(inner),
            None => Ok(Node::Null),
        }
    }
}

pub(crate) struct OptionFactory;

impl AdaptorFactory for OptionFactory {
    fn name(&self) -> &'static str {
        "option"
    }

    fn handles(&self, descriptor: &TypeDesc, _registry: &AdaptorRegistry) -> bool {
        descriptor.raw() == raw::OPTION && descriptor.args().len() == 1
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let inner = registry.resolve(&descriptor.args()[0])?;
        Ok(Arc::new(OptionAdaptor {
            descriptor: descriptor.clone(),
            inner,
        }))
    }
}
