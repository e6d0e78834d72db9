//! Enum adaptor
//!
//! Matches a scalar's text against a registered enum's member names,
//! case-sensitive. Writing emits the member's declared name.

use std::sync::Arc;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::TypeDesc;
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::schema::EnumSchema;
use crate::value::ErasedValue;

pub(crate) struct EnumAdaptor {
    schema: Arc<EnumSchema>,
}

impl Adaptor for EnumAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let text = node.as_scalar().ok_or_else(|| BindError::UnsupportedType {
            descriptor: self.schema.raw().to_string(),
            reason: format!("expected scalar node, found {}", node.kind()),
        })?;
        self.schema
            .parse(text)
            .ok_or_else(|| BindError::UnsupportedType {
                descriptor: self.schema.raw().to_string(),
                reason: format!(
                    "no member named `{text}` (expected one of {})",
                    self.schema.names().join(", ")
                ),
            })
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let name = self
            .schema
            .render(&**value)
            .ok_or_else(|| BindError::ShapeMismatch {
                descriptor: self.schema.raw().to_string(),
            })?;
        Ok(Node::Scalar(name.to_string()))
    }
}

pub(crate) struct EnumFactory;

impl AdaptorFactory for EnumFactory {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn handles(&self, descriptor: &TypeDesc, registry: &AdaptorRegistry) -> bool {
        descriptor.args().is_empty() && registry.enum_schema(descriptor.raw()).is_some()
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let schema =
            registry
                .enum_schema(descriptor.raw())
                .ok_or_else(|| BindError::MissingAdaptor {
                    descriptor: descriptor.to_string(),
                })?;
        Ok(Arc::new(EnumAdaptor { schema }))
    }
}
