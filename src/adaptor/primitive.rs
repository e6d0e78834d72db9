//! Primitive adaptors
//!
//! One adaptor per primitive kind, generic over the target. Reading parses
//! the scalar's text with the kind's canonical format; writing renders the
//! same canonical text, so read/write round-trip exactly.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::{raw, TypeDesc};
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::value::ErasedValue;

pub(crate) struct PrimitiveAdaptor<T> {
    target: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> PrimitiveAdaptor<T> {
    fn new(target: &'static str) -> Self {
        Self {
            target,
            marker: PhantomData,
        }
    }
}

impl<T> Adaptor for PrimitiveAdaptor<T>
where
    T: FromStr + Display + Send + Sync + 'static,
{
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let text = node.as_scalar().ok_or_else(|| BindError::MalformedScalar {
            text: format!("<{} node>", node.kind()),
            target: self.target,
        })?;
        let value: T = text.parse().map_err(|_| BindError::MalformedScalar {
            text: text.to_string(),
            target: self.target,
        })?;
        Ok(Box::new(value))
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| BindError::ShapeMismatch {
                descriptor: self.target.to_string(),
            })?;
        Ok(Node::Scalar(value.to_string()))
    }
}

pub(crate) struct PrimitiveFactory;

impl AdaptorFactory for PrimitiveFactory {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn handles(&self, descriptor: &TypeDesc, _registry: &AdaptorRegistry) -> bool {
        descriptor.args().is_empty()
            && matches!(
                descriptor.raw(),
                raw::STRING | raw::I32 | raw::I64 | raw::F64 | raw::BOOL
            )
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        _registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let adaptor: Arc<dyn Adaptor> = match descriptor.raw() {
            raw::STRING => Arc::new(PrimitiveAdaptor::<String>::new(raw::STRING)),
            raw::I32 => Arc::new(PrimitiveAdaptor::<i32>::new(raw::I32)),
            raw::I64 => Arc::new(PrimitiveAdaptor::<i64>::new(raw::I64)),
            raw::F64 => Arc::new(PrimitiveAdaptor::<f64>::new(raw::F64)),
            raw::BOOL => Arc::new(PrimitiveAdaptor::<bool>::new(raw::BOOL)),
            other => {
                return Err(BindError::MissingAdaptor {
                    descriptor: other.to_string(),
                })
            }
        };
        Ok(adaptor)
    }
}
