//! Binder facade
//!
//! The public entry point tying descriptors, registry and adaptors
//! together. A [`Binder`] wraps an injected [`AdaptorRegistry`]; a shared
//! default binder backs the free [`from_node`] / [`to_node`] functions for
//! callers that don't manage registry lifetime themselves.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::descriptor::TypeDesc;
use crate::error::Result;
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::value::{BindValue, ErasedValue};

pub struct Binder {
    registry: Arc<AdaptorRegistry>,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    /// A binder with its own private registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(AdaptorRegistry::new()),
        }
    }

    /// A binder over an existing registry (shared cache and schemas).
    pub fn with_registry(registry: Arc<AdaptorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AdaptorRegistry> {
        &self.registry
    }

    /// Bind a node to `T`. Registers `T`'s schemas (idempotent), resolves
    /// its adaptor and reads the tree; all-or-nothing.
    pub fn from_node<T: BindValue>(&self, node: &Node) -> Result<T> {
        T::register(&self.registry);
        let erased = self.from_node_dyn(node, &T::descriptor())?;
        T::from_erased(erased)
    }

    /// Descriptor-driven read for callers that hold only a [`TypeDesc`].
    /// Schemas for any named types in the descriptor must already be
    /// registered.
    pub fn from_node_dyn(&self, node: &Node, descriptor: &TypeDesc) -> Result<ErasedValue> {
        let adaptor = self.registry.resolve(descriptor)?;
        adaptor.read(node)
    }

    /// Write direction of the facade contract. Not implemented: always
    /// yields `None`, and call sites must not rely on it until it is.
    /// The per-adaptor write capability already exists; only this
    /// entry point is pending.
    // TODO: resolve T's adaptor and route through Adaptor::write.
    pub fn to_node<T: BindValue>(&self, _value: &T) -> Option<Node> {
        None
    }
}

static DEFAULT_BINDER: Lazy<Binder> = Lazy::new(Binder::new);

/// Bind a node to `T` via the shared default binder.
pub fn from_node<T: BindValue>(node: &Node) -> Result<T> {
    DEFAULT_BINDER.from_node(node)
}

/// Write-direction stub on the shared default binder; always `None`.
pub fn to_node<T: BindValue>(value: &T) -> Option<Node> {
    DEFAULT_BINDER.to_node(value)
}
