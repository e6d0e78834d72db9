//! Adaptor registry
//!
//! Resolves a [`TypeDesc`] to exactly one [`Adaptor`], caching the result so
//! repeated resolution of the same descriptor returns the identical
//! instance. Factories are tried in fixed precedence order, most specific
//! first; the first claim wins and nothing else is consulted:
//!
//! primitive → enum → option → sequence → mapping → struct
//!
//! Before a cache miss is built, an under-construction placeholder is
//! published under the descriptor key. Resolution re-entering the same
//! descriptor on the same thread (a self-referential struct type) receives a
//! forward reference that starts delegating once construction completes;
//! another thread landing on the placeholder waits for the owner to publish.
//! Construction failures are not cached.
//!
//! The registry also owns the struct and enum schema tables that the
//! reflective and enum factories consult. All of it is safe for concurrent
//! first-use; published adaptors are immutable and read unsynchronized.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::adaptor::enums::EnumFactory;
use crate::adaptor::mapping::MappingFactory;
use crate::adaptor::option::OptionFactory;
use crate::adaptor::primitive::PrimitiveFactory;
use crate::adaptor::sequence::SequenceFactory;
use crate::adaptor::structs::StructFactory;
use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::TypeDesc;
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::schema::{EnumSchema, StructSchema};
use crate::value::ErasedValue;

/// Patched with the finished adaptor when construction completes.
struct ForwardSlot {
    cell: OnceCell<Arc<dyn Adaptor>>,
}

impl ForwardSlot {
    fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

/// Stand-in adaptor handed out while the real one is under construction on
/// this thread. Delegates once the slot is patched.
struct ForwardAdaptor {
    descriptor: TypeDesc,
    slot: Arc<ForwardSlot>,
}

impl ForwardAdaptor {
    fn target(&self) -> Result<&Arc<dyn Adaptor>> {
        self.slot
            .cell
            .get()
            .ok_or_else(|| BindError::RecursiveTypeUnsupported {
                descriptor: self.descriptor.to_string(),
            })
    }
}

impl Adaptor for ForwardAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        self.target()?.read(node)
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        self.target()?.write(value)
    }
}

enum CacheEntry {
    Building {
        owner: ThreadId,
        slot: Arc<ForwardSlot>,
    },
    Ready(Arc<dyn Adaptor>),
}

/// Shared, process-lifetime resolution state. Inject one into a
/// [`Binder`](crate::binder::Binder) rather than reaching for ambient state.
pub struct AdaptorRegistry {
    cache: DashMap<TypeDesc, CacheEntry>,
    structs: DashMap<String, Arc<StructSchema>>,
    enums: DashMap<String, Arc<EnumSchema>>,
    factories: Vec<Box<dyn AdaptorFactory>>,
}

impl Default for AdaptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptorRegistry {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            structs: DashMap::new(),
            enums: DashMap::new(),
            factories: vec![
                Box::new(PrimitiveFactory),
                Box::new(EnumFactory),
                Box::new(OptionFactory),
                Box::new(SequenceFactory),
                Box::new(MappingFactory),
                Box::new(StructFactory),
            ],
        }
    }

    /// Resolve a descriptor to its adaptor. Identity-stable: once published,
    /// every call for an equal descriptor returns the same instance.
    pub fn resolve(&self, descriptor: &TypeDesc) -> Result<Arc<dyn Adaptor>> {
        let slot = loop {
            if let Some(entry) = self.cache.get(descriptor) {
                match &*entry {
                    CacheEntry::Ready(adaptor) => {
                        trace!(%descriptor, "adaptor cache hit");
                        return Ok(Arc::clone(adaptor));
                    }
                    CacheEntry::Building { owner, slot } => {
                        if *owner == thread::current().id() {
                            trace!(%descriptor, "self-reference, issuing forward adaptor");
                            return Ok(Arc::new(ForwardAdaptor {
                                descriptor: descriptor.clone(),
                                slot: Arc::clone(slot),
                            }));
                        }
                        // another thread owns construction; let it publish
                        drop(entry);
                        thread::yield_now();
                        continue;
                    }
                }
            }
            match self.cache.entry(descriptor.clone()) {
                Entry::Occupied(_) => continue, // raced with another resolver
                Entry::Vacant(vacant) => {
                    let slot = Arc::new(ForwardSlot::new());
                    vacant.insert(CacheEntry::Building {
                        owner: thread::current().id(),
                        slot: Arc::clone(&slot),
                    });
                    break slot;
                }
            }
        };

        match self.build(descriptor) {
            Ok(adaptor) => {
                // patch forward references issued during construction,
                // then replace the placeholder
                let _ = slot.cell.set(Arc::clone(&adaptor));
                self.cache
                    .insert(descriptor.clone(), CacheEntry::Ready(Arc::clone(&adaptor)));
                Ok(adaptor)
            }
            Err(err) => {
                self.cache.remove(descriptor);
                Err(err)
            }
        }
    }

    fn build(&self, descriptor: &TypeDesc) -> Result<Arc<dyn Adaptor>> {
        for factory in &self.factories {
            if factory.handles(descriptor, self) {
                debug!(%descriptor, factory = factory.name(), "building adaptor");
                return factory.build(descriptor, self);
            }
        }
        Err(BindError::MissingAdaptor {
            descriptor: descriptor.to_string(),
        })
    }

    /// Register a struct schema under its raw name, then the schemas of its
    /// field types. Idempotent; self-referential shapes terminate because
    /// the name is claimed before recursing.
    pub fn register_struct_with<F>(&self, raw: &str, schema: F)
    where
        F: FnOnce() -> StructSchema,
    {
        if self.structs.contains_key(raw) {
            return;
        }
        let schema = Arc::new(schema());
        debug!(raw, fields = schema.fields().len(), "registering struct schema");
        self.structs.insert(raw.to_string(), Arc::clone(&schema));
        for field in schema.fields() {
            field.register_nested(self);
        }
    }

    /// Register an enum schema under its raw name. Idempotent.
    pub fn register_enum_with<F>(&self, raw: &str, schema: F)
    where
        F: FnOnce() -> EnumSchema,
    {
        if self.enums.contains_key(raw) {
            return;
        }
        let schema = schema();
        debug!(raw, members = schema.names().len(), "registering enum schema");
        self.enums.insert(raw.to_string(), Arc::new(schema));
    }

    pub fn struct_schema(&self, raw: &str) -> Option<Arc<StructSchema>> {
        self.structs.get(raw).map(|entry| Arc::clone(&entry))
    }

    pub fn enum_schema(&self, raw: &str) -> Option<Arc<EnumSchema>> {
        self.enums.get(raw).map(|entry| Arc::clone(&entry))
    }

    /// Number of published or in-flight cache entries.
    pub fn cached_adaptors(&self) -> usize {
        self.cache.len()
    }
}
