//! Reflective struct adaptor
//!
//! Binds a mapping node to a registered struct schema by correlating
//! document keys with declared fields. Only declared fields are considered;
//! unknown document keys are ignored, and a missing key leaves the field at
//! its default value unless the field is marked required. Field values
//! resolve through the registry, so nested structs, collections and enums
//! compose naturally.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::adaptor::{Adaptor, AdaptorFactory};
use crate::descriptor::TypeDesc;
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::registry::AdaptorRegistry;
use crate::schema::StructSchema;
use crate::value::ErasedValue;

pub(crate) struct StructAdaptor {
    schema: Arc<StructSchema>,
    /// Field adaptors, aligned with `schema.fields()`.
    fields: Vec<Arc<dyn Adaptor>>,
}

impl Adaptor for StructAdaptor {
    fn read(&self, node: &Node) -> Result<ErasedValue> {
        let entries = node.as_mapping().ok_or_else(|| BindError::UnsupportedType {
            descriptor: self.schema.raw().to_string(),
            reason: format!("expected mapping node, found {}", node.kind()),
        })?;

        let mut instance = self.schema.new_instance();
        for (field, adaptor) in self.schema.fields().iter().zip(&self.fields) {
            match entries.get(field.key()) {
                Some(value) => {
                    let value = adaptor.read(value)?;
                    field.assign(instance.as_mut(), value)?;
                }
                None if field.required() => {
                    return Err(BindError::RequiredFieldMissing {
                        field: field.key().to_string(),
                        structure: self.schema.raw().to_string(),
                    });
                }
                None => {} // stays at the default
            }
        }
        Ok(instance)
    }

    fn write(&self, value: &ErasedValue) -> Result<Node> {
        let mut entries: IndexMap<String, Node> =
            IndexMap::with_capacity(self.schema.fields().len());
        for (field, adaptor) in self.schema.fields().iter().zip(&self.fields) {
            let field_value = field.extract(&**value)?;
            entries.insert(field.key().to_string(), adaptor.write(&field_value)?);
        }
        Ok(Node::Mapping(entries))
    }
}

pub(crate) struct StructFactory;

impl AdaptorFactory for StructFactory {
    fn name(&self) -> &'static str {
        "struct"
    }

    fn handles(&self, descriptor: &TypeDesc, registry: &AdaptorRegistry) -> bool {
        descriptor.args().is_empty() && registry.struct_schema(descriptor.raw()).is_some()
    }

    fn build(
        &self,
        descriptor: &TypeDesc,
        registry: &AdaptorRegistry,
    ) -> Result<Arc<dyn Adaptor>> {
        let schema =
            registry
                .struct_schema(descriptor.raw())
                .ok_or_else(|| BindError::MissingAdaptor {
                    descriptor: descriptor.to_string(),
                })?;
        let fields: Result<Vec<Arc<dyn Adaptor>>> = schema
            .fields()
            .iter()
            .map(|field| registry.resolve(field.descriptor()))
            .collect();
        Ok(Arc::new(StructAdaptor {
            schema,
            fields: fields?,
        }))
    }
}
