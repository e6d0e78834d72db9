//! docbind - type-directed data binding for YAML document trees

pub mod adaptor;
pub mod binder;
pub mod descriptor;
pub mod error;
pub mod macros;
pub mod node;
pub mod registry;
pub mod schema;
pub mod value;
pub mod yaml;

pub use adaptor::Adaptor;
pub use binder::{from_node, to_node, Binder};
pub use descriptor::TypeDesc;
pub use error::{BindError, Result};
pub use node::Node;
pub use registry::AdaptorRegistry;
pub use schema::{EnumSchema, FieldSchema, StructSchema};
pub use value::{BindValue, ErasedValue};
pub use yaml::{from_yaml_str, from_yaml_value};
