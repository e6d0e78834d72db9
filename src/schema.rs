//! Struct and enum schemas
//!
//! Explicit, declare-once descriptions that stand in for runtime field
//! introspection: a [`StructSchema`] lists a struct's bindable fields with
//! erased accessors, an [`EnumSchema`] lists an enum's members. Schemas are
//! registered with the [`AdaptorRegistry`](crate::registry::AdaptorRegistry)
//! and drive the reflective and enum adaptors.
//!
//! Most code never builds these by hand; `bind_struct!` and `bind_enum!`
//! expand to the builder calls below.

use std::any::Any;

use crate::descriptor::TypeDesc;
use crate::error::{BindError, Result};
use crate::registry::AdaptorRegistry;
use crate::value::{BindValue, ErasedValue};

type SetFn = Box<dyn Fn(&mut dyn Any, ErasedValue) -> Result<()> + Send + Sync>;
type GetFn = Box<dyn Fn(&dyn Any) -> Result<ErasedValue> + Send + Sync>;

/// One bindable field of a struct.
pub struct FieldSchema {
    name: &'static str,
    key: Option<&'static str>,
    required: bool,
    descriptor: TypeDesc,
    register: fn(&AdaptorRegistry),
    set: SetFn,
    get: GetFn,
}

impl FieldSchema {
    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Document key: the explicit override when present, the declared name
    /// otherwise.
    pub fn key(&self) -> &'static str {
        self.key.unwrap_or(self.name)
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn descriptor(&self) -> &TypeDesc {
        &self.descriptor
    }

    /// Register the schemas of this field's own type.
    pub fn register_nested(&self, registry: &AdaptorRegistry) {
        (self.register)(registry);
    }

    /// Store an erased field value into an instance under construction.
    pub fn assign(&self, target: &mut dyn Any, value: ErasedValue) -> Result<()> {
        (self.set)(target, value)
    }

    /// Pull the field's current value out of an instance, erased.
    pub fn extract(&self, source: &dyn Any) -> Result<ErasedValue> {
        (self.get)(source)
    }
}

/// Description of a struct type: how to make a default instance and which
/// fields to correlate with document keys.
pub struct StructSchema {
    raw: String,
    make: Box<dyn Fn() -> ErasedValue + Send + Sync>,
    fields: Vec<FieldSchema>,
}

impl StructSchema {
    /// Start a schema for `S`. Missing non-required keys leave fields at
    /// whatever `S::default()` put there.
    pub fn of<S>(raw: impl Into<String>) -> Self
    where
        S: Default + Send + Sync + 'static,
    {
        Self {
            raw: raw.into(),
            make: Box::new(|| Box::new(S::default()) as ErasedValue),
            fields: Vec::new(),
        }
    }

    /// Declare a field whose document key is its declared name.
    pub fn field<S, V>(self, name: &'static str, get: fn(&S) -> V, set: fn(&mut S, V)) -> Self
    where
        S: Send + Sync + 'static,
        V: BindValue,
    {
        self.field_with(name, None, get, set)
    }

    /// Declare a field with an explicit document-key override.
    pub fn keyed_field<S, V>(
        self,
        name: &'static str,
        key: &'static str,
        get: fn(&S) -> V,
        set: fn(&mut S, V),
    ) -> Self
    where
        S: Send + Sync + 'static,
        V: BindValue,
    {
        self.field_with(name, Some(key), get, set)
    }

    /// Declare a field, key override optional. The field's descriptor and
    /// registration hook come from `V` itself.
    pub fn field_with<S, V>(
        mut self,
        name: &'static str,
        key: Option<&'static str>,
        get: fn(&S) -> V,
        set: fn(&mut S, V),
    ) -> Self
    where
        S: Send + Sync + 'static,
        V: BindValue,
    {
        let raw = self.raw.clone();
        let set_erased: SetFn = Box::new(move |target, value| {
            let target = target
                .downcast_mut::<S>()
                .ok_or_else(|| BindError::ShapeMismatch {
                    descriptor: raw.clone(),
                })?;
            set(target, V::from_erased(value)?);
            Ok(())
        });
        let raw = self.raw.clone();
        let get_erased: GetFn = Box::new(move |source| {
            let source = source
                .downcast_ref::<S>()
                .ok_or_else(|| BindError::ShapeMismatch {
                    descriptor: raw.clone(),
                })?;
            Ok(get(source).into_erased())
        });
        self.fields.push(FieldSchema {
            name,
            key,
            required: false,
            descriptor: V::descriptor(),
            register: V::register,
            set: set_erased,
            get: get_erased,
        });
        self
    }

    /// Mark the most recently declared field as required (strict mode for
    /// that field only).
    pub fn required(mut self) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.required = true;
        }
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// A fresh default instance, erased.
    pub fn new_instance(&self) -> ErasedValue {
        (self.make)()
    }
}

/// Description of an enum type: member names in declaration order plus
/// erased parse/render hooks.
pub struct EnumSchema {
    raw: String,
    names: Vec<&'static str>,
    parse: Box<dyn Fn(&str) -> Option<ErasedValue> + Send + Sync>,
    render: Box<dyn Fn(&dyn Any) -> Option<&'static str> + Send + Sync>,
}

impl EnumSchema {
    pub fn of<T>(raw: impl Into<String>, members: &'static [(&'static str, T)]) -> Self
    where
        T: Copy + PartialEq + Send + Sync + 'static,
    {
        Self {
            raw: raw.into(),
            names: members.iter().map(|(name, _)| *name).collect(),
            parse: Box::new(move |text| {
                members
                    .iter()
                    .find(|(name, _)| *name == text)
                    .map(|(_, member)| Box::new(*member) as ErasedValue)
            }),
            render: Box::new(move |value| {
                let value = value.downcast_ref::<T>()?;
                members
                    .iter()
                    .find(|(_, member)| member == value)
                    .map(|(name, _)| *name)
            }),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Member value for a scalar's text, case-sensitive. None when no member
    /// matches.
    pub fn parse(&self, text: &str) -> Option<ErasedValue> {
        (self.parse)(text)
    }

    /// Declared name of an erased member value.
    pub fn render(&self, value: &dyn Any) -> Option<&'static str> {
        (self.render)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        label: String,
        count: i32,
    }

    fn probe_schema() -> StructSchema {
        StructSchema::of::<Probe>("Probe")
            .field("label", |p: &Probe| p.label.clone(), |p, v| p.label = v)
            .keyed_field(
                "count",
                "retry-count",
                |p: &Probe| p.count,
                |p, v| p.count = v,
            )
            .required()
    }

    #[test]
    fn keys_default_to_names_with_overrides() {
        let schema = probe_schema();
        assert_eq!(schema.fields()[0].key(), "label");
        assert_eq!(schema.fields()[1].key(), "retry-count");
        assert_eq!(schema.fields()[1].name(), "count");
    }

    #[test]
    fn required_marks_the_last_field() {
        let schema = probe_schema();
        assert!(!schema.fields()[0].required());
        assert!(schema.fields()[1].required());
    }

    #[test]
    fn assign_and_extract_round_trip() {
        let schema = probe_schema();
        let mut instance = schema.new_instance();

        schema.fields()[0]
            .assign(instance.as_mut(), "build".to_string().into_erased())
            .unwrap();
        schema.fields()[1]
            .assign(instance.as_mut(), 3_i32.into_erased())
            .unwrap();

        let probe = instance.downcast_ref::<Probe>().unwrap();
        assert_eq!(
            probe,
            &Probe {
                label: "build".to_string(),
                count: 3
            }
        );

        let out = schema.fields()[1].extract(&*instance).unwrap();
        assert_eq!(i32::from_erased(out).unwrap(), 3);
    }

    #[test]
    fn assign_rejects_foreign_instances() {
        let schema = probe_schema();
        let mut not_a_probe: ErasedValue = Box::new(17_u8);
        let result = schema.fields()[0].assign(not_a_probe.as_mut(), "x".to_string().into_erased());
        assert!(matches!(result, Err(BindError::ShapeMismatch { .. })));
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Phase {
        Pending,
        Running,
    }

    #[test]
    fn enum_schema_parses_and_renders() {
        let schema = EnumSchema::of::<Phase>(
            "Phase",
            &[("Pending", Phase::Pending), ("Running", Phase::Running)],
        );
        assert_eq!(schema.names(), &["Pending", "Running"]);

        let erased = schema.parse("Running").unwrap();
        assert_eq!(erased.downcast_ref::<Phase>(), Some(&Phase::Running));
        assert!(schema.parse("running").is_none());

        assert_eq!(schema.render(&Phase::Pending), Some("Pending"));
    }
}
