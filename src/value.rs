//! The typed ⇄ erased boundary
//!
//! Adaptors trade in erased values so that one adaptor instance serves every
//! call site regardless of the host-side static type. [`BindValue`] is the
//! boundary a concrete Rust type crosses: it names its descriptor, registers
//! any schemas its shape depends on, and converts itself to and from the
//! erased form. Collections travel through the adaptor layer as erased
//! containers (`Vec<ErasedValue>`, `IndexMap<String, ErasedValue>`,
//! `Option<ErasedValue>`); `from_erased` reassembles the concrete value.
//!
//! Implementations exist for the primitive kinds, `Vec<T>`,
//! `IndexMap<String, V>`, `Option<T>` and `Box<T>`. User structs and enums
//! get theirs from `bind_struct!` / `bind_enum!`.

use std::any::Any;

use indexmap::IndexMap;

use crate::descriptor::TypeDesc;
use crate::error::{BindError, Result};
use crate::registry::AdaptorRegistry;

/// A value with its static type erased, as it travels through adaptors.
pub type ErasedValue = Box<dyn Any + Send + Sync>;

/// A Rust type that can cross the binding boundary.
pub trait BindValue: Sized + Send + Sync + 'static {
    /// The descriptor a call site states for this type.
    fn descriptor() -> TypeDesc;

    /// Make every schema this type's shape depends on available to the
    /// registry. Idempotent; nested types register recursively.
    fn register(registry: &AdaptorRegistry) {
        let _ = registry;
    }

    /// Reassemble the concrete value from its erased form.
    fn from_erased(value: ErasedValue) -> Result<Self>;

    /// Convert into the erased form adaptors understand.
    fn into_erased(self) -> ErasedValue;
}

fn mismatch<T: BindValue>() -> BindError {
    BindError::ShapeMismatch {
        descriptor: T::descriptor().to_string(),
    }
}

macro_rules! primitive_bind_value {
    ($($ty:ty => $ctor:ident),* $(,)?) => {
        $(
            impl BindValue for $ty {
                fn descriptor() -> TypeDesc {
                    TypeDesc::$ctor()
                }

                fn from_erased(value: ErasedValue) -> Result<Self> {
                    value
                        .downcast::<$ty>()
                        .map(|boxed| *boxed)
                        .map_err(|_| mismatch::<$ty>())
                }

                fn into_erased(self) -> ErasedValue {
                    Box::new(self)
                }
            }
        )*
    };
}

primitive_bind_value! {
    String => string,
    i32 => int,
    i64 => long,
    f64 => float,
    bool => boolean,
}

impl<T: BindValue> BindValue for Vec<T> {
    fn descriptor() -> TypeDesc {
        TypeDesc::sequence(T::descriptor())
    }

    fn register(registry: &AdaptorRegistry) {
        T::register(registry);
    }

    fn from_erased(value: ErasedValue) -> Result<Self> {
        let items = value
            .downcast::<Vec<ErasedValue>>()
            .map_err(|_| mismatch::<Self>())?;
        items.into_iter().map(T::from_erased).collect()
    }

    fn into_erased(self) -> ErasedValue {
        let items: Vec<ErasedValue> = self.into_iter().map(T::into_erased).collect();
        Box::new(items)
    }
}

impl<V: BindValue> BindValue for IndexMap<String, V> {
    fn descriptor() -> TypeDesc {
        TypeDesc::mapping(TypeDesc::string(), V::descriptor())
    }

    fn register(registry: &AdaptorRegistry) {
        V::register(registry);
    }

    fn from_erased(value: ErasedValue) -> Result<Self> {
        let entries = value
            .downcast::<IndexMap<String, ErasedValue>>()
            .map_err(|_| mismatch::<Self>())?;
        entries
            .into_iter()
            .map(|(key, value)| Ok((key, V::from_erased(value)?)))
            .collect()
    }

    fn into_erased(self) -> ErasedValue {
        let entries: IndexMap<String, ErasedValue> = self
            .into_iter()
            .map(|(key, value)| (key, value.into_erased()))
            .collect();
        Box::new(entries)
    }
}

impl<T: BindValue> BindValue for Option<T> {
    fn descriptor() -> TypeDesc {
        TypeDesc::option(T::descriptor())
    }

    fn register(registry: &AdaptorRegistry) {
        T::register(registry);
    }

    fn from_erased(value: ErasedValue) -> Result<Self> {
        let inner = value
            .downcast::<Option<ErasedValue>>()
            .map_err(|_| mismatch::<Self>())?;
        inner.map(T::from_erased).transpose()
    }

    fn into_erased(self) -> ErasedValue {
        let inner: Option<ErasedValue> = self.map(T::into_erased);
        Box::new(inner)
    }
}

/// Transparent: a boxed value binds exactly like the value itself. Lets
/// self-referential structs break their own size cycle with `Box`.
impl<T: BindValue> BindValue for Box<T> {
    fn descriptor() -> TypeDesc {
        T::descriptor()
    }

    fn register(registry: &AdaptorRegistry) {
        T::register(registry);
    }

    fn from_erased(value: ErasedValue) -> Result<Self> {
        T::from_erased(value).map(Box::new)
    }

    fn into_erased(self) -> ErasedValue {
        (*self).into_erased()
    }
}
