//! Declarative registration macros
//!
//! `bind_struct!` and `bind_enum!` expand to the schema builder calls in
//! [`schema`](crate::schema) plus the matching
//! [`BindValue`](crate::BindValue) boilerplate, so a type declares its
//! bindable shape once, next to its definition.
//!
//! ```rust
//! use docbind::{bind_struct, bind_enum};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Phase { Pending, Running, Done }
//! bind_enum!(Phase { Pending, Running, Done });
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Step {
//!     name: String,
//!     retries: i32,
//! }
//! bind_struct!(Step {
//!     name: String [required],
//!     retries: i32 => "retry-count",
//! });
//! ```
//!
//! Field grammar: `name: Type`, optionally `=> "document-key"` to override
//! the key, optionally `[required]` for strict missing-key handling. Field
//! types must implement `BindValue` and `Clone`; the struct needs
//! `Default`, enums need `Copy` and `PartialEq`.

/// Implement [`BindValue`](crate::BindValue) for a struct and register its
/// field schema under the struct's name (or an explicit `as "raw"` name).
#[macro_export]
macro_rules! bind_struct {
    ($ty:ident { $($body:tt)* }) => {
        $crate::bind_struct!(@impl $ty, stringify!($ty), { $($body)* });
    };
    ($ty:ident as $raw:literal { $($body:tt)* }) => {
        $crate::bind_struct!(@impl $ty, $raw, { $($body)* });
    };
    (@impl $ty:ident, $raw:expr, {
        $( $field:ident : $fty:ty $( => $key:literal )? $( [ $( $modifier:ident ),* ] )? ),* $(,)?
    }) => {
        impl $crate::BindValue for $ty {
            fn descriptor() -> $crate::TypeDesc {
                $crate::TypeDesc::named($raw)
            }

            fn register(registry: &$crate::AdaptorRegistry) {
                registry.register_struct_with($raw, || {
                    $crate::schema::StructSchema::of::<$ty>($raw)
                    $(
                        .field_with(
                            stringify!($field),
                            $crate::bind_struct!(@key $( $key )?),
                            |source: &$ty| -> $fty {
                                ::std::clone::Clone::clone(&source.$field)
                            },
                            |target: &mut $ty, value: $fty| target.$field = value,
                        )
                        $( $( .$modifier() )* )?
                    )*
                });
            }

            fn from_erased(value: $crate::ErasedValue) -> $crate::Result<Self> {
                value.downcast::<$ty>().map(|boxed| *boxed).map_err(|_| {
                    $crate::BindError::ShapeMismatch {
                        descriptor: <$ty as $crate::BindValue>::descriptor().to_string(),
                    }
                })
            }

            fn into_erased(self) -> $crate::ErasedValue {
                ::std::boxed::Box::new(self)
            }
        }
    };
    (@key) => { ::std::option::Option::None };
    (@key $key:literal) => { ::std::option::Option::Some($key) };
}

/// Implement [`BindValue`](crate::BindValue) for a unit-variant enum and
/// register its members under the enum's name (or an explicit `as "raw"`
/// name). Matching is against the declared member names, case-sensitive;
/// `Member as "NAME"` overrides the document name of one member.
#[macro_export]
macro_rules! bind_enum {
    ($ty:ident { $( $member:ident $( as $name:literal )? ),* $(,)? }) => {
        $crate::bind_enum!(@impl $ty, stringify!($ty), { $( $member $( as $name )? ),* });
    };
    ($ty:ident as $raw:literal { $( $member:ident $( as $name:literal )? ),* $(,)? }) => {
        $crate::bind_enum!(@impl $ty, $raw, { $( $member $( as $name )? ),* });
    };
    (@impl $ty:ident, $raw:expr, { $( $member:ident $( as $name:literal )? ),* }) => {
        impl $crate::BindValue for $ty {
            fn descriptor() -> $crate::TypeDesc {
                $crate::TypeDesc::named($raw)
            }

            fn register(registry: &$crate::AdaptorRegistry) {
                registry.register_enum_with($raw, || {
                    $crate::schema::EnumSchema::of::<$ty>(
                        $raw,
                        &[ $(
                            ($crate::bind_enum!(@name $member $( $name )?), $ty::$member)
                        ),* ],
                    )
                });
            }

            fn from_erased(value: $crate::ErasedValue) -> $crate::Result<Self> {
                value.downcast::<$ty>().map(|boxed| *boxed).map_err(|_| {
                    $crate::BindError::ShapeMismatch {
                        descriptor: <$ty as $crate::BindValue>::descriptor().to_string(),
                    }
                })
            }

            fn into_erased(self) -> $crate::ErasedValue {
                ::std::boxed::Box::new(self)
            }
        }
    };
    (@name $member:ident) => { stringify!($member) };
    (@name $member:ident $name:literal) => { $name };
}

#[cfg(test)]
mod tests {
    use crate::binder::Binder;
    use crate::error::BindError;
    use crate::yaml::from_yaml_str;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Phase {
        Pending,
        Running,
        Done,
    }
    bind_enum!(Phase as "phase" { Pending, Running, Done });

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Step {
        name: String,
        retries: i32,
        phase: Option<Phase>,
    }
    bind_struct!(Step {
        name: String [required],
        retries: i32 => "retry-count",
        phase: Option<Phase>,
    });

    #[test]
    fn generated_struct_binding_works() {
        let binder = Binder::new();
        let node = from_yaml_str("name: build\nretry-count: 3\nphase: Running\n").unwrap();
        let step: Step = binder.from_node(&node).unwrap();
        assert_eq!(
            step,
            Step {
                name: "build".to_string(),
                retries: 3,
                phase: Some(Phase::Running),
            }
        );
    }

    #[test]
    fn key_override_applies() {
        let binder = Binder::new();
        // declared name `retries` is not a document key
        let node = from_yaml_str("name: x\nretries: 3\n").unwrap();
        let step: Step = binder.from_node(&node).unwrap();
        assert_eq!(step.retries, 0);
    }

    #[test]
    fn required_modifier_applies() {
        let binder = Binder::new();
        let node = from_yaml_str("retry-count: 3\n").unwrap();
        let result: Result<Step, _> = binder.from_node(&node);
        assert!(matches!(
            result,
            Err(BindError::RequiredFieldMissing { .. })
        ));
    }

    #[test]
    fn enum_uses_declared_raw_name() {
        use crate::value::BindValue;
        assert_eq!(Phase::descriptor().to_string(), "phase");
    }

    #[test]
    fn missing_optional_field_defaults_to_none() {
        let binder = Binder::new();
        let node = from_yaml_str("name: x\n").unwrap();
        let step: Step = binder.from_node(&node).unwrap();
        assert_eq!(step.phase, None);
    }
}
