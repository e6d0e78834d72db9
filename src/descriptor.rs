//! Type descriptors
//!
//! A [`TypeDesc`] states the exact target type of a binding request, nested
//! generic arguments included, as an explicit value object built at the call
//! site. Equality and hashing are structural so descriptors built at
//! different call sites for the same logical type collide in the registry
//! cache.

use std::fmt;

/// Raw-type identifiers for the built-in shapes.
pub mod raw {
    pub const STRING: &str = "string";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const F64: &str = "f64";
    pub const BOOL: &str = "bool";
    pub const SEQUENCE: &str = "seq";
    pub const MAPPING: &str = "map";
    pub const OPTION: &str = "option";
}

/// Immutable description of a target type: a raw-type identifier plus the
/// descriptors of its generic arguments, to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    raw: String,
    args: Vec<TypeDesc>,
}

impl TypeDesc {
    /// A user-declared struct or enum type, identified by name.
    pub fn named(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            args: Vec::new(),
        }
    }

    /// A type with generic arguments.
    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        Self {
            raw: raw.into(),
            args,
        }
    }

    pub fn string() -> Self {
        Self::named(raw::STRING)
    }

    pub fn int() -> Self {
        Self::named(raw::I32)
    }

    pub fn long() -> Self {
        Self::named(raw::I64)
    }

    pub fn float() -> Self {
        Self::named(raw::F64)
    }

    pub fn boolean() -> Self {
        Self::named(raw::BOOL)
    }

    pub fn sequence(element: TypeDesc) -> Self {
        Self::parameterized(raw::SEQUENCE, vec![element])
    }

    pub fn mapping(key: TypeDesc, value: TypeDesc) -> Self {
        Self::parameterized(raw::MAPPING, vec![key, value])
    }

    pub fn option(inner: TypeDesc) -> Self {
        Self::parameterized(raw::OPTION, vec![inner])
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn args(&self) -> &[TypeDesc] {
        &self.args
    }

    /// The nth generic argument, if declared.
    pub fn arg(&self, index: usize) -> Option<&TypeDesc> {
        self.args.get(index)
    }

    /// True for the plain string descriptor, the only shape the document
    /// model accepts as a mapping key.
    pub fn is_string(&self) -> bool {
        self.raw == raw::STRING && self.args.is_empty()
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(desc: &TypeDesc) -> u64 {
        let mut hasher = DefaultHasher::new();
        desc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn structural_equality_across_call_sites() {
        let a = TypeDesc::mapping(TypeDesc::string(), TypeDesc::sequence(TypeDesc::int()));
        let b = TypeDesc::mapping(TypeDesc::string(), TypeDesc::sequence(TypeDesc::int()));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn nested_arguments_distinguish() {
        let ints = TypeDesc::sequence(TypeDesc::int());
        let longs = TypeDesc::sequence(TypeDesc::long());
        assert_ne!(ints, longs);
    }

    #[test]
    fn display_renders_nesting() {
        let desc = TypeDesc::mapping(TypeDesc::string(), TypeDesc::sequence(TypeDesc::int()));
        assert_eq!(desc.to_string(), "map<string, seq<i32>>");
        assert_eq!(TypeDesc::named("Step").to_string(), "Step");
    }

    #[test]
    fn string_detection() {
        assert!(TypeDesc::string().is_string());
        assert!(!TypeDesc::int().is_string());
        assert!(!TypeDesc::sequence(TypeDesc::string()).is_string());
    }
}
