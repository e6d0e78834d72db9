//! Binding error types

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = BindError> = std::result::Result<T, E>;

/// All error variants are part of the public API.
///
/// Binding is all-or-nothing: every variant surfaces to the `from_node`
/// caller, nothing is retried or swallowed. Unknown document keys and missing
/// non-required fields are deliberately not errors.
#[derive(Error, Debug)]
pub enum BindError {
    /// No factory in the registry claims the requested descriptor.
    #[error("no adaptor available for `{descriptor}`")]
    MissingAdaptor { descriptor: String },

    /// The node's shape (or an enum scalar's text) does not fit the target.
    #[error("cannot bind to `{descriptor}`: {reason}")]
    UnsupportedType { descriptor: String, reason: String },

    /// A scalar's text failed to parse as the target primitive kind.
    #[error("malformed scalar `{text}` for {target}")]
    MalformedScalar { text: String, target: &'static str },

    /// Strict mode: a field declared required has no document key.
    #[error("required field `{field}` missing while binding `{structure}`")]
    RequiredFieldMissing { field: String, structure: String },

    /// A self-referential type graph was hit while its adaptor was still
    /// under construction and no forward reference could be served.
    #[error("recursive type `{descriptor}` cannot be resolved")]
    RecursiveTypeUnsupported { descriptor: String },

    /// An erased value contradicts the shape its descriptor promised.
    /// Signals a schema/registration defect, never document-shaped input.
    #[error("value does not match the registered shape for `{descriptor}`")]
    ShapeMismatch { descriptor: String },

    /// The YAML front end produced something the node model cannot hold.
    #[error("invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// Tokenizer-level YAML failure (bridge only).
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
