use thiserror::Error;

/// Errors returned by the apply engine.
///
/// These indicate a programming or schema mistake (e.g. asking to create an abstract kind) and are
/// not meant to be recovered from. A failure in the middle of an apply leaves the live object
/// partially updated.
#[derive(Debug, Error)]
pub enum Error {
    /// The kind is abstract or has no default constructor.
    #[error("cannot create an instance of `{kind}`: the kind is abstract or has no default constructor")]
    NotConstructible { kind: &'static str },
    /// The kind cannot be materialized as (or applied onto) the requested live type.
    #[error("`{kind}` cannot be materialized as `{target}`")]
    UnsupportedMaterialization { kind: &'static str, target: &'static str },
    /// An enumerated value could not be converted through its underlying representation.
    #[error("cannot convert `{from}` value {value} to `{to}`")]
    Conversion {
        from: &'static str,
        to: &'static str,
        value: String,
    },
}
