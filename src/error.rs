use crate::TypeHandle;
use thiserror::Error;

/// Failure of a type's capability query.
///
/// These are never surfaced by the classifier, which reads any of them as
/// "not a transparent wrapper".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectError {
    #[error("internal introspection error: {0}")]
    Internal(String),
    #[error("introspection is not supported for this type")]
    Unsupported,
    #[error("introspection is only partially implemented for this type")]
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnwrapError {
    #[error("`{ty}` is not a transparent wrapper type")]
    NotTransparent { ty: TypeHandle },
    #[error("transparent wrapper `{ty}` declares no backing field")]
    MissingBackingField { ty: TypeHandle },
    #[error("accessor for `{expected}` applied to a value of type `{found}`")]
    TypeMismatch {
        expected: TypeHandle,
        found: TypeHandle,
    },
}

pub type Result<T, E = UnwrapError> = std::result::Result<T, E>;
