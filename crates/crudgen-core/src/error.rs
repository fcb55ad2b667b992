use crate::{config::ConfigError, graphql::GraphqlError, query::QueryError, resolve::ResolveError};
use crudgen_schema::{build::BuildError, node::NodeError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error. Every variant wraps the module error that produced it;
/// `class()` gives the stable classification used when the error is reported
/// to an API caller.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Schema(#[from] crudgen_schema::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Config(_) | Self::Query(_) => ErrorClass::Validation,
            Self::Graphql(err) => err.class(),
            Self::Resolve(err) => err.class(),
            Self::Schema(crudgen_schema::Error::BuildError(err)) => build_class(err),
            Self::Schema(crudgen_schema::Error::NodeError(err)) => node_class(err),
            Self::Serialize(_) => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Self::Schema(err.into())
    }
}

impl From<NodeError> for Error {
    fn from(err: NodeError) -> Self {
        Self::Schema(err.into())
    }
}

pub(crate) const fn build_class(err: &BuildError) -> ErrorClass {
    match err {
        BuildError::SchemaNotFound(_) => ErrorClass::NotFound,
        BuildError::Validation(_) => ErrorClass::Validation,
    }
}

pub(crate) const fn node_class(err: &NodeError) -> ErrorClass {
    match err {
        NodeError::DuplicateField { .. } => ErrorClass::Conflict,
        NodeError::MissingSchemaReference { .. } => ErrorClass::InvariantViolation,
        NodeError::Validation { .. } => ErrorClass::Validation,
    }
}

///
/// ErrorClass
/// Error taxonomy surfaced as the `code` of API error objects.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Internal,
    InvariantViolation,
    NotFound,
    Unsupported,
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::Validation => "validation",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_keep_their_class() {
        let err = Error::from(BuildError::SchemaNotFound("Missing".to_string()));
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(err.display_with_class(), "not_found: schema 'Missing' not found");

        let err = Error::from(NodeError::MissingSchemaReference {
            field: "steps".to_string(),
        });
        assert_eq!(err.class(), ErrorClass::InvariantViolation);
    }
}
