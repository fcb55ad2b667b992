//! Declarative entity/field metamodel.
//!
//! - `node`: fields and schema definitions, plus the builder that freezes them.
//! - `build`: the immutable [`SchemaRepository`](build::SchemaRepository).
//! - `validate`: definition-local and repository-wide validation passes.
//! - `types`: scalar kinds shared by every consumer of the metamodel.

pub mod build;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for schema identifiers.
pub const MAX_SCHEMA_NAME_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::{build::BuildError, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::SchemaRepository,
        err,
        error::ErrorTree,
        node::{Field, FieldFlags, FieldType, SchemaBuilder, SchemaDefinition},
        types::ScalarKind,
    };
    pub use serde::Serialize;
    pub use std::sync::Arc;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}

impl Error {
    #[must_use]
    pub const fn is_schema_not_found(&self) -> bool {
        matches!(self, Self::BuildError(BuildError::SchemaNotFound(_)))
    }
}
