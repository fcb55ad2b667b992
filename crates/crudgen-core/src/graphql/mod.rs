//! GraphQL artifacts derived from a schema repository.
//!
//! - `sdl`: the server-side SDL document.
//! - `resolver`: the operation dispatch table bound to a generic resolver.
//! - `client`: request builders for API clients.

pub mod client;
pub mod resolver;
pub mod sdl;
pub mod types;

pub use client::*;
pub use resolver::get_resolver;
pub use sdl::{get_schema, get_schema_with};

use crate::error::{ErrorClass, node_class};
use crudgen_schema::{node::NodeError, types::ScalarKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// GraphqlError
///

#[derive(Debug, ThisError)]
pub enum GraphqlError {
    #[error("'{name}' would have no fields")]
    EmptyType { name: String },

    #[error("schema '{schema}' has no value for id field '{field}'")]
    MissingId { schema: String, field: String },

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("request variables could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("field '{field}' has type {kind}, which has no GraphQL mapping")]
    UnsupportedType { field: String, kind: ScalarKind },
}

impl GraphqlError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyType { .. } | Self::MissingId { .. } => ErrorClass::Validation,
            Self::Node(err) => node_class(err),
            Self::Serialize(_) => ErrorClass::Internal,
            Self::UnsupportedType { .. } => ErrorClass::Unsupported,
        }
    }
}

///
/// GraphqlRequest
///
/// Query text plus variables, in the shape a GraphQL endpoint accepts as a
/// POST body.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Value,
}

impl GraphqlRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}
