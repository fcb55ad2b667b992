pub(crate) mod validate;

use crate::{error::ErrorTree, node::SchemaDefinition, validate::validate_repository};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    #[error("repository validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// SchemaRepository
///
/// Immutable, ordered registry of frozen schema definitions. It is built once
/// at startup and passed explicitly to every generator; lookups by name are
/// case-insensitive.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRepository {
    schemas: Vec<Arc<SchemaDefinition>>,
    by_name: BTreeMap<String, usize>,
}

impl SchemaRepository {
    /// Register the given definitions in order, validating the whole set.
    pub fn new(
        schemas: impl IntoIterator<Item = Arc<SchemaDefinition>>,
    ) -> Result<Self, BuildError> {
        let schemas: Vec<_> = schemas.into_iter().collect();
        validate_repository(&schemas).map_err(BuildError::Validation)?;

        let by_name = schemas
            .iter()
            .enumerate()
            .map(|(i, schema)| (lookup_key(schema.name()), i))
            .collect();

        tracing::debug!(
            schemas = schemas.len(),
            entities = schemas.iter().filter(|s| s.is_entity()).count(),
            "schema repository built"
        );

        Ok(Self { schemas, by_name })
    }

    /// Case-insensitive lookup; every casing yields the same shared instance.
    pub fn get_schema_by_name(&self, name: &str) -> Result<&Arc<SchemaDefinition>, BuildError> {
        self.by_name
            .get(&lookup_key(name))
            .map(|&i| &self.schemas[i])
            .ok_or_else(|| BuildError::SchemaNotFound(name.to_string()))
    }

    /// All definitions, in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<SchemaDefinition>> {
        self.schemas.iter()
    }

    /// Entity definitions only, in registration order.
    pub fn entity_schemas(&self) -> impl Iterator<Item = &Arc<SchemaDefinition>> {
        self.schemas.iter().filter(|s| s.is_entity())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}
