use crate::{
    node::{Field, NodeError},
    validate::validate_definition,
};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};

///
/// SchemaDefinition
///
/// One entity (top-level collection with its own identity) or embedded type
/// (only ever stored inside another document). Instances are produced by
/// `SchemaBuilder::freeze` and are read-only from then on.
///

#[derive(Debug, Serialize)]
pub struct SchemaDefinition {
    name: String,
    plural_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    is_entity: bool,
    fields: BTreeMap<String, Field>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    internal_fields: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    audit_fields: Vec<String>,
}

impl SchemaDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.is_entity
    }

    /// Fields in lexicographic name order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn internal_fields(&self) -> &[String] {
        &self.internal_fields
    }

    #[must_use]
    pub fn audit_fields(&self) -> &[String] {
        &self.audit_fields
    }

    /// Fields the storage layer must encrypt at rest.
    pub fn encrypted_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields().filter(|f| f.must_be_encrypted())
    }

    /// The identifier field, if the schema declares one.
    #[must_use]
    pub fn id_field(&self) -> Option<&Field> {
        self.fields().find(|f| f.is_id())
    }
}

///
/// SchemaBuilder
///
/// Composes a schema from one or more field sources (base-entity fields,
/// audit fields, a parent schema, own fields) into one flat, name-sorted
/// field set. `freeze` validates the result and hands out a shared,
/// immutable `SchemaDefinition`.
///

#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    plural_name: Option<String>,
    description: Option<String>,
    is_entity: bool,
    fields: BTreeMap<String, Field>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, is_entity: bool) -> Self {
        Self {
            name: name.into(),
            plural_name: None,
            description: None,
            is_entity,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    #[must_use]
    pub fn plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add one field; the builder keeps its own copy, owned by this schema.
    pub fn field(mut self, field: Field) -> Result<Self, NodeError> {
        if self.fields.contains_key(field.name()) {
            return Err(NodeError::DuplicateField {
                schema: self.name,
                field: field.name().to_string(),
            });
        }

        let field = field.owned_by(&self.name);
        self.fields.insert(field.name().to_string(), field);

        Ok(self)
    }

    pub fn fields(self, fields: impl IntoIterator<Item = Field>) -> Result<Self, NodeError> {
        fields.into_iter().try_fold(self, Self::field)
    }

    /// Copy every field of `parent` into this schema.
    pub fn merge(self, parent: &SchemaDefinition) -> Result<Self, NodeError> {
        self.fields(parent.fields().cloned())
    }

    /// Validate and freeze into a shared, read-only definition.
    pub fn freeze(self) -> Result<Arc<SchemaDefinition>, NodeError> {
        let plural_name = self
            .plural_name
            .unwrap_or_else(|| format!("{}s", self.name));

        let internal_fields = self
            .fields
            .values()
            .filter(|f| f.is_internal())
            .map(|f| f.name().to_string())
            .collect();
        let audit_fields = self
            .fields
            .values()
            .filter(|f| f.is_audit())
            .map(|f| f.name().to_string())
            .collect();

        let definition = SchemaDefinition {
            name: self.name,
            plural_name,
            description: self.description,
            is_entity: self.is_entity,
            fields: self.fields,
            internal_fields,
            audit_fields,
        };

        validate_definition(&definition).map_err(|errors| NodeError::Validation {
            schema: definition.name.clone(),
            errors,
        })?;

        tracing::debug!(
            schema = %definition.name,
            fields = definition.fields.len(),
            entity = definition.is_entity,
            "schema frozen"
        );

        Ok(Arc::new(definition))
    }
}
