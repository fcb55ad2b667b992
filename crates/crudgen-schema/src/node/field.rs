use crate::{
    node::{NodeError, SchemaDefinition},
    types::ScalarKind,
};
use serde::{Serialize, Serializer};
use std::sync::Arc;

///
/// FieldType
///
/// What a field holds. Schema-typed fields are split into references and
/// embeddings when the field is built, based on whether the target is an
/// entity.
///

#[derive(Clone, Debug, Serialize)]
pub enum FieldType {
    Scalar(ScalarKind),

    #[serde(serialize_with = "serialize_target")]
    Reference(Arc<SchemaDefinition>),

    #[serde(serialize_with = "serialize_target")]
    Embedded(Arc<SchemaDefinition>),
}

impl FieldType {
    #[must_use]
    pub fn for_schema(target: &Arc<SchemaDefinition>) -> Self {
        if target.is_entity() {
            Self::Reference(Arc::clone(target))
        } else {
            Self::Embedded(Arc::clone(target))
        }
    }

    #[must_use]
    pub const fn target(&self) -> Option<&Arc<SchemaDefinition>> {
        match self {
            Self::Scalar(_) => None,
            Self::Reference(target) | Self::Embedded(target) => Some(target),
        }
    }

    #[must_use]
    pub const fn scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }
}

// schema targets serialize by name only
fn serialize_target<S: Serializer>(
    target: &Arc<SchemaDefinition>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(target.name())
}

///
/// FieldFlags
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldFlags {
    pub required: bool,
    pub unique: bool,
    pub array: bool,
    pub audit: bool,
    pub internal: bool,
    pub id: bool,
    pub must_be_encrypted: bool,
}

///
/// Field
///
/// One attribute of a schema. The owner is assigned when the field is added
/// to a `SchemaBuilder`; the builder stores its own copy, so a field value can
/// be reused across several schemas.
///

#[derive(Clone, Debug, Serialize)]
pub struct Field {
    name: String,
    ty: FieldType,

    #[serde(flatten)]
    flags: FieldFlags,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            flags: FieldFlags::default(),
            description: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, FieldType::Scalar(kind))
    }

    /// Identifier field backed by the `Id` scalar.
    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Id).flagged_id()
    }

    /// Field typed by another schema; entities become references, everything
    /// else is embedded.
    #[must_use]
    pub fn schema(name: impl Into<String>, target: &Arc<SchemaDefinition>) -> Self {
        Self::new(name, FieldType::for_schema(target))
    }

    //
    // fluent flags
    //

    #[must_use]
    pub fn required(mut self) -> Self {
        self.flags.required = true;
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.flags.unique = true;
        self
    }

    #[must_use]
    pub fn array(mut self) -> Self {
        self.flags.array = true;
        self
    }

    #[must_use]
    pub fn audit(mut self) -> Self {
        self.flags.audit = true;
        self
    }

    #[must_use]
    pub fn internal(mut self) -> Self {
        self.flags.internal = true;
        self
    }

    #[must_use]
    pub fn encrypted(mut self) -> Self {
        self.flags.must_be_encrypted = true;
        self
    }

    #[must_use]
    pub fn flagged_id(mut self) -> Self {
        self.flags.id = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // owned_by
    // only called by the builder, on its private copy
    pub(crate) fn owned_by(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    //
    // accessors
    //

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &FieldType {
        &self.ty
    }

    #[must_use]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[must_use]
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.flags.required
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.flags.unique
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.flags.array
    }

    #[must_use]
    pub const fn is_audit(&self) -> bool {
        self.flags.audit
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.flags.internal
    }

    #[must_use]
    pub const fn is_id(&self) -> bool {
        self.flags.id
    }

    #[must_use]
    pub const fn must_be_encrypted(&self) -> bool {
        self.flags.must_be_encrypted
    }

    //
    // derived
    //

    #[must_use]
    pub const fn type_is_schema(&self) -> bool {
        !matches!(self.ty, FieldType::Scalar(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.type_is_schema()
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self.ty, FieldType::Embedded(_))
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self.ty, FieldType::Reference(_))
    }

    #[must_use]
    pub const fn target(&self) -> Option<&Arc<SchemaDefinition>> {
        self.ty.target()
    }

    /// Fields of the target schema, or nothing for scalars.
    pub fn child_fields(&self) -> impl Iterator<Item = &Self> {
        self.target().into_iter().flat_map(|target| target.fields())
    }

    /// Capitalised name; embedded fields are prefixed with the owning schema
    /// name, which makes this the type name of the embedded shape.
    pub fn field_name(&self) -> Result<String, NodeError> {
        let capitalized = capitalize(&self.name);

        if self.is_embedded() {
            let owner = self
                .owner
                .as_deref()
                .ok_or_else(|| NodeError::MissingSchemaReference {
                    field: self.name.clone(),
                })?;

            Ok(format!("{owner}{capitalized}"))
        } else {
            Ok(capitalized)
        }
    }
}

/// Uppercase the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
