//! Schema validation orchestration and shared helpers.

pub mod naming;
pub mod relation;

pub use crate::build::validate::validate_ident;

use crate::{
    error::ErrorTree,
    node::{Field, SchemaDefinition},
};
use std::sync::Arc;

/// Validate a single definition as it is frozen.
pub(crate) fn validate_definition(definition: &SchemaDefinition) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    naming::validate_schema_naming(definition, &mut errors);
    for field in definition.fields() {
        validate_field_flags(field, &mut errors);
    }

    errors.result()
}

/// Run repository-wide validation in a staged, deterministic order.
pub(crate) fn validate_repository(schemas: &[Arc<SchemaDefinition>]) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: names are unique and do not collide with generated ones.
    naming::validate_repository_naming(schemas, &mut errors);

    // Phase 2: every reference resolves to a registered entity.
    relation::validate_reference_targets(schemas, &mut errors);

    errors.result()
}

// Flag combinations that can never compile into a coherent artifact.
fn validate_field_flags(field: &Field, errs: &mut ErrorTree) {
    let name = field.name();

    if field.is_internal() && field.is_audit() {
        errs.add_for(name, "field cannot be both internal and audit");
    }

    if field.is_id() {
        match field.ty().scalar() {
            Some(kind) if kind.supports_id() => {}
            Some(kind) => errs.add_for(name, format!("id field cannot be of kind {kind}")),
            None => errs.add_for(name, "id field must be scalar"),
        }
        if field.is_array() {
            errs.add_for(name, "id field cannot be an array");
        }
    }

    if field.is_unique() {
        if field.is_embedded() {
            errs.add_for(name, "embedded field cannot be unique");
        }
        if field.ty().scalar().is_some_and(|kind| kind.is_opaque()) {
            errs.add_for(name, "opaque field cannot be unique");
        }
    }
}
