use crate::{
    error::ErrorTree,
    node::{Field, SchemaDefinition},
};
use std::{collections::BTreeMap, sync::Arc};

///
/// RelationEdge
/// Reference occurrence captured during schema field-graph traversal.
///

pub struct RelationEdge<'a> {
    source_schema: &'a str,
    field_path: String,
    target: &'a Arc<SchemaDefinition>,
}

/// Every reference reachable from a registered schema (directly or through
/// embedded types) must point at the registered instance of an entity.
pub fn validate_reference_targets(schemas: &[Arc<SchemaDefinition>], errs: &mut ErrorTree) {
    // Phase 1: collect reference edges for each schema.
    let mut edges = Vec::new();
    for schema in schemas {
        let mut field_path = Vec::new();
        collect_field_relations(schema.name(), schema.fields(), &mut field_path, &mut edges);
    }

    // Phase 2: resolve each target against the registered set.
    let registered: BTreeMap<String, &Arc<SchemaDefinition>> = schemas
        .iter()
        .map(|s| (s.name().to_lowercase(), s))
        .collect();

    for edge in edges {
        let target_name = edge.target.name();
        match registered.get(&target_name.to_lowercase()) {
            Some(&found) if Arc::ptr_eq(found, edge.target) => {}
            Some(_) => errs.add_for(
                edge.source_schema,
                format!(
                    "field '{}' references a different instance of schema '{target_name}' than the registered one",
                    edge.field_path
                ),
            ),
            None => errs.add_for(
                edge.source_schema,
                format!(
                    "field '{}' references unregistered schema '{target_name}'",
                    edge.field_path
                ),
            ),
        }
    }
}

// Walk a field list, recording references and descending into embedded types.
// Reference targets are not descended into: they are registered schemas and
// get their own pass.
fn collect_field_relations<'a>(
    source_schema: &'a str,
    fields: impl Iterator<Item = &'a Field>,
    field_path: &mut Vec<&'a str>,
    edges: &mut Vec<RelationEdge<'a>>,
) {
    for field in fields {
        field_path.push(field.name());

        if let Some(target) = field.target() {
            if field.is_reference() {
                edges.push(RelationEdge {
                    source_schema,
                    field_path: format_field_path(field_path),
                    target,
                });
            } else {
                collect_field_relations(source_schema, target.fields(), field_path, edges);
            }
        }

        field_path.pop();
    }
}

// Render a dotted field path used in validation errors.
fn format_field_path(field_path: &[&str]) -> String {
    field_path.join(".")
}
