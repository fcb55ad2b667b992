use crate::{
    build::validate::{validate_field_name, validate_schema_name},
    err,
    error::ErrorTree,
    node::{Field, SchemaDefinition},
};
use std::{collections::BTreeMap, sync::Arc};

/// Check the schema name and every field name of one definition.
pub fn validate_schema_naming(definition: &SchemaDefinition, errs: &mut ErrorTree) {
    if let Err(msg) = validate_schema_name(definition.name()) {
        errs.add(msg);
    }

    for field in definition.fields() {
        if let Err(msg) = validate_field_name(field.name()) {
            errs.add_for(field.name(), msg);
        }
    }
}

///
/// TypeOrigin
/// What claimed a GraphQL type name.
///

enum TypeOrigin<'a> {
    Schema(&'a str),
    Generated(&'a str),
    Embedded {
        path: String,
        target: &'a Arc<SchemaDefinition>,
        input: bool,
    },
}

impl TypeOrigin<'_> {
    // an embedded shape reached twice through the same target is one type
    fn shares(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Embedded { target, input, .. },
                Self::Embedded {
                    target: other_target,
                    input: other_input,
                    ..
                },
            ) => Arc::ptr_eq(target, other_target) && input == other_input,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Schema(name) => format!("schema '{name}'"),
            Self::Generated(name) => format!("a type generated for '{name}'"),
            Self::Embedded { path, input, .. } => {
                let side = if *input { "input" } else { "type" };
                format!("the embedded {side} of '{path}'")
            }
        }
    }
}

/// Names must be unique ignoring case (lookups are case-insensitive), and
/// every type name an SDL document would declare must be claimed once: the
/// schema names, the `Input`/`QueryResults` types of each entity, and the
/// `{Owner}{Field}` pairs of embedded fields reachable from an entity.
pub fn validate_repository_naming(schemas: &[Arc<SchemaDefinition>], errs: &mut ErrorTree) {
    let mut by_key: BTreeMap<String, &str> = BTreeMap::new();
    let mut claimed: BTreeMap<String, TypeOrigin<'_>> = BTreeMap::new();

    for schema in schemas {
        let name = schema.name();
        match by_key.insert(name.to_lowercase(), name) {
            Some(prev) => {
                err!(errs, "duplicate schema name '{name}' (already registered as '{prev}')");
            }
            None => claim(&mut claimed, name.to_string(), TypeOrigin::Schema(name), errs),
        }
    }

    for schema in schemas.iter().filter(|s| s.is_entity()) {
        let name = schema.name();
        for generated in [format!("{name}Input"), format!("{name}QueryResults")] {
            claim(&mut claimed, generated, TypeOrigin::Generated(name), errs);
        }

        let mut field_path = vec![name];
        claim_embedded_types(schema.fields(), &mut field_path, &mut claimed, errs);
    }
}

fn claim<'a>(
    claimed: &mut BTreeMap<String, TypeOrigin<'a>>,
    name: String,
    origin: TypeOrigin<'a>,
    errs: &mut ErrorTree,
) {
    match claimed.get(&name) {
        Some(prev) if prev.shares(&origin) => {}
        Some(prev) => err!(
            errs,
            "type name '{name}' is claimed by both {} and {}",
            prev.describe(),
            origin.describe()
        ),
        None => {
            claimed.insert(name, origin);
        }
    }
}

// Walk the embedded fields rendered into an entity's SDL, recursing into each
// embedded target. Internal fields are never rendered, so they claim nothing.
fn claim_embedded_types<'a>(
    fields: impl Iterator<Item = &'a Field>,
    field_path: &mut Vec<&'a str>,
    claimed: &mut BTreeMap<String, TypeOrigin<'a>>,
    errs: &mut ErrorTree,
) {
    for field in fields.filter(|f| f.is_embedded() && !f.is_internal()) {
        let Some(target) = field.target() else {
            continue;
        };
        field_path.push(field.name());

        match field.field_name() {
            Ok(type_name) => {
                let path = field_path.join(".");
                let input_name = format!("{type_name}Input");
                claim(
                    claimed,
                    type_name,
                    TypeOrigin::Embedded {
                        path: path.clone(),
                        target,
                        input: false,
                    },
                    errs,
                );
                claim(
                    claimed,
                    input_name,
                    TypeOrigin::Embedded {
                        path,
                        target,
                        input: true,
                    },
                    errs,
                );
            }
            Err(e) => errs.add_for(field.name(), e),
        }

        claim_embedded_types(target.fields(), field_path, claimed, errs);
        field_path.pop();
    }
}
