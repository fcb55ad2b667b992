use crate::{
    graphql::{GraphqlError, GraphqlRequest, resolver::CrudOperation},
    query::QueryModifier,
};
use crudgen_schema::node::SchemaDefinition;
use serde::Serialize;
use serde_json::{Map, Value};

/// Identifier key used when a schema declares no id field.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Selection set for `schema`: every non-internal field, one per line, with
/// reference and embedded fields expanded inline as `name {children}`.
///
/// An exclusion is a dotted path from the schema root. It removes the field
/// it names and, for schema-typed fields, the whole nested block. A nested
/// block left without fields is dropped.
#[must_use]
pub fn get_field_list_for_query(schema: &SchemaDefinition, exclusions: &[&str]) -> String {
    field_list(schema, None, exclusions).join("\n")
}

fn field_list(schema: &SchemaDefinition, prefix: Option<&str>, exclusions: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();

    for field in schema.fields().filter(|f| !f.is_internal()) {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{}", field.name()),
            None => field.name().to_string(),
        };
        if exclusions.contains(&path.as_str()) {
            continue;
        }

        match field.target() {
            Some(target) => {
                let children = field_list(target, Some(&path), exclusions);
                if !children.is_empty() {
                    lines.push(format!("{} {{{}}}", field.name(), children.join("\n")));
                }
            }
            None => lines.push(field.name().to_string()),
        }
    }

    lines
}

fn results_selection(schema: &SchemaDefinition, exclusions: &[&str]) -> String {
    format!(
        "{{data {{{}}}\ncount\ntotalCount}}",
        get_field_list_for_query(schema, exclusions)
    )
}

/// `get{Name}` request for one document.
#[must_use]
pub fn build_get_by_id_query(
    schema: &SchemaDefinition,
    id: &str,
    exclusions: &[&str],
) -> GraphqlRequest {
    let query = format!(
        "query($id:String!){{{}(id: $id){}}}",
        CrudOperation::GetOne.operation_name(schema),
        results_selection(schema, exclusions)
    );

    GraphqlRequest::new(query, single("id", Value::String(id.to_string())))
}

/// `find{Plural}` request driven by a query modifier.
pub fn build_find_query(
    schema: &SchemaDefinition,
    modifier: &QueryModifier,
    exclusions: &[&str],
) -> Result<GraphqlRequest, GraphqlError> {
    let query = format!(
        "query($q:QueryModifier){{{}(q: $q){}}}",
        CrudOperation::GetMany.operation_name(schema),
        results_selection(schema, exclusions)
    );

    Ok(GraphqlRequest::new(
        query,
        single("q", serde_json::to_value(modifier)?),
    ))
}

/// `insert{Name}` request carrying the whole document.
pub fn build_insert_mutation(
    schema: &SchemaDefinition,
    doc: &impl Serialize,
) -> Result<GraphqlRequest, GraphqlError> {
    Ok(build_mutation(
        schema,
        CrudOperation::Insert,
        serde_json::to_value(doc)?,
    ))
}

/// `update{Name}` request carrying the whole document.
pub fn build_update_mutation(
    schema: &SchemaDefinition,
    doc: &impl Serialize,
) -> Result<GraphqlRequest, GraphqlError> {
    Ok(build_mutation(
        schema,
        CrudOperation::Update,
        serde_json::to_value(doc)?,
    ))
}

/// `delete{Name}` request. Only the document's id is sent.
pub fn build_delete_mutation(
    schema: &SchemaDefinition,
    doc: &impl Serialize,
) -> Result<GraphqlRequest, GraphqlError> {
    let id_field = schema
        .id_field()
        .map_or(DEFAULT_ID_FIELD, |field| field.name());

    let id = match serde_json::to_value(doc)? {
        Value::Object(mut map) => match map.remove(id_field) {
            Some(Value::String(id)) => Some(id),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| GraphqlError::MissingId {
        schema: schema.name().to_string(),
        field: id_field.to_string(),
    })?;

    Ok(build_mutation(
        schema,
        CrudOperation::Delete,
        Value::String(id),
    ))
}

// Shared by every mutation verb: delete takes `id`, the rest take `doc`.
fn build_mutation(
    schema: &SchemaDefinition,
    op: CrudOperation,
    value: Value,
) -> GraphqlRequest {
    let (arg, ty) = match op {
        CrudOperation::Delete => ("id", "String!".to_string()),
        _ => ("doc", format!("{}Input", schema.name())),
    };
    let query = format!(
        "mutation(${arg}:{ty}){{{}({arg}: ${arg})}}",
        op.operation_name(schema)
    );

    GraphqlRequest::new(query, single(arg, value))
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);

    Value::Object(map)
}
