//! Populate planning: which reference paths a data-access layer must eagerly
//! join when it loads a document of a given schema.


use crudgen_schema::node::{Field, SchemaDefinition};
use serde::{Deserialize, Serialize};

///
/// PathDescriptor
///
/// One eager-load path. `populate` carries the plan for the joined document,
/// relative to that document.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PathDescriptor {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub populate: Option<Vec<Self>>,
}

impl PathDescriptor {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            populate: None,
        }
    }

    #[must_use]
    pub fn with_populate(path: impl Into<String>, populate: Vec<Self>) -> Self {
        Self {
            path: path.into(),
            populate: Some(populate),
        }
    }

    /// Depth of the nested plan, counting this entry.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .populate
            .iter()
            .flatten()
            .map(Self::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Populate plan for every field of `schema`.
#[must_use]
pub fn populate_plan_for(schema: &SchemaDefinition) -> Vec<PathDescriptor> {
    let plan = build_populate_plan(schema.fields(), None);
    tracing::trace!(schema = schema.name(), entries = plan.len(), "populate plan built");

    plan
}

/// Build the populate plan for `fields`.
///
/// References always produce an entry and carry their target's plan as
/// `populate`. Embedded fields produce no entry of their own: their plan is
/// spliced into the result, with each path prefixed by the embedded field
/// name. When `parent_field` is embedded the returned paths are already
/// prefixed with its name.
pub fn build_populate_plan<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
    parent_field: Option<&Field>,
) -> Vec<PathDescriptor> {
    let scope = parent_field.filter(|p| p.is_embedded()).map(Field::name);
    let mut plan = Vec::new();

    for field in fields {
        let Some(target) = field.target() else {
            continue;
        };
        let children = build_populate_plan(target.fields(), Some(field));

        if field.is_reference() {
            let path = qualify(scope, field.name());
            plan.push(if children.is_empty() {
                PathDescriptor::new(path)
            } else {
                PathDescriptor::with_populate(path, children)
            });
        } else {
            plan.extend(children.into_iter().map(|mut child| {
                child.path = qualify(scope, &child.path);
                child
            }));
        }
    }

    plan
}

fn qualify(scope: Option<&str>, path: &str) -> String {
    match scope {
        Some(scope) => format!("{scope}.{path}"),
        None => path.to_string(),
    }
}
