//! Field to GraphQL type mapping shared by the SDL and client generators.

use crate::graphql::GraphqlError;
use crudgen_schema::{
    node::{Field, FieldType},
    types::ScalarKind,
};

///
/// TypeContext
///
/// Whether a field is rendered into an output `type` or an `input`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeContext {
    Input,
    Output,
}

/// GraphQL spelling of a scalar kind; `None` when the kind has no mapping.
#[must_use]
pub const fn scalar_type(kind: ScalarKind) -> Option<&'static str> {
    match kind {
        ScalarKind::Boolean => Some("Boolean"),
        ScalarKind::Buffer => Some("[Int]!"),
        ScalarKind::Date | ScalarKind::String => Some("String"),
        ScalarKind::Decimal => Some("Float"),
        ScalarKind::Id => Some("ID"),
        ScalarKind::Number => Some("Int"),
        ScalarKind::Mixed => None,
    }
}

/// Whether a field is rendered at all in the given context.
///
/// Internal fields are never rendered; audit fields are server-managed and
/// stay out of inputs.
#[must_use]
pub const fn includes(field: &Field, ctx: TypeContext) -> bool {
    if field.is_internal() {
        return false;
    }

    match ctx {
        TypeContext::Output => true,
        TypeContext::Input => !field.is_audit(),
    }
}

/// Full GraphQL type of a field, including list wrapping and non-null marks.
pub fn graphql_type(field: &Field, ctx: TypeContext) -> Result<String, GraphqlError> {
    let base = match field.ty() {
        FieldType::Scalar(kind) => scalar_type(*kind)
            .ok_or_else(|| GraphqlError::UnsupportedType {
                field: field.name().to_string(),
                kind: *kind,
            })?
            .to_string(),
        FieldType::Reference(target) => match ctx {
            TypeContext::Output => target.name().to_string(),
            TypeContext::Input => "ID".to_string(),
        },
        FieldType::Embedded(_) => embedded_type_name(field, ctx)?,
    };

    let mut ty = if field.is_array() {
        format!("[{base}]!")
    } else {
        base
    };

    // ids are server-assigned, so they never block an insert
    let required = match ctx {
        TypeContext::Output => field.is_required() || field.is_id(),
        TypeContext::Input => field.is_required() && !field.is_id(),
    };
    if required && !ty.ends_with('!') {
        ty.push('!');
    }

    Ok(ty)
}

/// Synthesized type name of an embedded field: `{Owner}{Field}`, with an
/// `Input` suffix on the input side.
pub fn embedded_type_name(field: &Field, ctx: TypeContext) -> Result<String, GraphqlError> {
    let name = field.field_name()?;

    Ok(match ctx {
        TypeContext::Output => name,
        TypeContext::Input => format!("{name}Input"),
    })
}
