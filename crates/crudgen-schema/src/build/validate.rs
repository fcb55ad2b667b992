use crate::{MAX_FIELD_NAME_LEN, MAX_SCHEMA_NAME_LEN};
use convert_case::{Case, Casing};

/// Names a schema may not take: GraphQL built-ins and the fixed types every
/// generated SDL document declares.
pub(crate) const RESERVED: &[&str] = &[
    "Boolean",
    "Float",
    "ID",
    "Int",
    "Mutation",
    "Mutations",
    "Queries",
    "Query",
    "QueryModifier",
    "String",
    "Subscription",
];

/// Ensure an identifier is a valid GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`)
/// outside the introspection namespace.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err("ident is empty".to_string());
    };

    if !(first == '_' || first.is_ascii_alphabetic())
        || !chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
    {
        return Err(format!("ident '{ident}' is not a valid GraphQL name"));
    }
    if ident.starts_with("__") {
        return Err(format!("ident '{ident}' uses the reserved '__' prefix"));
    }

    Ok(())
}

/// Ensure field names are valid identifiers within the maximum length.
pub(crate) fn validate_field_name(name: &str) -> Result<(), String> {
    validate_ident(name)?;

    if name.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "field name '{name}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }

    Ok(())
}

/// Ensure schema names are non-empty, ASCII, PascalCase, unreserved and within
/// the maximum length.
pub(crate) fn validate_schema_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("schema name is empty".to_string());
    }
    if name.len() > MAX_SCHEMA_NAME_LEN {
        return Err(format!(
            "schema name '{name}' exceeds max length {MAX_SCHEMA_NAME_LEN}"
        ));
    }
    if !name.is_ascii() {
        return Err(format!("schema name '{name}' must be ASCII"));
    }
    if name.to_case(Case::UpperCamel) != name {
        return Err(format!("schema name '{name}' must be PascalCase"));
    }

    is_reserved(name)
}

fn is_reserved(word: &str) -> Result<(), String> {
    if RESERVED.contains(&word) {
        return Err(format!("the word '{word}' is reserved"));
    }

    Ok(())
}
