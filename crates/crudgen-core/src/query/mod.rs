//! Query modifier and result envelope shared by the resolver, the client
//! adapter and the persistence collaborator.


use crudgen_schema::error::ErrorTree;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error as ThisError;

/// Filter key that marks a full-text search.
pub const TEXT_SEARCH_KEY: &str = "$text";

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("query modifier validation failed: {0}")]
    ValidationFailed(ErrorTree),
}

///
/// QueryModifier
///
/// Pagination, sorting, filtering and populate switch for a `find`.
/// `top == 0` means unlimited. Serializes with `filterBy` encoded as a JSON
/// string, matching the `QueryModifier` GraphQL input.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct QueryModifier {
    pub top: u64,
    pub skip: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(
        serialize_with = "serialize_filter",
        skip_serializing_if = "Map::is_empty"
    )]
    pub filter_by: Map<String, Value>,

    pub populate: bool,
}

impl Default for QueryModifier {
    fn default() -> Self {
        Self {
            top: 0,
            skip: 0,
            sort_by: None,
            filter_by: Map::new(),
            populate: true,
        }
    }
}

impl QueryModifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn top(mut self, top: u64) -> Self {
        self.top = top;
        self
    }

    #[must_use]
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    #[must_use]
    pub fn filter_by(mut self, filter_by: Map<String, Value>) -> Self {
        self.filter_by = filter_by;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.filter_by.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }

    //
    // derived
    //

    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.top != 0 || self.skip != 0
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sort_by.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.filter_by.is_empty()
    }

    #[must_use]
    pub fn is_text_search(&self) -> bool {
        self.is_filtered() && self.filter_by.contains_key(TEXT_SEARCH_KEY)
    }

    /// Build from an untyped payload (GraphQL variables, query strings).
    ///
    /// Every invalid key is reported; missing or null keys take defaults.
    /// `filterBy` may be an object or a JSON string encoding one.
    pub fn from_value(value: &Value) -> Result<Self, QueryError> {
        let mut errs = ErrorTree::new();

        let Value::Object(map) = value else {
            errs.add("query modifier must be an object");
            return Err(QueryError::ValidationFailed(errs));
        };

        let modifier = Self {
            top: read_count(map, "top", &mut errs),
            skip: read_count(map, "skip", &mut errs),
            sort_by: read_sort(map, &mut errs),
            filter_by: read_filter(map, &mut errs),
            populate: read_populate(map, &mut errs),
        };

        errs.result().map_err(QueryError::ValidationFailed)?;

        Ok(modifier)
    }
}

impl TryFrom<Value> for QueryModifier {
    type Error = QueryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn read_count(map: &Map<String, Value>, key: &str, errs: &mut ErrorTree) -> u64 {
    let Some(value) = present(map, key) else {
        return 0;
    };

    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| describe_bad_count(n.as_f64())),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| describe_bad_count(s.trim().parse::<f64>().ok())),
        _ => Err("must be numeric".to_string()),
    };

    parsed.unwrap_or_else(|msg| {
        errs.add_for(key, msg);
        0
    })
}

fn describe_bad_count(value: Option<f64>) -> String {
    match value {
        Some(v) if v < 0.0 => "must be non-negative".to_string(),
        Some(_) => "must be a whole number".to_string(),
        None => "must be numeric".to_string(),
    }
}

fn read_sort(map: &Map<String, Value>, errs: &mut ErrorTree) -> Option<String> {
    match present(map, "sortBy")? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        _ => {
            errs.add_for("sortBy", "must be a string");
            None
        }
    }
}

fn read_filter(map: &Map<String, Value>, errs: &mut ErrorTree) -> Map<String, Value> {
    let decoded = match present(map, "filterBy") {
        None => return Map::new(),
        Some(Value::String(s)) if s.trim().is_empty() => return Map::new(),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).ok(),
        Some(other) => Some(other.clone()),
    };

    match decoded {
        Some(Value::Object(filter)) => filter,
        _ => {
            errs.add_for("filterBy", "must be an object");
            Map::new()
        }
    }
}

fn read_populate(map: &Map<String, Value>, errs: &mut ErrorTree) -> bool {
    match present(map, "populate") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errs.add_for("populate", "must be a boolean");
            true
        }
    }
}

// filterBy travels as a JSON string in GraphQL variables
fn serialize_filter<S: Serializer>(
    filter: &Map<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&Value::Object(filter.clone()).to_string())
}

///
/// QueryResults
///
/// Result envelope of a `find`: the page of documents, its size and the
/// number of matches before pagination when the store reports it.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResults {
    pub data: Vec<Value>,
    pub count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}
