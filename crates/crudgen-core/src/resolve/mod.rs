//! Generic CRUD resolution on top of a persistence collaborator.


use crate::{
    Error,
    error::ErrorClass,
    graphql::{
        client::DEFAULT_ID_FIELD,
        resolver::{CrudOperation, CrudResolver, ResolverArgs},
    },
    populate::{PathDescriptor, populate_plan_for},
    query::{QueryModifier, QueryResults},
};
use crudgen_schema::{build::SchemaRepository, node::SchemaDefinition};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("argument '{argument}' must be {expected}")]
    InvalidArgument {
        argument: &'static str,
        expected: &'static str,
    },

    #[error("{operation} requires argument '{argument}'")]
    MissingArgument {
        operation: String,
        argument: &'static str,
    },

    #[error("{schema} '{id}' not found")]
    NotFound { schema: String, id: String },

    /// The persistence backend itself failed.
    #[error("store failure: {0}")]
    Store(String),

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

impl ResolveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument { .. } | Self::MissingArgument { .. } => ErrorClass::Validation,
            Self::NotFound { .. } | Self::UnknownOperation(_) => ErrorClass::NotFound,
            Self::Store(_) => ErrorClass::Internal,
        }
    }
}

///
/// Persistence
///
/// CRUD contract of the data-access collaborator, keyed by schema name.
/// `find` receives the populate plan to apply; an empty plan means no eager
/// loading.
///

pub trait Persistence: Send + Sync {
    fn find(
        &self,
        schema: &str,
        modifier: &QueryModifier,
        populate: &[PathDescriptor],
    ) -> Result<QueryResults, Error>;

    /// Store a new document and return its id.
    fn add(&self, schema: &str, doc: Value) -> Result<String, Error>;

    /// Merge `doc` into the stored document it identifies and return its id.
    fn update(&self, schema: &str, doc: Value) -> Result<String, Error>;

    fn delete(&self, schema: &str, id: &str) -> Result<String, Error>;
}

///
/// SchemaResolver
///
/// `CrudResolver` that reads arguments, attaches the schema's populate plan
/// and forwards to a `Persistence` implementation.
///

pub struct SchemaResolver<P: Persistence> {
    repository: Arc<SchemaRepository>,
    store: P,
}

impl<P: Persistence> SchemaResolver<P> {
    pub const fn new(repository: Arc<SchemaRepository>, store: P) -> Self {
        Self { repository, store }
    }

    pub const fn store(&self) -> &P {
        &self.store
    }

    fn entity(&self, schema: &str) -> Result<&Arc<SchemaDefinition>, Error> {
        let definition = self.repository.get_schema_by_name(schema)?;
        if !definition.is_entity() {
            return Err(ResolveError::UnknownOperation(format!(
                "{schema} is not an entity schema"
            ))
            .into());
        }

        Ok(definition)
    }
}

fn required<'a>(
    args: &'a ResolverArgs,
    argument: &'static str,
    op: CrudOperation,
    schema: &SchemaDefinition,
) -> Result<&'a Value, ResolveError> {
    args.get(argument)
        .filter(|value| !value.is_null())
        .ok_or_else(|| ResolveError::MissingArgument {
            operation: op.operation_name(schema),
            argument,
        })
}

fn required_id<'a>(
    args: &'a ResolverArgs,
    op: CrudOperation,
    schema: &SchemaDefinition,
) -> Result<&'a str, ResolveError> {
    required(args, "id", op, schema)?
        .as_str()
        .ok_or(ResolveError::InvalidArgument {
            argument: "id",
            expected: "a string",
        })
}

fn required_doc(
    args: &ResolverArgs,
    op: CrudOperation,
    schema: &SchemaDefinition,
) -> Result<Value, ResolveError> {
    let doc = required(args, "doc", op, schema)?;
    if !doc.is_object() {
        return Err(ResolveError::InvalidArgument {
            argument: "doc",
            expected: "an object",
        });
    }

    Ok(doc.clone())
}

impl<P: Persistence> CrudResolver for SchemaResolver<P> {
    fn insert(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let definition = self.entity(schema)?;
        let doc = required_doc(args, CrudOperation::Insert, definition)?;

        Ok(Value::String(self.store.add(definition.name(), doc)?))
    }

    fn update(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let definition = self.entity(schema)?;
        let doc = required_doc(args, CrudOperation::Update, definition)?;

        Ok(Value::String(self.store.update(definition.name(), doc)?))
    }

    fn get_one(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let definition = self.entity(schema)?;
        let id = required_id(args, CrudOperation::GetOne, definition)?;

        let id_field = definition
            .id_field()
            .map_or(DEFAULT_ID_FIELD, |field| field.name());
        let modifier = QueryModifier::new()
            .top(1)
            .with_filter(id_field, Value::String(id.to_string()));
        let plan = populate_plan_for(definition);

        let results = self.store.find(definition.name(), &modifier, &plan)?;

        Ok(serde_json::to_value(results)?)
    }

    fn get_many(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let definition = self.entity(schema)?;
        let modifier = match args.get("q") {
            None | Some(Value::Null) => QueryModifier::default(),
            Some(q) => QueryModifier::from_value(q)?,
        };
        let plan = if modifier.populate {
            populate_plan_for(definition)
        } else {
            Vec::new()
        };

        let results = self.store.find(definition.name(), &modifier, &plan)?;

        Ok(serde_json::to_value(results)?)
    }

    fn delete(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let definition = self.entity(schema)?;
        let id = required_id(args, CrudOperation::Delete, definition)?;

        Ok(Value::String(self.store.delete(definition.name(), id)?))
    }
}
