use crate::{Error, resolve::ResolveError};
use crudgen_schema::{build::SchemaRepository, node::SchemaDefinition};
use derive_more::Display;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Arguments of one GraphQL field invocation.
pub type ResolverArgs = Map<String, Value>;

/// One bound operation handler.
pub type ResolverFn = Box<dyn Fn(&ResolverArgs) -> Result<Value, Error> + Send + Sync>;

///
/// CrudOperation
///
/// The five operations every entity schema exposes. `Display` gives the verb
/// used to build the GraphQL operation name.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum CrudOperation {
    #[display("delete")]
    Delete,

    #[display("find")]
    GetMany,

    #[display("get")]
    GetOne,

    #[display("insert")]
    Insert,

    #[display("update")]
    Update,
}

impl CrudOperation {
    pub const ALL: [Self; 5] = [
        Self::Insert,
        Self::Update,
        Self::GetOne,
        Self::GetMany,
        Self::Delete,
    ];

    /// GraphQL operation name for `schema`, e.g. `insertRefOne` or
    /// `findRefOnes`.
    #[must_use]
    pub fn operation_name(self, schema: &SchemaDefinition) -> String {
        match self {
            Self::GetMany => format!("{self}{}", schema.plural_name()),
            _ => format!("{self}{}", schema.name()),
        }
    }

    fn dispatch(
        self,
        resolver: &dyn CrudResolver,
        schema: &str,
        args: &ResolverArgs,
    ) -> Result<Value, Error> {
        match self {
            Self::Delete => resolver.delete(schema, args),
            Self::GetMany => resolver.get_many(schema, args),
            Self::GetOne => resolver.get_one(schema, args),
            Self::Insert => resolver.insert(schema, args),
            Self::Update => resolver.update(schema, args),
        }
    }
}

///
/// CrudResolver
///
/// Generic CRUD implementation shared by every entity schema. Each call is
/// tagged with the name of the schema it serves.
///

pub trait CrudResolver: Send + Sync {
    fn insert(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error>;

    fn update(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error>;

    fn get_one(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error>;

    fn get_many(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error>;

    fn delete(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error>;
}

///
/// ResolverMap
///
/// Dispatch table keyed by `(schema name, operation)`, with a secondary index
/// from GraphQL operation names for the server collaborator.
///

#[derive(Default)]
pub struct ResolverMap {
    handlers: BTreeMap<(String, CrudOperation), ResolverFn>,
    operations: BTreeMap<String, (String, CrudOperation)>,
}

impl ResolverMap {
    #[must_use]
    pub fn get(&self, schema: &str, op: CrudOperation) -> Option<&ResolverFn> {
        self.handlers.get(&(schema.to_string(), op))
    }

    pub fn call(
        &self,
        schema: &str,
        op: CrudOperation,
        args: &ResolverArgs,
    ) -> Result<Value, Error> {
        let handler = self
            .get(schema, op)
            .ok_or_else(|| ResolveError::UnknownOperation(format!("{op} on {schema}")))?;

        handler(args)
    }

    /// Dispatch by GraphQL operation name (`insertRefOne`, `findRefOnes`, ...).
    pub fn resolve(&self, operation: &str, args: &ResolverArgs) -> Result<Value, Error> {
        let (schema, op) = self
            .operations
            .get(operation)
            .ok_or_else(|| ResolveError::UnknownOperation(operation.to_string()))?;

        self.call(schema, *op, args)
    }

    /// GraphQL operation names, sorted.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn insert(&mut self, schema: &SchemaDefinition, op: CrudOperation, handler: ResolverFn) {
        let key = (schema.name().to_string(), op);

        self.operations
            .insert(op.operation_name(schema), key.clone());
        self.handlers.insert(key, handler);
    }
}

impl fmt::Debug for ResolverMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverMap")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Bind the five CRUD operations of every entity schema to `resolver`.
///
/// The map holds no logic of its own: each handler forwards its arguments to
/// the matching `CrudResolver` method, tagged with the schema name.
#[must_use]
pub fn get_resolver(repository: &SchemaRepository, resolver: Arc<dyn CrudResolver>) -> ResolverMap {
    let mut map = ResolverMap::default();

    for schema in repository.entity_schemas() {
        for op in CrudOperation::ALL {
            let resolver = Arc::clone(&resolver);
            let schema_name = schema.name().to_string();

            let handler: ResolverFn = Box::new(move |args| {
                tracing::trace!(schema = %schema_name, operation = %op, "resolver dispatch");
                op.dispatch(resolver.as_ref(), &schema_name, args)
            });
            map.insert(schema, op, handler);
        }
    }

    tracing::debug!(handlers = map.len(), "resolver map generated");

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{embedded, entity, repository, text};
    use crudgen_schema::node::{Field, SchemaBuilder};
    use serde_json::json;
    use std::sync::Mutex;

    ///
    /// Recorder
    /// Answers every call with `{method, schema, args}` and remembers it.
    ///

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl Recorder {
        fn record(&self, method: &str, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), schema.to_string()));

            Ok(json!({ "method": method, "schema": schema, "args": args }))
        }
    }

    impl CrudResolver for Recorder {
        fn insert(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.record("insert", schema, args)
        }

        fn update(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.record("update", schema, args)
        }

        fn get_one(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.record("get_one", schema, args)
        }

        fn get_many(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.record("get_many", schema, args)
        }

        fn delete(&self, schema: &str, args: &ResolverArgs) -> Result<Value, Error> {
            self.record("delete", schema, args)
        }
    }

    fn args(value: Value) -> ResolverArgs {
        match value {
            Value::Object(map) => map,
            _ => panic!("args must be an object"),
        }
    }

    #[test]
    fn five_handlers_per_entity_only() {
        let step = embedded("Step", vec![text("stepName")]);
        let ref_one = entity("RefOne", vec![text("refOneName")]);
        let category = SchemaBuilder::entity("Category")
            .plural_name("Categories")
            .fields(vec![text("label"), Field::schema("step", &step)])
            .and_then(SchemaBuilder::freeze)
            .unwrap();
        let repo = repository(&[&step, &ref_one, &category]);

        let map = get_resolver(&repo, Arc::new(Recorder::default()));

        assert_eq!(map.len(), 10);
        assert_eq!(
            map.operation_names().collect::<Vec<_>>(),
            vec![
                "deleteCategory",
                "deleteRefOne",
                "findCategories",
                "findRefOnes",
                "getCategory",
                "getRefOne",
                "insertCategory",
                "insertRefOne",
                "updateCategory",
                "updateRefOne",
            ]
        );
        assert!(map.get("Step", CrudOperation::Insert).is_none());
    }

    #[test]
    fn handlers_forward_tagged_with_schema() {
        let ref_one = entity("RefOne", vec![text("refOneName")]);
        let recorder = Arc::new(Recorder::default());
        let map = get_resolver(&repository(&[&ref_one]), recorder.clone());

        let out = map
            .resolve("findRefOnes", &args(json!({ "q": { "top": 1 } })))
            .unwrap();
        assert_eq!(
            out,
            json!({ "method": "get_many", "schema": "RefOne", "args": { "q": { "top": 1 } } })
        );

        map.call("RefOne", CrudOperation::Delete, &args(json!({ "id": "x" })))
            .unwrap();

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec![
                ("get_many".to_string(), "RefOne".to_string()),
                ("delete".to_string(), "RefOne".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_operation_is_reported() {
        let ref_one = entity("RefOne", vec![text("refOneName")]);
        let map = get_resolver(&repository(&[&ref_one]), Arc::new(Recorder::default()));

        let err = map.resolve("findWidgets", &ResolverArgs::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::UnknownOperation(ref name)) if name == "findWidgets"
        ));
    }

    #[test]
    fn operation_names_use_verb_and_plural() {
        let ref_one = entity("RefOne", vec![text("refOneName")]);
        let names: Vec<_> = CrudOperation::ALL
            .iter()
            .map(|op| op.operation_name(&ref_one))
            .collect();

        assert_eq!(
            names,
            vec!["insertRefOne", "updateRefOne", "getRefOne", "findRefOnes", "deleteRefOne"]
        );
    }
}
