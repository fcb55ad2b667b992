use crate::{
    Error,
    populate::PathDescriptor,
    query::{QueryModifier, QueryResults},
    resolve::{Persistence, ResolveError},
};
use crudgen_schema::prelude::*;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
    thread,
};

//
// Schema helpers
//

pub(crate) fn text(name: &str) -> Field {
    Field::scalar(name, ScalarKind::String)
}

pub(crate) fn entity(name: &str, fields: Vec<Field>) -> Arc<SchemaDefinition> {
    SchemaBuilder::entity(name)
        .fields(fields)
        .and_then(SchemaBuilder::freeze)
        .expect("test entity should freeze")
}

pub(crate) fn embedded(name: &str, fields: Vec<Field>) -> Arc<SchemaDefinition> {
    SchemaBuilder::embedded(name)
        .fields(fields)
        .and_then(SchemaBuilder::freeze)
        .expect("test embedded schema should freeze")
}

pub(crate) fn repository(schemas: &[&Arc<SchemaDefinition>]) -> SchemaRepository {
    SchemaRepository::new(schemas.iter().map(|s| Arc::clone(s))).expect("test repository")
}

///
/// FindCall
/// What the store saw on a `find`.
///

#[derive(Clone, Debug)]
pub(crate) struct FindCall {
    pub schema: String,
    pub modifier: QueryModifier,
    pub populate: Vec<PathDescriptor>,
}

///
/// MemoryStore
///
/// In-memory `Persistence` keyed by schema name. Filters match top-level keys
/// by equality; ids are sequential strings.
///

#[derive(Default)]
pub(crate) struct MemoryStore {
    docs: Mutex<BTreeMap<String, BTreeMap<String, Map<String, Value>>>>,
    finds: Mutex<Vec<FindCall>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub(crate) fn finds(&self) -> Vec<FindCall> {
        self.finds.lock().expect("finds lock").clone()
    }

    pub(crate) fn count(&self, schema: &str) -> usize {
        self.docs
            .lock()
            .expect("docs lock")
            .get(schema)
            .map_or(0, BTreeMap::len)
    }

    /// Leave the document lock poisoned, as a writer panicking mid-update would.
    pub(crate) fn poison(&self) {
        thread::scope(|s| {
            let writer = s.spawn(|| {
                let guard = self.docs.lock();
                assert!(guard.is_err(), "poisoning the document lock");
            });
            assert!(writer.join().is_err());
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ResolveError> {
    mutex
        .lock()
        .map_err(|_| ResolveError::Store("memory store lock poisoned".to_string()))
}

fn as_object(doc: Value) -> Result<Map<String, Value>, Error> {
    match doc {
        Value::Object(map) => Ok(map),
        _ => Err(ResolveError::InvalidArgument {
            argument: "doc",
            expected: "an object",
        }
        .into()),
    }
}

impl Persistence for MemoryStore {
    fn find(
        &self,
        schema: &str,
        modifier: &QueryModifier,
        populate: &[PathDescriptor],
    ) -> Result<QueryResults, Error> {
        lock(&self.finds)?.push(FindCall {
            schema: schema.to_string(),
            modifier: modifier.clone(),
            populate: populate.to_vec(),
        });

        let docs = lock(&self.docs)?;
        let matching: Vec<Value> = docs
            .get(schema)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter(|doc| {
                modifier
                    .filter_by
                    .iter()
                    .all(|(key, value)| doc.get(key) == Some(value))
            })
            .cloned()
            .map(Value::Object)
            .collect();

        let total = matching.len() as u64;
        let take = if modifier.top == 0 {
            usize::MAX
        } else {
            usize::try_from(modifier.top).unwrap_or(usize::MAX)
        };
        let data: Vec<Value> = matching
            .into_iter()
            .skip(usize::try_from(modifier.skip).unwrap_or(usize::MAX))
            .take(take)
            .collect();

        Ok(QueryResults {
            count: data.len() as u64,
            data,
            total_count: Some(total),
        })
    }

    fn add(&self, schema: &str, doc: Value) -> Result<String, Error> {
        let mut doc = as_object(doc)?;
        let id = format!("id{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        doc.insert("_id".to_string(), Value::String(id.clone()));

        lock(&self.docs)?
            .entry(schema.to_string())
            .or_default()
            .insert(id.clone(), doc);

        Ok(id)
    }

    fn update(&self, schema: &str, doc: Value) -> Result<String, Error> {
        let doc = as_object(doc)?;
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .ok_or(ResolveError::InvalidArgument {
                argument: "doc._id",
                expected: "a string",
            })?
            .to_string();

        let mut docs = lock(&self.docs)?;
        let existing = docs
            .get_mut(schema)
            .and_then(|m| m.get_mut(&id))
            .ok_or_else(|| ResolveError::NotFound {
                schema: schema.to_string(),
                id: id.clone(),
            })?;
        existing.extend(doc);

        Ok(id)
    }

    fn delete(&self, schema: &str, id: &str) -> Result<String, Error> {
        lock(&self.docs)?
            .get_mut(schema)
            .and_then(|m| m.remove(id))
            .map(|_| id.to_string())
            .ok_or_else(|| {
                ResolveError::NotFound {
                    schema: schema.to_string(),
                    id: id.to_string(),
                }
                .into()
            })
    }
}
