use crate::prelude::*;
use crudgen::Error;
use serde_json::{Value, json};
use std::sync::Mutex;

///
/// PlanStore
/// Remembers the populate plans it is handed and stores nothing.
///

#[derive(Default)]
struct PlanStore {
    plans: Mutex<Vec<(String, Vec<PathDescriptor>)>>,
}

impl Persistence for PlanStore {
    fn find(
        &self,
        schema: &str,
        _modifier: &QueryModifier,
        populate: &[PathDescriptor],
    ) -> Result<QueryResults, Error> {
        self.plans
            .lock()
            .unwrap()
            .push((schema.to_string(), populate.to_vec()));

        Ok(QueryResults::default())
    }

    fn add(&self, _schema: &str, _doc: Value) -> Result<String, Error> {
        Ok("new".to_string())
    }

    fn update(&self, _schema: &str, _doc: Value) -> Result<String, Error> {
        Ok("updated".to_string())
    }

    fn delete(&self, _schema: &str, id: &str) -> Result<String, Error> {
        Ok(id.to_string())
    }
}

fn args(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("args must be an object"),
    }
}

#[test]
fn every_entity_gets_five_operations() {
    let fx = super::fixtures();
    let repository = Arc::new(fx.repository);
    let resolver = Arc::new(SchemaResolver::new(
        Arc::clone(&repository),
        PlanStore::default(),
    ));

    let map = get_resolver(&repository, resolver);

    assert_eq!(map.len(), 15);
    assert!(map.get("Workflow", CrudOperation::GetMany).is_some());
    assert!(map.get("Step", CrudOperation::GetMany).is_none());
}

#[test]
fn lookups_carry_the_populate_plan() {
    let fx = super::fixtures();
    let repository = Arc::new(fx.repository);
    let resolver = Arc::new(SchemaResolver::new(
        Arc::clone(&repository),
        PlanStore::default(),
    ));
    let map = get_resolver(&repository, resolver.clone());

    map.resolve("getWorkflow", &args(json!({ "id": "w1" })))
        .unwrap();
    map.resolve("findWorkflows", &args(json!({ "q": { "populate": false } })))
        .unwrap();
    let deleted = map
        .resolve("deleteRefOne", &args(json!({ "id": "r1" })))
        .unwrap();

    assert_eq!(deleted, json!("r1"));
    let plans = resolver.store().plans.lock().unwrap().clone();
    assert_eq!(
        plans,
        vec![
            (
                "Workflow".to_string(),
                vec![
                    PathDescriptor::new("category"),
                    PathDescriptor::new("steps.assignee"),
                ]
            ),
            ("Workflow".to_string(), Vec::new()),
        ]
    );
}
