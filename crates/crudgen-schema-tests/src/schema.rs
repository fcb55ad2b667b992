use crudgen::prelude::*;
use crudgen::schema::{Error as SchemaError, node::NodeError};

///
/// Audit fields
/// Server-managed metadata shared by every fixture entity.
///

#[must_use]
pub fn audit_fields() -> Vec<Field> {
    vec![
        Field::scalar("anauditfield", ScalarKind::String)
            .required()
            .audit(),
    ]
}

/// Base entity fields: the identifier plus the audit fields.
pub fn base_entity() -> Result<Arc<SchemaDefinition>, NodeError> {
    SchemaBuilder::entity("BaseEntity")
        .field(Field::id("_id"))?
        .fields(audit_fields())?
        .freeze()
}

pub fn ref_one() -> Result<Arc<SchemaDefinition>, NodeError> {
    SchemaBuilder::entity("RefOne")
        .description("First reference target")
        .fields(audit_fields())?
        .field(
            Field::scalar("refOneName", ScalarKind::String)
                .required()
                .unique(),
        )?
        .freeze()
}

pub fn ref_two(base: &SchemaDefinition) -> Result<Arc<SchemaDefinition>, NodeError> {
    SchemaBuilder::entity("RefTwo")
        .merge(base)?
        .field(Field::scalar("refTwoName", ScalarKind::String).required())?
        .freeze()
}

pub fn step(ref_two: &Arc<SchemaDefinition>) -> Result<Arc<SchemaDefinition>, NodeError> {
    SchemaBuilder::embedded("Step")
        .field(Field::schema("assignee", ref_two))?
        .field(Field::scalar("stepName", ScalarKind::String).required())?
        .freeze()
}

pub fn workflow(
    base: &SchemaDefinition,
    ref_one: &Arc<SchemaDefinition>,
    step: &Arc<SchemaDefinition>,
) -> Result<Arc<SchemaDefinition>, NodeError> {
    SchemaBuilder::entity("Workflow")
        .description("A named sequence of steps")
        .merge(base)?
        .field(Field::schema("category", ref_one))?
        .field(Field::scalar("name", ScalarKind::String).required())?
        .field(
            Field::scalar("notes", ScalarKind::String)
                .internal()
                .encrypted(),
        )?
        .field(Field::schema("steps", step).array())?
        .freeze()
}

///
/// Fixtures
///
/// Every fixture schema, built bottom-up, plus a repository holding them in
/// registration order `RefOne, RefTwo, Step, Workflow`.
///

pub struct Fixtures {
    pub ref_one: Arc<SchemaDefinition>,
    pub ref_two: Arc<SchemaDefinition>,
    pub step: Arc<SchemaDefinition>,
    pub workflow: Arc<SchemaDefinition>,
    pub repository: SchemaRepository,
}

impl Fixtures {
    pub fn build() -> Result<Self, SchemaError> {
        let base = base_entity()?;
        let ref_one = ref_one()?;
        let ref_two = ref_two(&base)?;
        let step = step(&ref_two)?;
        let workflow = workflow(&base, &ref_one, &step)?;

        let repository = SchemaRepository::new([
            Arc::clone(&ref_one),
            Arc::clone(&ref_two),
            Arc::clone(&step),
            Arc::clone(&workflow),
        ])?;

        Ok(Self {
            ref_one,
            ref_two,
            step,
            workflow,
            repository,
        })
    }
}
