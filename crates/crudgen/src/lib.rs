//! ## Crate layout
//! - `schema`: the entity/field metamodel, its builder, repository and
//!   validation.
//! - `core`: everything compiled from the metamodel: GraphQL SDL, resolver
//!   maps, client requests, populate plans and the query modifier.
//!
//! The `prelude` module covers what an application needs to declare schemas
//! and wire them to a GraphQL server.

pub use crudgen_core as core;
pub use crudgen_schema as schema;

/// re-exports
///
/// lets callers build argument maps and documents without naming the
/// serialization crates in their own Cargo.toml
pub mod __reexports {
    pub use serde;
    pub use serde_json;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{Error, ErrorClass};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            graphql::{
                build_delete_mutation, build_find_query, build_get_by_id_query,
                build_insert_mutation, build_update_mutation, get_field_list_for_query,
                get_resolver, get_schema, get_schema_with,
            },
            populate::{build_populate_plan, populate_plan_for},
            prelude::*,
        },
        schema::prelude::*,
    };
    pub use serde::Deserialize;
}
