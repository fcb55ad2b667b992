//! Compiles a frozen schema repository into its derived artifacts: GraphQL SDL,
//! resolver maps, client requests and populate plans. Everything here is a pure
//! function of the metamodel; nothing is cached.

pub mod config;
pub mod error;
pub mod graphql;
pub mod populate;
pub mod query;
pub mod resolve;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Domain vocabulary only; errors and helpers stay in their modules.
///

pub mod prelude {
    pub use crate::{
        config::GeneratorConfig,
        graphql::{
            GraphqlRequest,
            resolver::{CrudOperation, CrudResolver, ResolverMap},
        },
        populate::PathDescriptor,
        query::{QueryModifier, QueryResults},
        resolve::{Persistence, SchemaResolver},
    };
}
