//! Shared schema fixtures and end-to-end tests across the metamodel and the
//! artifacts compiled from it.

pub mod schema;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use crate::schema::Fixtures;
    pub use crudgen::prelude::*;
}
