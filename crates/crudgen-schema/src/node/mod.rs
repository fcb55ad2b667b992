mod field;
mod schema;

pub use field::*;
pub use schema::*;

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("duplicate field '{field}' on schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    #[error("field '{field}' references a schema but has no owning schema")]
    MissingSchemaReference { field: String },

    #[error("schema '{schema}' failed validation: {errors}")]
    Validation { schema: String, errors: ErrorTree },
}
