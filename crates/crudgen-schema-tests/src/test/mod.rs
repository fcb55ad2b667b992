mod client;
mod resolver;

use crate::prelude::*;

pub(crate) fn fixtures() -> Fixtures {
    Fixtures::build().expect("fixture schemas should build")
}
