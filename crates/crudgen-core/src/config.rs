//! Generator configuration, read from TOML.
//!
//! ```toml
//! [sdl]
//! query_type = "Queries"
//! mutation_type = "Mutations"
//! indent = "  "
//! descriptions = false
//! ```

use crudgen_schema::{error::ErrorTree, validate::validate_ident};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Invalid(ErrorTree),

    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// GeneratorConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub sdl: SdlConfig,
}

impl GeneratorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sdl.validate().map_err(ConfigError::Invalid)
    }
}

///
/// SdlConfig
///
/// Root type names and layout of the generated SDL document.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SdlConfig {
    pub query_type: String,
    pub mutation_type: String,
    pub indent: String,

    /// Emit schema descriptions as block strings above their types.
    pub descriptions: bool,
}

impl Default for SdlConfig {
    fn default() -> Self {
        Self {
            query_type: "Queries".to_string(),
            mutation_type: "Mutations".to_string(),
            indent: "  ".to_string(),
            descriptions: false,
        }
    }
}

impl SdlConfig {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        for (key, name) in [
            ("query_type", &self.query_type),
            ("mutation_type", &self.mutation_type),
        ] {
            if let Err(msg) = validate_ident(name) {
                errs.add_for(key, msg);
            }
        }
        if self.query_type == self.mutation_type {
            errs.add("query_type and mutation_type must differ");
        }
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            errs.add_for("indent", "indent must be non-empty whitespace");
        }

        errs.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();

        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.sdl.query_type, "Queries");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            [sdl]
            query_type = "Query"
            descriptions = true
            "#,
        )
        .unwrap();

        assert_eq!(config.sdl.query_type, "Query");
        assert_eq!(config.sdl.mutation_type, "Mutations");
        assert!(config.sdl.descriptions);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GeneratorConfig::from_toml_str("[sdl]\nquery = \"Q\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_all_reported() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            [sdl]
            query_type = "Same"
            mutation_type = "Same"
            indent = "--"
            "#,
        )
        .unwrap_err();

        let ConfigError::Invalid(errors) = err else {
            panic!("expected invalid config");
        };
        assert_eq!(errors.len(), 2, "{errors}");
    }
}
