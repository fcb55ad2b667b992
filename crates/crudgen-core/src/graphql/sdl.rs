use crate::{
    config::{GeneratorConfig, SdlConfig},
    graphql::{
        GraphqlError,
        resolver::CrudOperation,
        types::{TypeContext, embedded_type_name, graphql_type, includes},
    },
};
use crudgen_schema::{build::SchemaRepository, node::SchemaDefinition};
use std::collections::BTreeSet;

/// Fields of the fixed `QueryModifier` input, in declaration order.
const QUERY_MODIFIER_FIELDS: &[(&str, &str)] = &[
    ("top", "Int"),
    ("skip", "Int"),
    ("sortBy", "String"),
    ("filterBy", "String"),
    ("populate", "Boolean"),
];

/// Full SDL document for `repository`, using the default layout.
pub fn get_schema(repository: &SchemaRepository) -> Result<String, GraphqlError> {
    get_schema_with(repository, &GeneratorConfig::default())
}

/// Full SDL document for `repository`.
///
/// Layout: the `QueryModifier` input, then per entity schema its embedded
/// type/input pairs (innermost first), its type, its input and its
/// `QueryResults` type; then the query and mutation root types and the
/// `schema` block.
///
/// A type or input that would render without fields (for example a schema
/// whose fields are all audit or internal) fails with `EmptyType`.
pub fn get_schema_with(
    repository: &SchemaRepository,
    config: &GeneratorConfig,
) -> Result<String, GraphqlError> {
    let mut writer = SdlWriter::new(&config.sdl);

    writer.block(
        "input",
        "QueryModifier",
        None,
        QUERY_MODIFIER_FIELDS
            .iter()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect(),
    );

    for schema in repository.entity_schemas() {
        writer.entity(schema)?;
    }

    let mut queries = Vec::new();
    let mut mutations = Vec::new();
    for schema in repository.entity_schemas() {
        let name = schema.name();
        let results = format!("{name}QueryResults");

        queries.push(format!(
            "{}(id: String!): {results}",
            CrudOperation::GetOne.operation_name(schema)
        ));
        queries.push(format!(
            "{}(q: QueryModifier): {results}",
            CrudOperation::GetMany.operation_name(schema)
        ));
        for op in [CrudOperation::Insert, CrudOperation::Update] {
            mutations.push(format!("{}(doc: {name}Input): ID!", op.operation_name(schema)));
        }
        mutations.push(format!(
            "{}(id: String!): ID!",
            CrudOperation::Delete.operation_name(schema)
        ));
    }

    let sdl = &config.sdl;
    writer.block("type", &sdl.query_type, None, queries);
    writer.block("type", &sdl.mutation_type, None, mutations);
    writer.block(
        "schema",
        "",
        None,
        vec![
            format!("query: {}", sdl.query_type),
            format!("mutation: {}", sdl.mutation_type),
        ],
    );

    let out = writer.finish();
    tracing::debug!(
        schemas = repository.entity_schemas().count(),
        bytes = out.len(),
        "sdl generated"
    );

    Ok(out)
}

///
/// SdlWriter
///
/// Accumulates SDL blocks. Embedded shapes are tracked by type name so a
/// shape reachable from several places is declared once; repository
/// validation guarantees one name never stands for two shapes.
///

struct SdlWriter<'a> {
    config: &'a SdlConfig,
    blocks: Vec<String>,
    embedded: BTreeSet<String>,
}

impl<'a> SdlWriter<'a> {
    const fn new(config: &'a SdlConfig) -> Self {
        Self {
            config,
            blocks: Vec::new(),
            embedded: BTreeSet::new(),
        }
    }

    fn entity(&mut self, schema: &SchemaDefinition) -> Result<(), GraphqlError> {
        self.embedded_shapes(schema)?;

        let name = schema.name();
        self.fields_block(name, schema.description(), schema, TypeContext::Output)?;
        self.fields_block(&format!("{name}Input"), None, schema, TypeContext::Input)?;
        self.block(
            "type",
            &format!("{name}QueryResults"),
            None,
            vec![
                format!("data: [{name}!]!"),
                "count: Int!".to_string(),
                "totalCount: Int".to_string(),
            ],
        );

        Ok(())
    }

    // post-order: a shape's own embedded shapes are declared before it
    fn embedded_shapes(&mut self, schema: &SchemaDefinition) -> Result<(), GraphqlError> {
        for field in schema.fields() {
            if !field.is_embedded() || !includes(field, TypeContext::Output) {
                continue;
            }
            let Some(target) = field.target() else {
                continue;
            };

            let name = embedded_type_name(field, TypeContext::Output)?;
            if self.embedded.contains(&name) {
                continue;
            }

            self.embedded_shapes(target)?;

            let description = field.get_description().or_else(|| target.description());
            self.fields_block(&name, description, target, TypeContext::Output)?;
            self.fields_block(
                &embedded_type_name(field, TypeContext::Input)?,
                None,
                target,
                TypeContext::Input,
            )?;
            self.embedded.insert(name);
        }

        Ok(())
    }

    // type or input rendered from a schema's fields
    fn fields_block(
        &mut self,
        name: &str,
        description: Option<&str>,
        schema: &SchemaDefinition,
        ctx: TypeContext,
    ) -> Result<(), GraphqlError> {
        let lines = field_lines(schema, ctx)?;
        if lines.is_empty() {
            return Err(GraphqlError::EmptyType {
                name: name.to_string(),
            });
        }

        let keyword = match ctx {
            TypeContext::Output => "type",
            TypeContext::Input => "input",
        };
        self.block(keyword, name, description, lines);

        Ok(())
    }

    fn block(&mut self, keyword: &str, name: &str, description: Option<&str>, lines: Vec<String>) {
        let mut out = String::new();

        if self.config.descriptions
            && let Some(description) = description
        {
            out.push_str(&format!("\"\"\"{description}\"\"\"\n"));
        }

        if name.is_empty() {
            out.push_str(&format!("{keyword} {{\n"));
        } else {
            out.push_str(&format!("{keyword} {name} {{\n"));
        }
        for line in lines {
            out.push_str(&self.config.indent);
            out.push_str(&line);
            out.push('\n');
        }
        out.push('}');

        self.blocks.push(out);
    }

    fn finish(self) -> String {
        let mut out = self.blocks.join("\n\n");
        out.push('\n');

        out
    }
}

fn field_lines(schema: &SchemaDefinition, ctx: TypeContext) -> Result<Vec<String>, GraphqlError> {
    schema
        .fields()
        .filter(|field| includes(field, ctx))
        .map(|field| Ok(format!("{}: {}", field.name(), graphql_type(field, ctx)?)))
        .collect()
}
