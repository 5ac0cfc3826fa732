//! Render tables as DDL or entity classes.

mod ddl;
mod entity;

pub use entity::{camel_case, pascal_case};

use crate::dialect::Dialect;
use crate::model::{Column, Table};
use crate::parser::{parse_document, ParseError};
use crate::typemap::{Outcome, TypeMapping};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Table not found: {0}")]
    UnknownTable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Spaces before each member line.
    pub indent: usize,
    /// Annotate entities with Lombok's `@Data`.
    pub lombok: bool,
    /// Make entities `Serializable`.
    pub serializable: bool,
    /// Mark the field of a single-column primary key with `@Id`.
    pub annotate_id: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            lombok: true,
            serializable: true,
            annotate_id: true,
        }
    }
}

pub struct Generator {
    mapping: TypeMapping,
    config: GeneratorConfig,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_mapping(TypeMapping::new(), config)
    }

    pub fn with_mapping(mapping: TypeMapping, config: GeneratorConfig) -> Self {
        Self { mapping, config }
    }

    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render `table`, whose types are written in `source`, for `target`.
    pub fn generate(&self, table: &Table, source: Dialect, target: Dialect) -> String {
        match target {
            Dialect::MySql => ddl::mysql(self, table, source),
            Dialect::Oracle => ddl::oracle(self, table, source),
            Dialect::Java => entity::java(self, table, source),
        }
    }

    fn indent(&self) -> String {
        " ".repeat(self.config.indent)
    }

    fn column_type(&self, table: &Table, column: &Column, source: Dialect, target: Dialect) -> String {
        let data_type = column.data_type.to_string();
        let conversion = self.mapping.convert_checked(source, target, &data_type);

        if conversion.outcome == Outcome::Passthrough {
            tracing::warn!(
                table = %table.code,
                column = %column.code,
                data_type = %data_type,
                source = %source,
                target = %target,
                "type has no mapping, emitting it unchanged"
            );
        }

        conversion.text
    }
}

/// Parse `document` and render the table with the given code.
pub fn render_table(
    document: &str,
    table_code: &str,
    target: Dialect,
    config: GeneratorConfig,
) -> Result<String, GenerateError> {
    let schema = parse_document(document)?;
    let table = schema
        .find_table(table_code)
        .ok_or_else(|| GenerateError::UnknownTable(table_code.to_string()))?;

    Ok(Generator::new(config).generate(table, schema.db, target))
}

/// Join quoted column codes: `"a", "b"`.
fn quote_columns<'a>(columns: impl Iterator<Item = &'a Column>, quote: char) -> String {
    columns
        .map(|c| format!("{quote}{}{quote}", c.code))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-quoted SQL string literal.
fn sql_string(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
