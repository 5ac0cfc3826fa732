//! CREATE TABLE statements for MySQL and Oracle.

use super::{quote_columns, sql_string, Generator};
use crate::dialect::Dialect;
use crate::model::Table;

/// MySQL declares keys and indexes inside the table body and keeps comments inline.
pub(super) fn mysql(generator: &Generator, table: &Table, source: Dialect) -> String {
    let indent = generator.indent();
    let mut lines: Vec<String> = Vec::new();

    for column in &table.columns {
        let mut line = format!(
            "{}`{}` {}",
            indent,
            column.code,
            generator.column_type(table, column, source, Dialect::MySql)
        );
        if column.required {
            line.push_str(" NOT NULL");
        }
        if !column.label().is_empty() {
            line.push_str(&format!(" COMMENT {}", sql_string(column.label())));
        }
        lines.push(line);
    }

    if let Some(pk) = &table.primary_key {
        lines.push(format!(
            "{}PRIMARY KEY ({})",
            indent,
            quote_columns(table.columns_of(&pk.columns), '`')
        ));
    }

    for key in &table.keys {
        lines.push(format!(
            "{}UNIQUE KEY `{}`({})",
            indent,
            key.code,
            quote_columns(table.columns_of(&key.columns), '`')
        ));
    }

    for index in &table.indexes {
        lines.push(format!(
            "{}{}KEY `{}`({})",
            indent,
            if index.unique { "UNIQUE " } else { "" },
            index.code,
            quote_columns(table.columns_of(&index.columns), '`')
        ));
    }

    let mut output = format!("CREATE TABLE `{}` (", table.code);
    push_body(&mut output, &lines);
    output.push_str("\n)");
    if !table.label().is_empty() {
        output.push_str(&format!(" COMMENT {}", sql_string(table.label())));
    }
    output.push(';');

    output
}

/// Oracle takes comments and indexes as separate statements after the table.
pub(super) fn oracle(generator: &Generator, table: &Table, source: Dialect) -> String {
    let indent = generator.indent();
    let mut lines: Vec<String> = Vec::new();

    for column in &table.columns {
        let mut line = format!(
            "{}\"{}\" {}",
            indent,
            column.code,
            generator.column_type(table, column, source, Dialect::Oracle)
        );
        if column.required {
            line.push_str(" NOT NULL");
        }
        lines.push(line);
    }

    if let Some(pk) = &table.primary_key {
        lines.push(format!(
            "{}CONSTRAINT \"{}\" PRIMARY KEY ({})",
            indent,
            pk.code,
            quote_columns(table.columns_of(&pk.columns), '"')
        ));
    }

    for key in &table.keys {
        lines.push(format!(
            "{}CONSTRAINT \"{}\" UNIQUE ({})",
            indent,
            key.code,
            quote_columns(table.columns_of(&key.columns), '"')
        ));
    }

    let mut output = format!("CREATE TABLE \"{}\" (", table.code);
    push_body(&mut output, &lines);
    output.push_str("\n);\n\n");

    if !table.label().is_empty() {
        output.push_str(&format!(
            "COMMENT ON TABLE \"{}\" IS {};\n",
            table.code,
            sql_string(table.label())
        ));
    }
    for column in table.columns.iter().filter(|c| !c.label().is_empty()) {
        output.push_str(&format!(
            "COMMENT ON COLUMN \"{}\".\"{}\" IS {};\n",
            table.code,
            column.code,
            sql_string(column.label())
        ));
    }

    for index in &table.indexes {
        output.push_str(&format!(
            "CREATE {}INDEX \"{}\" ON \"{}\"({});\n",
            if index.unique { "UNIQUE " } else { "" },
            index.code,
            table.code,
            quote_columns(table.columns_of(&index.columns), '"')
        ));
    }

    output.truncate(output.trim_end().len());
    output
}

/// Member lines of a table body, one per line. Nothing for an empty table.
fn push_body(output: &mut String, lines: &[String]) {
    if !lines.is_empty() {
        output.push('\n');
        output.push_str(&lines.join(",\n"));
    }
}
