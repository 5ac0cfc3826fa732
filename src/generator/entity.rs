//! Java entity classes.

use super::Generator;
use crate::dialect::Dialect;
use crate::model::Table;
use std::collections::BTreeSet;

/// Imports required by mapped field types.
const TYPE_IMPORTS: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("BigInteger", "java.math.BigInteger"),
    ("Blob", "java.sql.Blob"),
    ("Date", "java.util.Date"),
];

const ID_ANNOTATION: &str = "javax.persistence.Id";

/// `oc_order_item` to `OcOrderItem`. Empty segments become `_`.
pub fn pascal_case(word: &str) -> String {
    word.split('_').map(capitalize).collect()
}

/// `oc_order_item` to `ocOrderItem`.
pub fn camel_case(word: &str) -> String {
    let pascal = pascal_case(word);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => "_".to_string(),
    }
}

pub(super) fn java(generator: &Generator, table: &Table, source: Dialect) -> String {
    let config = generator.config();
    let indent = generator.indent();
    let id_column = if config.annotate_id {
        table.primary_key_column()
    } else {
        None
    };

    let mut imports = BTreeSet::new();
    if config.serializable {
        imports.insert("java.io.Serializable");
    }
    if config.lombok {
        imports.insert("lombok.Data");
    }
    if id_column.is_some() {
        imports.insert(ID_ANNOTATION);
    }

    let mut body = String::new();
    if config.serializable {
        body.push_str(&format!(
            "{}private static final long serialVersionUID = 1L;\n\n",
            indent
        ));
    }

    for column in &table.columns {
        let field_type = generator.column_type(table, column, source, Dialect::Java);
        if let Some((_, import)) = TYPE_IMPORTS.iter().find(|(name, _)| *name == field_type) {
            imports.insert(*import);
        }

        if !column.label().is_empty() {
            body.push_str(&format!("{}/** {} */\n", indent, column.label()));
        }
        if id_column.is_some_and(|id| id.id == column.id) {
            body.push_str(&format!("{}@Id\n", indent));
        }
        body.push_str(&format!(
            "{}private {} {};\n",
            indent,
            field_type,
            camel_case(&column.code)
        ));
    }

    let mut output = String::new();
    for import in &imports {
        output.push_str(&format!("import {};\n", import));
    }
    if !imports.is_empty() {
        output.push('\n');
    }

    if !table.label().is_empty() {
        output.push_str(&format!("/** {} */\n", table.label()));
    }
    if config.lombok {
        output.push_str("@Data\n");
    }
    output.push_str(&format!(
        "public class {}{} {{\n",
        pascal_case(&table.code),
        if config.serializable { " implements Serializable" } else { "" }
    ));
    output.push_str(&body);
    output.push('}');

    output
}
