//! PowerDesigner PDM parser.
//!
//! A PDM file nests objects (`o:`) inside collections (`c:`) and stores scalar
//! values as attribute elements (`a:`). Keys and indexes point at columns with
//! `Ref` attributes, so columns are parsed first and the references are resolved
//! against them afterwards.

use crate::dialect::Dialect;
use crate::model::{Column, ColumnRef, DataType, Index, Key, Schema, Sequence, Table};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fmt;

const NAMESPACES: &[(&str, &str)] = &[("a", "attribute"), ("c", "collection"), ("o", "object")];

const MODEL: &str = "o:RootObject/c:Children/o:Model";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Unsupported database type: {0}")]
    UnsupportedDialect(String),
    #[error("Unknown column in {owner}: table={table}, {owner}={owner_id}, ref={reference}")]
    UnresolvedReference {
        table: String,
        owner: RefOwner,
        owner_id: String,
        reference: String,
    },
    #[error("Malformed document: table={table}: {reason}")]
    MalformedDocument { table: String, reason: String },
}

/// The kind of object holding a column reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefOwner {
    Key,
    Index,
}

impl fmt::Display for RefOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Index => f.write_str("index"),
        }
    }
}

/// Non-fatal findings, reported for callers that want stricter checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    EmptyKeyDropped { table: String, key: String },
    EmptyIndexDropped { table: String, index: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKeyDropped { table, key } => {
                write!(f, "key {} of table {} has no columns and was dropped", key, table)
            }
            Self::EmptyIndexDropped { table, index } => {
                write!(f, "index {} of table {} has no columns and was dropped", index, table)
            }
        }
    }
}

/// Parse a PDM document into a schema.
pub fn parse_document(input: &str) -> Result<Schema, ParseError> {
    Parser::new(input)?.parse()
}

pub struct Parser<'input> {
    doc: Document<'input>,
}

impl<'input> Parser<'input> {
    pub fn new(input: &'input str) -> Result<Self, ParseError> {
        let doc = Document::parse(input)?;
        Ok(Self { doc })
    }

    pub fn parse(&self) -> Result<Schema, ParseError> {
        self.parse_with_diagnostics().map(|(schema, _)| schema)
    }

    /// Parse, also returning the constructs that were silently dropped.
    pub fn parse_with_diagnostics(&self) -> Result<(Schema, Vec<Diagnostic>), ParseError> {
        let root = self.doc.root_element();
        let mut diagnostics = Vec::new();

        let db = self.detect_database_type()?;
        let sequences = parse_sequences(root);

        let mut tables = Vec::new();
        for node in find_nodes(root, &format!("{MODEL}/c:Tables/o:Table")) {
            tables.push(TableParser::new(node)?.parse(&mut diagnostics)?);
        }
        tables.sort_by(|a, b| a.code.cmp(&b.code));

        tracing::debug!(
            db = %db,
            tables = tables.len(),
            sequences = sequences.len(),
            dropped = diagnostics.len(),
            "parsed physical data model"
        );

        Ok((
            Schema {
                db,
                tables,
                sequences,
            },
            diagnostics,
        ))
    }

    fn detect_database_type(&self) -> Result<Dialect, ParseError> {
        let name = find_text(
            self.doc.root_element(),
            &format!("{MODEL}/c:TargetModels/o:TargetModel/a:Name"),
            true,
        );
        Dialect::detect(&name)
            .filter(|d| d.is_sql())
            .ok_or(ParseError::UnsupportedDialect(name))
    }
}

fn parse_sequences(root: Node) -> Vec<Sequence> {
    let mut sequences: Vec<Sequence> = find_nodes(root, &format!("{MODEL}/c:Sequences/o:Sequence"))
        .into_iter()
        .map(|node| Sequence {
            code: find_text(node, "a:Code", true),
        })
        .collect();
    sequences.sort_by(|a, b| a.code.cmp(&b.code));
    sequences
}

struct TableParser<'a, 'input> {
    node: Node<'a, 'input>,
    id: String,
    name: String,
    code: String,
    comment: String,
}

impl<'a, 'input> TableParser<'a, 'input> {
    fn new(node: Node<'a, 'input>) -> Result<Self, ParseError> {
        let code = find_text(node, "a:Code", true);
        let id = node
            .attribute("Id")
            .map(str::to_string)
            .ok_or_else(|| ParseError::MalformedDocument {
                table: code.clone(),
                reason: "table has no Id attribute".to_string(),
            })?;
        let name = suppress_name(find_text(node, "a:Name", false), &code);
        let comment = find_text(node, "a:Comment", false);

        Ok(Self {
            node,
            id,
            name,
            code,
            comment,
        })
    }

    fn parse(self, diagnostics: &mut Vec<Diagnostic>) -> Result<Table, ParseError> {
        let columns = self.parse_columns()?;
        let lookup = self.column_lookup(&columns)?;
        let mut keys = self.parse_keys(&columns, &lookup, diagnostics)?;
        let primary_key = self.parse_primary_key(&mut keys)?;
        let indexes = self.parse_indexes(&columns, &lookup, diagnostics)?;

        Ok(Table {
            id: self.id,
            name: self.name,
            code: self.code,
            comment: self.comment,
            columns,
            keys,
            primary_key,
            indexes,
        })
    }

    fn malformed(&self, reason: impl Into<String>) -> ParseError {
        ParseError::MalformedDocument {
            table: self.code.clone(),
            reason: reason.into(),
        }
    }

    fn object_id(&self, node: Node, kind: &str) -> Result<String, ParseError> {
        node.attribute("Id")
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("{kind} has no Id attribute")))
    }

    fn parse_columns(&self) -> Result<Vec<Column>, ParseError> {
        let mut columns = Vec::new();

        for node in find_nodes(self.node, "c:Columns/o:Column") {
            let id = self.object_id(node, "column")?;
            let code = find_text(node, "a:Code", true);
            let name = suppress_name(find_text(node, "a:Name", false), &code);
            let data_type = DataType::from_document(
                &find_text(node, "a:DataType", true),
                &find_text(node, "a:Length", true),
                &find_text(node, "a:Precision", true),
            );

            columns.push(Column {
                id,
                name,
                code,
                required: find_text(node, "a:Column.Mandatory", true) == "1",
                comment: find_text(node, "a:Comment", false),
                data_type,
            });
        }

        Ok(columns)
    }

    fn column_lookup<'c>(&self, columns: &'c [Column]) -> Result<HashMap<&'c str, ColumnRef>, ParseError> {
        let mut lookup = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if lookup.insert(column.id.as_str(), ColumnRef(i)).is_some() {
                return Err(self.malformed(format!("duplicate column id {}", column.id)));
            }
        }
        Ok(lookup)
    }

    /// Resolve every `Ref` under `path`, failing on the first dangling one.
    fn resolve_columns(
        &self,
        node: Node,
        path: &str,
        lookup: &HashMap<&str, ColumnRef>,
        owner: RefOwner,
        owner_id: &str,
    ) -> Result<Vec<ColumnRef>, ParseError> {
        find_nodes(node, path)
            .into_iter()
            .map(|column_node| {
                let reference = column_node.attribute("Ref").unwrap_or_default();
                lookup
                    .get(reference)
                    .copied()
                    .ok_or_else(|| ParseError::UnresolvedReference {
                        table: self.code.clone(),
                        owner,
                        owner_id: owner_id.to_string(),
                        reference: reference.to_string(),
                    })
            })
            .collect()
    }

    fn synthesize_code(&self, prefix: &str, columns: &[Column], refs: &[ColumnRef]) -> String {
        let joined: Vec<&str> = refs
            .iter()
            .filter_map(|r| columns.get(r.0))
            .map(|c| c.code.as_str())
            .collect();
        format!("{}{}{}", prefix, joined.join("_"), self.code)
    }

    fn parse_keys(
        &self,
        columns: &[Column],
        lookup: &HashMap<&str, ColumnRef>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<Key>, ParseError> {
        let mut keys = Vec::new();

        for node in find_nodes(self.node, "c:Keys/o:Key") {
            let id = self.object_id(node, "key")?;
            let key_columns =
                self.resolve_columns(node, "c:Key.Columns/o:Column", lookup, RefOwner::Key, &id)?;

            if key_columns.is_empty() {
                tracing::debug!(table = %self.code, key = %id, "dropping key without columns");
                diagnostics.push(Diagnostic::EmptyKeyDropped {
                    table: self.code.clone(),
                    key: id,
                });
                continue;
            }

            let mut code = find_text(node, "a:ConstraintName", true);
            if code.is_empty() {
                code = self.synthesize_code("uk_", columns, &key_columns);
            }

            keys.push(Key {
                id,
                code,
                name: find_text(node, "a:Name", false),
                columns: key_columns,
            });
        }

        Ok(keys)
    }

    fn parse_primary_key(&self, keys: &mut Vec<Key>) -> Result<Option<Key>, ParseError> {
        if keys.is_empty() {
            return Ok(None);
        }

        let nodes = find_nodes(self.node, "c:PrimaryKey/o:Key");
        let [node] = nodes.as_slice() else {
            return Err(self.malformed(format!(
                "expected exactly one primary key reference, found {}",
                nodes.len()
            )));
        };

        let reference = node.attribute("Ref").unwrap_or_default();
        let position = keys
            .iter()
            .position(|k| k.id == reference)
            .ok_or_else(|| self.malformed(format!("unknown primary key: ref={}", reference)))?;

        let mut primary_key = keys.remove(position);
        primary_key.code = format!("pk_{}", self.code);

        Ok(Some(primary_key))
    }

    fn parse_indexes(
        &self,
        columns: &[Column],
        lookup: &HashMap<&str, ColumnRef>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<Index>, ParseError> {
        let mut indexes = Vec::new();

        for node in find_nodes(self.node, "c:Indexes/o:Index") {
            // Storage of a key, already emitted as a constraint
            if !find_nodes(node, "c:LinkedObject/o:Key").is_empty() {
                continue;
            }

            let id = self.object_id(node, "index")?;
            let unique = find_text(node, "a:Unique", true) == "1";
            let index_columns = self.resolve_columns(
                node,
                "c:IndexColumns/o:IndexColumn/c:Column/o:Column",
                lookup,
                RefOwner::Index,
                &id,
            )?;

            if index_columns.is_empty() {
                tracing::debug!(table = %self.code, index = %id, "dropping index without columns");
                diagnostics.push(Diagnostic::EmptyIndexDropped {
                    table: self.code.clone(),
                    index: id,
                });
                continue;
            }

            let mut code = find_text(node, "a:Code", true);
            if code.is_empty() {
                let prefix = if unique { "uk_" } else { "idx_" };
                code = self.synthesize_code(prefix, columns, &index_columns);
            }

            indexes.push(Index {
                id,
                code,
                name: find_text(node, "a:Name", false),
                unique,
                columns: index_columns,
            });
        }

        Ok(indexes)
    }
}

/// A name that only repeats the code carries no information.
fn suppress_name(name: String, code: &str) -> String {
    if name.eq_ignore_ascii_case(code) {
        String::new()
    } else {
        name
    }
}

fn namespace_uri(prefix: &str) -> &str {
    NAMESPACES
        .iter()
        .find(|(alias, _)| *alias == prefix)
        .map(|(_, uri)| *uri)
        .unwrap_or(prefix)
}

/// All elements reached by following `path` (`prefix:Name` steps) from `node`.
fn find_nodes<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];

    for step in path.split('/') {
        let (uri, name) = match step.split_once(':') {
            Some((prefix, name)) => (Some(namespace_uri(prefix)), name),
            None => (None, step),
        };

        current = current
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|c| c.is_element() && c.tag_name().name() == name && c.tag_name().namespace() == uri)
            .collect();
    }

    current
}

/// Trimmed text of the first element at `path`, empty if absent.
fn find_text(node: Node, path: &str, lowercase: bool) -> String {
    let text = find_nodes(node, path)
        .first()
        .and_then(|n| n.text())
        .unwrap_or_default()
        .trim();

    if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}
