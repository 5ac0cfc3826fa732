//! Schema model reconstructed from a physical data model document.

use crate::dialect::Dialect;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const NUMERIC_TYPES: &[&str] = &[
    "number", "numeric", "float", "double", "integer", "int", "real", "decimal",
];
const STRING_TYPES: &[&str] = &["char", "text", "clob"];

/// `name(n)` or `name(n,m)`, optionally with a length semantic such as `(20 byte)`.
static PARAMETERIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z0-9_ ]*?)\s*\(\s*(\d+)(?:\s*,\s*(\d+))?(?:\s+(?:byte|char))?\s*\)$")
        .expect("parameterized type pattern is valid")
});

/// Whether the type name contains one of the numeric keywords.
pub fn is_numeric(data_type: &str) -> bool {
    let lower = data_type.to_lowercase();
    NUMERIC_TYPES.iter().any(|keyword| lower.contains(keyword))
}

/// Whether the type name contains one of the string keywords.
pub fn is_string(data_type: &str) -> bool {
    let lower = data_type.to_lowercase();
    STRING_TYPES.iter().any(|keyword| lower.contains(keyword))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DataType {
    pub name: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    pub fn is_numeric(&self) -> bool {
        is_numeric(&self.name)
    }

    pub fn is_string(&self) -> bool {
        is_string(&self.name)
    }

    /// Build a type from the authored `DataType`, `Length` and `Precision` values.
    ///
    /// Simple `name(n[,m])` forms of numeric and string types are decomposed so the
    /// canonical text can be rebuilt from parts. Anything else keeps the authored
    /// text as its name, so `timestamp(6) with time zone` survives unchanged.
    pub fn from_document(data_type: &str, length: &str, precision: &str) -> Self {
        let text = data_type.trim().to_lowercase();

        if text.contains('(') {
            if let Some(caps) = PARAMETERIZED.captures(&text) {
                let name = caps[1].trim_end();
                let first = caps[2].parse::<u32>().ok();
                let second = caps.get(3).map(|m| m.as_str().parse::<u32>().ok());

                // Out of range digits stay in the text
                if first.is_none() || second == Some(None) {
                    return Self::new(text);
                }

                if is_numeric(name) {
                    return Self {
                        name: name.to_string(),
                        length: None,
                        precision: first,
                        scale: second.flatten(),
                    };
                }
                if is_string(name) {
                    return Self {
                        name: name.to_string(),
                        length: first,
                        precision: None,
                        scale: None,
                    };
                }
            }
            return Self::new(text);
        }

        let (length_text, precision_text) = (length.trim(), precision.trim());
        let length = length_text.parse::<u32>().ok();
        let precision = precision_text.parse::<u32>().ok();
        let out_of_range = (!length_text.is_empty() && length.is_none())
            || (!precision_text.is_empty() && precision.is_none());

        if is_numeric(&text) {
            if out_of_range && !length_text.is_empty() {
                return match precision_text {
                    "" => Self::new(format!("{text}({length_text})")),
                    scale => Self::new(format!("{text}({length_text},{scale})")),
                };
            }
            Self {
                name: text,
                length: None,
                precision: length,
                scale: if length.is_some() { precision } else { None },
            }
        } else if is_string(&text) {
            if out_of_range && !length_text.is_empty() {
                return Self::new(format!("{text}({length_text})"));
            }
            Self {
                name: text,
                length,
                precision: None,
                scale: None,
            }
        } else {
            Self::new(text)
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_numeric() {
            match (self.precision, self.scale) {
                (Some(p), Some(s)) => write!(f, "{}({},{})", self.name, p, s),
                (Some(p), None) => write!(f, "{}({})", self.name, p),
                _ => f.write_str(&self.name),
            }
        } else if let (true, Some(length)) = (self.is_string(), self.length) {
            write!(f, "{}({})", self.name, length)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Document-scoped id, only used to resolve references.
    pub id: String,
    /// Empty when the authored name just repeats the code.
    pub name: String,
    pub code: String,
    pub required: bool,
    pub comment: String,
    pub data_type: DataType,
}

impl Column {
    /// Human readable description: the display name, else the free-text comment.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.comment
        } else {
            &self.name
        }
    }
}

/// Position of a column within its table's column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnRef(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub id: String,
    pub code: String,
    pub name: String,
    pub columns: Vec<ColumnRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Index {
    pub id: String,
    pub code: String,
    pub name: String,
    pub unique: bool,
    pub columns: Vec<ColumnRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub code: String,
    pub comment: String,
    pub columns: Vec<Column>,
    /// Unique keys; the primary key is never listed here.
    pub keys: Vec<Key>,
    pub primary_key: Option<Key>,
    /// Indexes that do not merely implement a key.
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn column(&self, column: ColumnRef) -> Option<&Column> {
        self.columns.get(column.0)
    }

    /// Resolve key or index references, in reference order.
    pub fn columns_of<'a>(&'a self, refs: &'a [ColumnRef]) -> impl Iterator<Item = &'a Column> + 'a {
        refs.iter().filter_map(|r| self.column(*r))
    }

    /// The column backing the primary key, if the key has exactly one column.
    pub fn primary_key_column(&self) -> Option<&Column> {
        match self.primary_key.as_ref().map(|k| k.columns.as_slice()) {
            Some([only]) => self.column(*only),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.comment
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    pub db: Dialect,
    /// Sorted by code.
    pub tables: Vec<Table>,
    /// Sorted by code.
    pub sequences: Vec<Sequence>,
}

impl Schema {
    /// Case-insensitive lookup by table code.
    pub fn find_table(&self, code: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(code: &str, data_type: DataType) -> Column {
        Column {
            id: format!("c_{code}"),
            name: String::new(),
            code: code.to_string(),
            required: false,
            comment: String::new(),
            data_type,
        }
    }

    #[test]
    fn test_classification() {
        assert!(is_numeric("NUMBER"));
        assert!(is_numeric("bigint"));
        assert!(is_numeric("double precision"));
        assert!(is_string("varchar2"));
        assert!(is_string("NCLOB"));
        assert!(is_string("mediumtext"));
        assert!(!is_numeric("date"));
        assert!(!is_string("blob"));
    }

    #[test]
    fn test_render_numeric() {
        assert_eq!(DataType::new("number").with_precision(10, Some(2)).to_string(), "number(10,2)");
        assert_eq!(DataType::new("number").with_precision(19, None).to_string(), "number(19)");
        assert_eq!(DataType::new("NUMBER").to_string(), "number");
        // length is ignored for numeric types
        assert_eq!(DataType::new("int").with_length(11).to_string(), "int");
    }

    #[test]
    fn test_render_string() {
        assert_eq!(DataType::new("varchar2").with_length(20).to_string(), "varchar2(20)");
        assert_eq!(DataType::new("clob").to_string(), "clob");
        assert_eq!(DataType::new("date").with_length(7).to_string(), "date");
    }

    #[test]
    fn test_from_document_parameterized() {
        let t = DataType::from_document("NUMBER(12,2)", "12", "2");
        assert_eq!(t, DataType::new("number").with_precision(12, Some(2)));

        let t = DataType::from_document("VARCHAR2(20 BYTE)", "20", "");
        assert_eq!(t, DataType::new("varchar2").with_length(20));
        assert_eq!(t.to_string(), "varchar2(20)");

        let t = DataType::from_document("nchar varying(30)", "", "");
        assert_eq!(t.to_string(), "nchar varying(30)");
    }

    #[test]
    fn test_from_document_keeps_complex_text() {
        let t = DataType::from_document("TIMESTAMP(6) WITH TIME ZONE", "", "");
        assert_eq!(t.to_string(), "timestamp(6) with time zone");

        let t = DataType::from_document("RAW(16)", "16", "");
        assert_eq!(t.to_string(), "raw(16)");

        let t = DataType::from_document("interval day(2) to second(6)", "", "");
        assert_eq!(t.to_string(), "interval day(2) to second(6)");
    }

    #[test]
    fn test_from_document_uses_attributes() {
        let t = DataType::from_document("decimal", "10", "3");
        assert_eq!(t.to_string(), "decimal(10,3)");

        let t = DataType::from_document("varchar", "64", "");
        assert_eq!(t.to_string(), "varchar(64)");

        let t = DataType::from_document("datetime", "", "");
        assert_eq!(t.to_string(), "datetime");
    }

    #[test]
    fn test_from_document_keeps_out_of_range_digits() {
        let t = DataType::from_document("NUMBER(99999999999)", "99999999999", "");
        assert_eq!(t.to_string(), "number(99999999999)");

        let t = DataType::from_document("number(12,99999999999)", "", "");
        assert_eq!(t.to_string(), "number(12,99999999999)");

        let t = DataType::from_document("number", "99999999999", "2");
        assert_eq!(t.to_string(), "number(99999999999,2)");

        let t = DataType::from_document("varchar2", "99999999999", "");
        assert_eq!(t.to_string(), "varchar2(99999999999)");
    }

    #[test]
    fn test_primary_key_column() {
        let mut table = Table {
            id: "t1".to_string(),
            name: String::new(),
            code: "oc_item".to_string(),
            comment: String::new(),
            columns: vec![
                column("id", DataType::new("number").with_precision(19, None)),
                column("sku", DataType::new("varchar2").with_length(32)),
            ],
            keys: vec![],
            primary_key: Some(Key {
                id: "k1".to_string(),
                code: "pk_oc_item".to_string(),
                name: String::new(),
                columns: vec![ColumnRef(0)],
            }),
            indexes: vec![],
        };
        assert_eq!(table.primary_key_column().map(|c| c.code.as_str()), Some("id"));

        if let Some(pk) = table.primary_key.as_mut() {
            pk.columns.push(ColumnRef(1));
        }
        assert!(table.primary_key_column().is_none());

        let codes: Vec<&str> = table
            .columns_of(&[ColumnRef(1), ColumnRef(0)])
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["sku", "id"]);
    }

    #[test]
    fn test_labels() {
        let mut c = column("status", DataType::new("char"));
        assert_eq!(c.label(), "");
        c.comment = "Lifecycle state".to_string();
        assert_eq!(c.label(), "Lifecycle state");
        c.name = "Status".to_string();
        assert_eq!(c.label(), "Status");
    }

    #[test]
    fn test_find_table_ignores_case() {
        let schema = Schema {
            db: Dialect::Oracle,
            tables: vec![Table {
                id: "t1".to_string(),
                name: String::new(),
                code: "oc_order".to_string(),
                comment: String::new(),
                columns: vec![],
                keys: vec![],
                primary_key: None,
                indexes: vec![],
            }],
            sequences: vec![],
        };
        assert!(schema.find_table("OC_ORDER").is_some());
        assert!(schema.find_table("oc_orders").is_none());
    }
}
