//! MySQL to Oracle.

use super::converter::{builtin, PatternConverter};
use super::TypeMapper;
use crate::dialect::Dialect;

const TYPES: &[(&str, &str)] = &[
    ("bigint", "number(19)"),
    ("bit", "raw"),
    ("blob", "blob"),
    ("char", "char"),
    ("date", "date"),
    ("datetime", "date"),
    ("decimal", "number"),
    ("double", "binary_double"),
    ("double precision", "binary_double"),
    ("enum", "varchar2"),
    ("float", "binary_float"),
    ("int", "number(10)"),
    ("integer", "number(10)"),
    ("longblob", "blob"),
    ("longtext", "clob"),
    ("mediumblob", "blob"),
    ("mediumint", "number(7)"),
    ("mediumtext", "clob"),
    ("numeric", "number"),
    ("real", "binary_double"),
    ("set", "varchar2"),
    ("smallint", "number(5)"),
    ("text", "clob"),
    ("time", "date"),
    ("timestamp", "date"),
    ("tinyblob", "raw"),
    ("tinyint", "number(3)"),
    ("tinytext", "varchar2"),
    ("varchar", "varchar2"),
    ("year", "number"),
];

pub fn mapper() -> TypeMapper {
    TypeMapper::new(Dialect::MySql, Dialect::Oracle)
        .with_types(TYPES)
        .with_converter(PatternConverter::new(builtin(r"varchar\((\d+)\)"), "varchar2(${1})"))
        .with_converter(PatternConverter::new(builtin(r"char\((\d+)\)"), "nchar(${1})"))
        .with_converter(PatternConverter::new(builtin(r"decimal\((.*)\)"), "number(${1})"))
        // Display widths do not change the storage size
        .with_converter(PatternConverter::new(builtin(r"tinyint\(\d+\)"), "number(3)"))
        .with_converter(PatternConverter::new(builtin(r"smallint\(\d+\)"), "number(5)"))
        .with_converter(PatternConverter::new(builtin(r"mediumint\(\d+\)"), "number(7)"))
        .with_converter(PatternConverter::new(builtin(r"int(eger)?\(\d+\)"), "number(10)"))
        .with_converter(PatternConverter::new(builtin(r"bigint\(\d+\)"), "number(19)"))
}
