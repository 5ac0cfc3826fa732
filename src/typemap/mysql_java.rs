//! MySQL to Java field types.

use super::converter::{builtin, FallbackConverter, NumberConverter, PatternConverter};
use super::TypeMapper;
use crate::dialect::Dialect;

const TYPES: &[(&str, &str)] = &[
    ("tinyint", "Integer"),
    ("smallint", "Integer"),
    ("mediumint", "Integer"),
    ("int", "Integer"),
    ("integer", "Integer"),
    ("bigint", "Long"),
    ("float", "Float"),
    ("double", "Double"),
    ("double precision", "Double"),
    ("real", "Double"),
    ("decimal", "BigDecimal"),
    ("numeric", "BigDecimal"),
    ("bit", "Boolean"),
    ("date", "Date"),
    ("datetime", "Date"),
    ("timestamp", "Date"),
    ("time", "Date"),
    ("blob", "Blob"),
    ("longblob", "Blob"),
];

const INTEGERS: &[(u32, &str)] = &[(10, "Integer"), (19, "Long")];

pub fn mapper() -> TypeMapper {
    TypeMapper::new(Dialect::MySql, Dialect::Java)
        .with_types(TYPES)
        .with_converter(NumberConverter::new(
            builtin(r"(?:decimal|numeric)\s*\((?P<precision>\d+)(?:,\s*(?P<scale>\d+))?\)"),
            INTEGERS,
            |_| "BigInteger".to_string(),
            |_, _| "BigDecimal".to_string(),
        ))
        .with_converter(PatternConverter::new(builtin(r"(tiny|small|medium)?int(eger)?\(\d+\)"), "Integer"))
        .with_converter(PatternConverter::new(builtin(r"bigint\(\d+\)"), "Long"))
        .with_converter(PatternConverter::new(builtin(r"(datetime|timestamp)\(\d+\)"), "Date"))
        .with_converter(FallbackConverter::new("String"))
}
