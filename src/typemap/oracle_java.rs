//! Oracle to Java field types.

use super::converter::{builtin, FallbackConverter, NumberConverter};
use super::TypeMapper;
use crate::dialect::Dialect;

const TYPES: &[(&str, &str)] = &[
    ("date", "Date"),
    ("integer", "Integer"),
    ("double", "Double"),
    ("double precision", "Double"),
    ("int", "Integer"),
    ("long raw", "Blob"),
    ("number", "Double"),
    ("real", "Double"),
    ("smallint", "Integer"),
];

const INTEGERS: &[(u32, &str)] = &[(10, "Integer"), (19, "Long")];

pub fn mapper() -> TypeMapper {
    TypeMapper::new(Dialect::Oracle, Dialect::Java)
        .with_types(TYPES)
        .with_converter(NumberConverter::new(
            builtin(r"(?:number|numeric)\s*\((?P<precision>\d+)(?:,\s*(?P<scale>\d+))?\)"),
            INTEGERS,
            |_| "BigInteger".to_string(),
            |_, _| "Double".to_string(),
        ))
        .with_converter(FallbackConverter::new("String"))
}
