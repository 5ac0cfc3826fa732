//! Oracle to MySQL.
//!
//! See the Oracle SQL data type reference and the MySQL data type chapter.

use super::converter::{builtin, NumberConverter, PatternConverter, SamePatternConverter, SizeConverter};
use super::TypeMapper;
use crate::dialect::Dialect;

const TYPES: &[(&str, &str)] = &[
    ("bfile", "varchar(255)"),
    ("blob", "longblob"),
    ("clob", "longtext"),
    ("date", "datetime"),
    ("double precision", "double precision"),
    ("integer", "int"),
    ("int", "int"),
    ("long", "longtext"),
    ("long raw", "longblob"),
    ("nclob", "nvarchar(max)"),
    ("number", "double"),
    ("real", "double"),
    ("rowid", "char(10)"),
    ("smallint", "decimal(38)"),
    ("xmltype", "longtext"),
];

const INTEGERS: &[(u32, &str)] = &[(3, "tinyint"), (5, "smallint"), (10, "int"), (19, "bigint")];

pub fn mapper() -> TypeMapper {
    TypeMapper::new(Dialect::Oracle, Dialect::MySql)
        .with_types(TYPES)
        .with_converter(PatternConverter::new(builtin(r"varchar2?\((\d+)( byte)?\)"), "varchar(${1})"))
        .with_converter(PatternConverter::new(builtin(r"nvarchar2\((\d+)( byte)?\)"), "nvarchar(${1})"))
        .with_converter(SamePatternConverter::new(builtin(r"nchar varying\((\d+)\)")))
        .with_converter(SamePatternConverter::new(builtin(r"numeric\((.*)\)")))
        .with_converter(PatternConverter::new(builtin(r"float(\(\d+\))?"), "double"))
        .with_converter(NumberConverter::new(
            builtin(r"number\s*\((?P<precision>\d+)(?:,\s*(?P<scale>\d+))?\)"),
            INTEGERS,
            |precision| format!("decimal({})", precision),
            |precision, scale| format!("decimal({}, {})", precision, scale),
        ))
        .with_converter(PatternConverter::new(builtin(r"timestamp\((\d*)\)"), "datetime(${1})"))
        .with_converter(PatternConverter::new(
            builtin(r"timestamp\((\d*)\) with time zone"),
            "datetime(${1})",
        ))
        .with_converter(PatternConverter::new(builtin(r"interval year\(\d*\) to month"), "varchar(30)"))
        .with_converter(PatternConverter::new(builtin(r"interval day\(\d*\) to seconds?"), "varchar(30)"))
        .with_converter(PatternConverter::new(builtin(r"urowid\((\d+)\)"), "varchar(${1})"))
        .with_converter(SizeConverter::new(builtin(r"raw\((?P<size>\d+)\)"), 256, "binary", "varbinary"))
}
