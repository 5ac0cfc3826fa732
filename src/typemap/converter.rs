//! Pattern converters tried by a [`TypeMapper`](super::TypeMapper) after its lookup table.

use regex::Regex;

/// One rule in a mapper's priority chain.
pub trait Converter {
    /// Whether the whole type string has the shape this rule handles.
    fn matches(&self, data_type: &str) -> bool;

    /// Produce the target type. Only called after `matches` returned true.
    fn convert(&self, data_type: &str) -> String;
}

/// Compile `pattern` so it only matches the whole input, ignoring case.
pub fn full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i)^(?:{})$", pattern))
}

/// Built-in rule tables are literals; a typo there is a programming error.
pub(super) fn builtin(pattern: &str) -> Regex {
    full_match(pattern).unwrap_or_else(|e| panic!("invalid built-in type pattern {pattern:?}: {e}"))
}

/// Regex substitution, e.g. `varchar2(n)` to `varchar(n)`. Captures are
/// referenced as `${1}` in the replacement.
pub struct PatternConverter {
    pattern: Regex,
    replacement: String,
}

impl PatternConverter {
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    pub fn try_new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(full_match(pattern)?, replacement))
    }
}

impl Converter for PatternConverter {
    fn matches(&self, data_type: &str) -> bool {
        self.pattern.is_match(data_type)
    }

    fn convert(&self, data_type: &str) -> String {
        self.pattern
            .replace(data_type, self.replacement.as_str())
            .into_owned()
    }
}

/// Accepts a shape that is valid as is in the target dialect.
pub struct SamePatternConverter {
    pattern: Regex,
}

impl SamePatternConverter {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn try_new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(full_match(pattern)?))
    }
}

impl Converter for SamePatternConverter {
    fn matches(&self, data_type: &str) -> bool {
        self.pattern.is_match(data_type)
    }

    fn convert(&self, data_type: &str) -> String {
        data_type.to_string()
    }
}

/// Maps `precision[, scale]` numerics by magnitude.
///
/// The pattern must capture `precision` and may capture `scale`. Without a scale
/// (or with a zero scale) the first threshold strictly above the precision picks
/// the integer type; past the last threshold `overflow` is used. A non-zero scale
/// always yields `scaled`. Both receive the digits as written.
pub struct NumberConverter {
    pattern: Regex,
    thresholds: &'static [(u32, &'static str)],
    overflow: fn(&str) -> String,
    scaled: fn(&str, &str) -> String,
}

impl NumberConverter {
    pub fn new(
        pattern: Regex,
        thresholds: &'static [(u32, &'static str)],
        overflow: fn(&str) -> String,
        scaled: fn(&str, &str) -> String,
    ) -> Self {
        Self {
            pattern,
            thresholds,
            overflow,
            scaled,
        }
    }

    /// The integer type for `precision`, or `None` when it is past every threshold.
    fn integer(&self, precision: &str) -> Option<&'static str> {
        // Digit runs too long for u64 are past any threshold
        let precision = precision.parse::<u64>().ok()?;
        self.thresholds
            .iter()
            .find(|(limit, _)| precision < u64::from(*limit))
            .map(|(_, name)| *name)
    }
}

impl Converter for NumberConverter {
    fn matches(&self, data_type: &str) -> bool {
        self.pattern.is_match(data_type)
    }

    fn convert(&self, data_type: &str) -> String {
        let Some(caps) = self.pattern.captures(data_type) else {
            return data_type.to_string();
        };
        let precision = caps.name("precision").map_or("0", |m| m.as_str());
        let scale = caps
            .name("scale")
            .map(|m| m.as_str())
            .filter(|s| s.chars().any(|c| c != '0'));

        match scale {
            Some(scale) => (self.scaled)(precision, scale),
            None => self
                .integer(precision)
                .map(str::to_string)
                .unwrap_or_else(|| (self.overflow)(precision)),
        }
    }
}

/// Picks between a short and a long form by the captured `size`.
pub struct SizeConverter {
    pattern: Regex,
    limit: u32,
    short: &'static str,
    long: &'static str,
}

impl SizeConverter {
    pub fn new(pattern: Regex, limit: u32, short: &'static str, long: &'static str) -> Self {
        Self {
            pattern,
            limit,
            short,
            long,
        }
    }
}

impl Converter for SizeConverter {
    fn matches(&self, data_type: &str) -> bool {
        self.pattern.is_match(data_type)
    }

    fn convert(&self, data_type: &str) -> String {
        let Some(size) = self
            .pattern
            .captures(data_type)
            .and_then(|caps| caps.name("size").map(|m| m.as_str().to_string()))
        else {
            return data_type.to_string();
        };

        let small = size.parse::<u32>().is_ok_and(|n| n < self.limit);
        format!("{}({})", if small { self.short } else { self.long }, size)
    }
}

/// Matches everything. Keeps a mapper total when nothing else applies.
pub struct FallbackConverter {
    target: &'static str,
}

impl FallbackConverter {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Converter for FallbackConverter {
    fn matches(&self, _data_type: &str) -> bool {
        true
    }

    fn convert(&self, _data_type: &str) -> String {
        self.target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mysql_numbers() -> NumberConverter {
        NumberConverter::new(
            builtin(r"number\s*\((?P<precision>\d+)(?:,\s*(?P<scale>\d+))?\)"),
            &[(3, "tinyint"), (5, "smallint"), (10, "int"), (19, "bigint")],
            |p| format!("decimal({})", p),
            |p, s| format!("decimal({}, {})", p, s),
        )
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let c = PatternConverter::try_new(r"varchar2?\((\d+)( byte)?\)", "varchar(${1})").unwrap();
        assert!(c.matches("varchar2(20)"));
        assert!(c.matches("VARCHAR2(20 BYTE)"));
        assert!(!c.matches("nvarchar2(20)"));
        assert!(!c.matches("varchar2(20) not null"));
        assert_eq!(c.convert("varchar2(20 byte)"), "varchar(20)");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternConverter::try_new(r"varchar(\d+", "x").is_err());
        assert!(SamePatternConverter::try_new(r"numeric\((.*)\)").is_ok());
    }

    #[test]
    fn test_same_pattern_returns_input() {
        let c = SamePatternConverter::try_new(r"numeric\((.*)\)").unwrap();
        assert!(c.matches("NUMERIC(10,2)"));
        assert_eq!(c.convert("NUMERIC(10,2)"), "NUMERIC(10,2)");
    }

    #[test]
    fn test_number_thresholds() {
        let c = mysql_numbers();
        let cases = [
            (2, "tinyint"),
            (3, "smallint"),
            (4, "smallint"),
            (5, "int"),
            (9, "int"),
            (10, "bigint"),
            (18, "bigint"),
            (19, "decimal(19)"),
        ];
        for (precision, expected) in cases {
            assert_eq!(c.convert(&format!("number({})", precision)), expected, "precision {}", precision);
        }
    }

    #[test]
    fn test_number_scale() {
        let c = mysql_numbers();
        assert_eq!(c.convert("number(10,2)"), "decimal(10, 2)");
        assert_eq!(c.convert("number(10, 0)"), "bigint");
        assert_eq!(c.convert("number (4)"), "smallint");
        assert!(!c.matches("number"));
    }

    #[test]
    fn test_number_overflowing_precision() {
        let c = mysql_numbers();
        assert_eq!(c.convert("number(99999999999)"), "decimal(99999999999)");
        assert_eq!(
            c.convert("number(123456789012345678901234567890)"),
            "decimal(123456789012345678901234567890)"
        );
        assert_eq!(c.convert("number(99999999999,2)"), "decimal(99999999999, 2)");
    }

    #[test]
    fn test_size_converter() {
        let c = SizeConverter::new(builtin(r"raw\((?P<size>\d+)\)"), 256, "binary", "varbinary");
        assert_eq!(c.convert("raw(16)"), "binary(16)");
        assert_eq!(c.convert("raw(255)"), "binary(255)");
        assert_eq!(c.convert("raw(256)"), "varbinary(256)");
        assert!(!c.matches("long raw"));
    }

    #[test]
    fn test_fallback_matches_anything() {
        let c = FallbackConverter::new("String");
        assert!(c.matches(""));
        assert!(c.matches("sdo_geometry"));
        assert_eq!(c.convert("sdo_geometry"), "String");
    }
}
