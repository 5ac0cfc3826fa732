//! Cross-dialect type mapping.
//!
//! A [`TypeMapping`] holds one [`TypeMapper`] per ordered dialect pair. Each
//! mapper answers from its lookup table first, then walks its converters in
//! declaration order; the first converter that matches wins and its result is
//! remembered in the lookup table under the literal input.

mod converter;
mod mysql_java;
mod mysql_oracle;
mod oracle_java;
mod oracle_mysql;

pub use converter::{
    full_match, Converter, FallbackConverter, NumberConverter, PatternConverter,
    SamePatternConverter, SizeConverter,
};

use crate::dialect::Dialect;
use std::cell::RefCell;
use std::collections::HashMap;

/// How a conversion result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Source and target are the same dialect.
    Identity,
    /// Answered by the lookup table, including remembered pattern results.
    Lookup,
    /// Produced by a converter on this call.
    Pattern,
    /// No mapper for the pair, or no rule for the type. The input is returned.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub outcome: Outcome,
}

impl Conversion {
    fn new(text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }

    /// Whether a rule produced the result.
    pub fn is_mapped(&self) -> bool {
        matches!(self.outcome, Outcome::Lookup | Outcome::Pattern)
    }
}

/// Rules converting types of one dialect into another.
///
/// The lookup table grows as pattern results are remembered. It lives in a
/// `RefCell`, so a mapper cannot be shared between threads without a lock.
pub struct TypeMapper {
    source: Dialect,
    target: Dialect,
    type_map: RefCell<HashMap<String, String>>,
    converters: Vec<Box<dyn Converter>>,
}

impl TypeMapper {
    pub fn new(source: Dialect, target: Dialect) -> Self {
        Self {
            source,
            target,
            type_map: RefCell::new(HashMap::new()),
            converters: Vec::new(),
        }
    }

    pub fn with_types(self, entries: &[(&str, &str)]) -> Self {
        self.type_map.borrow_mut().extend(
            entries
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        );
        self
    }

    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Box::new(converter));
        self
    }

    pub fn source(&self) -> Dialect {
        self.source
    }

    pub fn target(&self) -> Dialect {
        self.target
    }

    pub fn converter_count(&self) -> usize {
        self.converters.len()
    }

    /// The lookup table entry for `data_type`, if any.
    pub fn cached(&self, data_type: &str) -> Option<String> {
        self.type_map.borrow().get(data_type).cloned()
    }

    pub fn convert(&self, data_type: &str) -> Conversion {
        if let Some(mapped) = self.cached(data_type) {
            return Conversion::new(mapped, Outcome::Lookup);
        }

        let Some(converter) = self.converters.iter().find(|c| c.matches(data_type)) else {
            tracing::debug!(
                source = %self.source,
                target = %self.target,
                data_type,
                "no type rule matched"
            );
            return Conversion::new(data_type, Outcome::Passthrough);
        };

        let result = converter.convert(data_type);
        self.type_map
            .borrow_mut()
            .insert(data_type.to_string(), result.clone());

        Conversion::new(result, Outcome::Pattern)
    }
}

/// Registry of mappers keyed by (source, target).
pub struct TypeMapping {
    mappers: Vec<TypeMapper>,
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeMapping {
    /// The built-in mappers: Oracle to MySQL, MySQL to Oracle, and both to Java.
    pub fn new() -> Self {
        Self::empty()
            .register(oracle_mysql::mapper())
            .register(mysql_oracle::mapper())
            .register(oracle_java::mapper())
            .register(mysql_java::mapper())
    }

    pub fn empty() -> Self {
        Self {
            mappers: Vec::new(),
        }
    }

    /// Add a mapper, replacing any previous one for the same pair.
    pub fn register(mut self, mapper: TypeMapper) -> Self {
        self.mappers
            .retain(|m| (m.source, m.target) != (mapper.source, mapper.target));
        self.mappers.push(mapper);
        self
    }

    pub fn mapper(&self, source: Dialect, target: Dialect) -> Option<&TypeMapper> {
        self.mappers
            .iter()
            .find(|m| m.source == source && m.target == target)
    }

    /// Convert a type of `source` to the closest type of `target`. Never fails:
    /// when no rule applies the input is returned unchanged.
    pub fn convert(&self, source: Dialect, target: Dialect, data_type: &str) -> String {
        self.convert_checked(source, target, data_type).text
    }

    /// Like [`convert`](Self::convert), also reporting how the result was found.
    pub fn convert_checked(&self, source: Dialect, target: Dialect, data_type: &str) -> Conversion {
        if source == target {
            return Conversion::new(data_type, Outcome::Identity);
        }

        match self.mapper(source, target) {
            Some(mapper) => mapper.convert(data_type),
            None => {
                tracing::debug!(source = %source, target = %target, "no type mapper registered");
                Conversion::new(data_type, Outcome::Passthrough)
            }
        }
    }
}
