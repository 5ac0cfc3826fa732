//! Dialect identifiers and detection.

use std::fmt;
use std::str::FromStr;

/// Type systems that take part in conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// MySQL
    MySql,
    /// Oracle
    Oracle,
    /// Java entity classes
    Java,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect: {0} (expected mysql, oracle or java)")]
pub struct UnknownDialect(pub String);

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Oracle => "oracle",
            Self::Java => "java",
        }
    }

    /// Whether this is a database dialect a model can target.
    pub fn is_sql(self) -> bool {
        matches!(self, Self::MySql | Self::Oracle)
    }

    /// Detect the database dialect from a target model name such as
    /// `ORACLE Version 11g` or `MySQL 5.0`.
    pub fn detect(model_name: &str) -> Option<Self> {
        let lower = model_name.to_lowercase();

        if lower.contains("mysql") {
            return Some(Self::MySql);
        }
        if lower.contains("oracle") {
            return Some(Self::Oracle);
        }

        None
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "oracle" => Ok(Self::Oracle),
            "java" => Ok(Self::Java),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
