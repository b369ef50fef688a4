//! Product identifiers shared by the sales and products sheets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage kind of a product key column.
///
/// Both sheets must agree on the kind for their rows to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    /// Whole-number identifiers.
    Numeric,
    /// Free-text identifiers.
    Text,
}

impl KeyKind {
    /// SQL column type used to store keys of this kind.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Numeric => "INTEGER",
            Self::Text => "TEXT",
        }
    }

    /// Maps a declared SQL column type back to a key kind.
    #[must_use]
    pub fn from_sql_type(declared: &str) -> Option<Self> {
        match declared.to_uppercase().as_str() {
            "INTEGER" => Some(Self::Numeric),
            "TEXT" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A product identifier as read from a sheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Whole-number identifier.
    Numeric(i64),
    /// Text identifier.
    Text(String),
}

impl ProductId {
    /// Returns the key kind of this identifier.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::Numeric(_) => KeyKind::Numeric,
            Self::Text(_) => KeyKind::Text,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_kind() {
        assert_eq!(ProductId::from(7).kind(), KeyKind::Numeric);
        assert_eq!(ProductId::from("P1").kind(), KeyKind::Text);
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::from(42).to_string(), "42");
        assert_eq!(ProductId::from("P1").to_string(), "P1");
    }

    #[test]
    fn test_key_kind_sql_type_roundtrip() {
        for kind in [KeyKind::Numeric, KeyKind::Text] {
            assert_eq!(KeyKind::from_sql_type(kind.sql_type()), Some(kind));
        }
        assert_eq!(KeyKind::from_sql_type("integer"), Some(KeyKind::Numeric));
        assert_eq!(KeyKind::from_sql_type("REAL"), None);
    }
}
