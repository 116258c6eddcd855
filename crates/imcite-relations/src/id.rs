//! Identifier values for publications, authors, fields, and journals

use serde::{Deserialize, Serialize};

/// Calendar year of a publication or citation event
pub type Year = i32;

/// An identifier from the source dataset.
///
/// Bibliometric corpora key their records by either integer ids (MAG, OpenAlex
/// numeric ids) or strings (DOIs, WoS accession numbers). `Id` carries both
/// without forcing a conversion, and orders integers before text so that
/// mixed-id datasets still index deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Integer identifier
    Int(i64),
    /// Text identifier
    Text(String),
}

impl Id {
    /// Whether this is an integer identifier
    pub fn is_int(&self) -> bool {
        matches!(self, Id::Int(_))
    }

    /// The integer value, if this is an integer identifier
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Id::Int(v) => Some(*v),
            Id::Text(_) => None,
        }
    }

    /// The text value, if this is a text identifier
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Id::Int(_) => None,
            Id::Text(s) => Some(s.as_str()),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Int(value as i64)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Id::Int(v) => write!(f, "{}", v),
            Id::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Id::from(42i64), Id::Int(42));
        assert_eq!(Id::from("W2010"), Id::Text("W2010".to_string()));
        assert_eq!(Id::from(7i64).as_int(), Some(7));
        assert_eq!(Id::from("doi").as_text(), Some("doi"));
        assert_eq!(Id::from(7i64).as_text(), None);
    }

    #[test]
    fn test_ordering_is_total() {
        let mut ids = vec![Id::from("b"), Id::from(2i64), Id::from("a"), Id::from(1i64)];
        ids.sort();
        assert_eq!(
            ids,
            vec![Id::from(1i64), Id::from(2i64), Id::from("a"), Id::from("b")]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Id::from(99i64).to_string(), "99");
        assert_eq!(Id::from("10.1000/xyz").to_string(), "10.1000/xyz");
    }

    #[test]
    fn test_serde_untagged() {
        let int: Id = serde_json::from_str("17").unwrap();
        let text: Id = serde_json::from_str("\"17a\"").unwrap();
        assert_eq!(int, Id::Int(17));
        assert_eq!(text, Id::Text("17a".to_string()));
        assert_eq!(serde_json::to_string(&int).unwrap(), "17");
    }
}
