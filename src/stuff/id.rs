//! Store-native identifier for a [`Stuff`](super::Stuff) record.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 12-byte document id, written as 24 lowercase hex characters.
///
/// Wraps the MongoDB `ObjectId` so routing and handlers only ever deal with
/// [`parse`](StuffId::parse) and `Display`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StuffId(ObjectId);

/// The path segment was not a 24-character hex id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{input}` is not a 24-character hex id")]
pub struct ParseIdError {
    input: String,
}

impl StuffId {
    /// A fresh, process-unique id.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn parse(s: &str) -> Result<Self, ParseIdError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ParseIdError { input: s.to_owned() })
    }

    pub fn object_id(self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for StuffId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for StuffId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StuffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for StuffId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StuffId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_then_display_is_lowercase_hex() {
        let id = StuffId::parse("5F1D7B3C9A0E4B2D8C6A1F00").unwrap();
        assert_eq!(id.to_string(), "5f1d7b3c9a0e4b2d8c6a1f00");
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(StuffId::parse("not-a-valid-id").is_err());
        assert!(StuffId::parse("5f1d7b3c9a0e4b2d8c6a1f").is_err());
        assert!(StuffId::parse("5f1d7b3c9a0e4b2d8c6a1f0000").is_err());
        assert!(StuffId::parse("zz1d7b3c9a0e4b2d8c6a1f00").is_err());
        assert!(StuffId::parse("").is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(StuffId::generate(), StuffId::generate());
    }

    #[test]
    fn serialises_as_hex_string() {
        let id = StuffId::parse("5f1d7b3c9a0e4b2d8c6a1f00").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""5f1d7b3c9a0e4b2d8c6a1f00""#);
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = StuffId::parse("abc").unwrap_err();
        assert_eq!(err.to_string(), "`abc` is not a 24-character hex id");
    }
}
