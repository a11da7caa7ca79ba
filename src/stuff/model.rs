//! The `Stuff` record and its two encodings: JSON on the wire, BSON in the
//! collection.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::StuffId;

/// A stored record. `title` and `body` are optional; empty means absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stuff {
    pub id: StuffId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// The fields a client may send on create.
///
/// Any `id` in the request body (and any unknown field) is ignored; the
/// service always assigns its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewStuff {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

/// The request body was not a JSON object of optional string fields.
#[derive(thiserror::Error, Debug)]
#[error("malformed stuff payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl NewStuff {
    /// Decodes a request body. Anything other than a JSON object is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let object: Map<String, Value> = serde_json::from_slice(bytes)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }

    pub fn with_id(self, id: StuffId) -> Stuff {
        Stuff { id, title: self.title, body: self.body }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted shape: `{_id, title?, body?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StuffDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl From<StuffDocument> for Stuff {
    fn from(doc: StuffDocument) -> Self {
        Self { id: doc.id.into(), title: doc.title, body: doc.body }
    }
}

impl From<&Stuff> for StuffDocument {
    fn from(stuff: &Stuff) -> Self {
        Self {
            id: stuff.id.object_id(),
            title: stuff.title.clone(),
            body: stuff.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};
    use serde_json::json;

    fn id() -> StuffId {
        StuffId::parse("5f1d7b3c9a0e4b2d8c6a1f00").unwrap()
    }

    #[test]
    fn decode_ignores_client_id_and_unknown_fields() {
        let new = NewStuff::decode(br#"{"id":"ffffffffffffffffffffffff","title":"T","extra":1}"#).unwrap();
        assert_eq!(new, NewStuff { title: "T".into(), body: String::new() });
    }

    #[test]
    fn decode_empty_object_and_nulls() {
        assert_eq!(NewStuff::decode(b"{}").unwrap(), NewStuff::default());
        assert_eq!(
            NewStuff::decode(br#"{"title":null,"body":null}"#).unwrap(),
            NewStuff::default()
        );
    }

    #[test]
    fn decode_rejects_malformed_bodies() {
        assert!(NewStuff::decode(b"").is_err());
        assert!(NewStuff::decode(b"{").is_err());
        assert!(NewStuff::decode(b"[]").is_err());
        assert!(NewStuff::decode(br#"{"title":5}"#).is_err());
    }

    #[test]
    fn encode_omits_empty_fields() {
        let stuff = NewStuff { title: "T".into(), body: String::new() }.with_id(id());
        assert_eq!(
            serde_json::to_value(&stuff).unwrap(),
            json!({"id": "5f1d7b3c9a0e4b2d8c6a1f00", "title": "T"})
        );
    }

    #[test]
    fn encode_sequence_as_array() {
        let all = vec![NewStuff::default().with_id(id())];
        assert_eq!(
            serde_json::to_value(&all).unwrap(),
            json!([{"id": "5f1d7b3c9a0e4b2d8c6a1f00"}])
        );
        assert_eq!(serde_json::to_string(&Vec::<Stuff>::new()).unwrap(), "[]");
    }

    #[test]
    fn document_uses_underscore_id_and_omits_empty_fields() {
        let stuff = NewStuff { title: String::new(), body: "B".into() }.with_id(id());
        let doc = bson::to_document(&StuffDocument::from(&stuff)).unwrap();

        assert_eq!(doc, doc! { "_id": id().object_id(), "body": "B" });
    }

    #[test]
    fn document_without_optional_fields_decodes() {
        let raw = doc! { "_id": id().object_id() };
        let decoded: StuffDocument = bson::from_document(raw).unwrap();

        assert_eq!(Stuff::from(decoded), NewStuff::default().with_id(id()));
    }
}
