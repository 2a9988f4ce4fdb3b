//! Document Models

use serde_json::{Map, Value};
use uuid::Uuid;

/// Key under which the store exposes a document's identifier on read.
pub const ID_FIELD: &str = "_id";

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Attach the store identifier to a document body.
pub(crate) fn with_id(mut body: Document, id: Uuid) -> Document {
    body.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    body
}

/// Remove any caller supplied identifier so it never lands in a stored body.
pub(crate) fn without_id(mut body: Document) -> Document {
    body.remove(ID_FIELD);
    body
}
