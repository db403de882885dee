//! Query filters understood by every backend.

use serde_json::Value;

use crate::{DocumentId, ObjectId};

/// Selects documents within a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document.
    All,
    /// The document whose `_id` is the given store-generated identifier.
    Id(ObjectId),
    /// The document whose `_id` equals the given literal value.
    ///
    /// Never matches a store-generated identifier, even when the literal is
    /// a string spelling the same hex digits.
    Key(Value),
    /// Documents whose `field` equals `value` exactly.
    ///
    /// An array field matches when one of its elements equals `value`.
    FieldEq { field: String, value: Value },
}

impl Filter {
    /// Builds an exact-match filter on a single field.
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds an `_id` filter from a path segment.
    ///
    /// A syntactically valid identifier is matched as an [`ObjectId`];
    /// anything else is matched as a literal string key.
    pub fn id_or_key(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(oid) => Filter::Id(oid),
            Err(_) => Filter::Key(Value::String(raw.to_string())),
        }
    }

    /// Returns true if a document with the given id and fields is selected.
    pub fn matches(&self, id: &DocumentId, fields: &serde_json::Map<String, Value>) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(oid) => matches!(id, DocumentId::Object(stored) if stored == oid),
            Filter::Key(key) => matches!(id, DocumentId::Literal(stored) if stored == key),
            Filter::FieldEq { field, value } => match fields.get(field) {
                Some(stored @ Value::Array(items)) => stored == value || items.contains(value),
                Some(stored) => stored == value,
                None => value.is_null(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_id_or_key() {
        let oid = ObjectId::new();
        assert_eq!(Filter::id_or_key(&oid.to_hex()), Filter::Id(oid));
        assert_eq!(
            Filter::id_or_key("commit-abc"),
            Filter::Key(Value::String("commit-abc".into()))
        );
    }

    #[test]
    fn test_id_and_key_do_not_cross_match() {
        let oid = ObjectId::new();
        let generated = DocumentId::Object(oid);
        let literal = DocumentId::Literal(Value::String(oid.to_hex()));
        let empty = Map::new();

        assert!(Filter::Id(oid).matches(&generated, &empty));
        assert!(!Filter::Id(oid).matches(&literal, &empty));
        assert!(Filter::Key(Value::String(oid.to_hex())).matches(&literal, &empty));
        assert!(!Filter::Key(Value::String(oid.to_hex())).matches(&generated, &empty));
    }

    #[test]
    fn test_field_eq_is_exact() {
        let id = DocumentId::Object(ObjectId::new());
        let filter = Filter::field_eq("repoId", "r1");

        assert!(filter.matches(&id, &fields(json!({"repoId": "r1"}))));
        assert!(!filter.matches(&id, &fields(json!({"repoId": "R1"}))));
        assert!(!filter.matches(&id, &fields(json!({"repoId": 1}))));
        assert!(!filter.matches(&id, &fields(json!({"other": "r1"}))));
        assert!(filter.matches(&id, &fields(json!({"repoId": ["r0", "r1"]}))));
    }

    #[test]
    fn test_field_eq_null_matches_missing() {
        let id = DocumentId::Object(ObjectId::new());
        let filter = Filter::field_eq("repoId", Value::Null);
        assert!(filter.matches(&id, &fields(json!({"name": "x"}))));
    }
}
