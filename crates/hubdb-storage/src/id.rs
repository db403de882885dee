//! Document identifiers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::StorageError;

/// Random value fixed for the lifetime of the process.
static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::random());

/// Counter seeded randomly, incremented for every generated id.
static COUNTER: Lazy<AtomicU32> =
    Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));

/// A 12-byte store-assigned identifier, rendered as 24 hex characters.
///
/// Layout: 4-byte big-endian seconds since the epoch, 5 bytes unique to the
/// process, 3-byte big-endian counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Length of the hex representation.
    pub const HEX_LEN: usize = 24;

    /// Generates a fresh identifier.
    pub fn new() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Creates an ObjectId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parses a 24 character hex string. Upper and lower case are accepted.
    pub fn parse_str(s: &str) -> Result<Self, StorageError> {
        if s.len() != Self::HEX_LEN {
            return Err(StorageError::Serialization(format!(
                "invalid object id length: {}",
                s.len()
            )));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Returns true if `s` is syntactically a valid identifier.
    ///
    /// Existence is not checked.
    pub fn is_valid(s: &str) -> bool {
        s.len() == Self::HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Returns the lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Seconds since the epoch at which the identifier was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ObjectId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The `_id` of a stored document.
///
/// Generated ids are [`ObjectId`]s. A client may also supply its own `_id` on
/// insert, which is kept verbatim and only matches a literal lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentId {
    /// Store-generated identifier.
    Object(ObjectId),
    /// Client-supplied identifier of any JSON type.
    Literal(Value),
}

impl DocumentId {
    /// Renders the id as it appears in a JSON document.
    pub fn to_json(&self) -> Value {
        match self {
            DocumentId::Object(oid) => Value::String(oid.to_hex()),
            DocumentId::Literal(value) => value.clone(),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Object(oid) => write!(f, "{oid}"),
            DocumentId::Literal(Value::String(s)) => f.write_str(s),
            DocumentId::Literal(value) => write!(f, "{value}"),
        }
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        DocumentId::Object(oid)
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DocumentId::Object(oid) => oid.serialize(serializer),
            DocumentId::Literal(value) => value.serialize(serializer),
        }
    }
}
