/*!
The decoded, owned representation of a JSON value.

Containers carry a standalone (buffer, description) pair rather than a borrow into
their parent: reading a nested object or array out of a document always produces an
independent copy (see `document.rs`), so `JSONValue::Object`/`JSONValue::Array` can
just wrap the same owned types the top-level document uses.
*/

use crate::decode::{serialize_floating, serialize_integer, escape_string_into};
use crate::description::{Description, EntryType};
use crate::document::{JSONArray, JSONObject};
use crate::error::DocumentError;

/// A single decoded JSON value.
#[derive(Debug, Clone)]
pub enum JSONValue {
    Object(JSONObject),
    Array(JSONArray),
    String(String),
    Integer(i64),
    Floating(f64),
    Bool(bool),
    Null,
}

impl JSONValue {
    /// Borrow this value as an object, or fail with [`DocumentError::ExpectedObject`].
    pub fn as_object(&self) -> Result<&JSONObject, DocumentError> {
        match self {
            JSONValue::Object(obj) => Ok(obj),
            _ => Err(DocumentError::ExpectedObject),
        }
    }

    /// Borrow this value as an array, or fail with [`DocumentError::ExpectedArray`].
    pub fn as_array(&self) -> Result<&JSONArray, DocumentError> {
        match self {
            JSONValue::Array(arr) => Ok(arr),
            _ => Err(DocumentError::ExpectedArray),
        }
    }

    /// Consume this value as an object, or fail with [`DocumentError::ExpectedObject`].
    pub fn into_object(self) -> Result<JSONObject, DocumentError> {
        match self {
            JSONValue::Object(obj) => Ok(obj),
            _ => Err(DocumentError::ExpectedObject),
        }
    }

    /// Consume this value as an array, or fail with [`DocumentError::ExpectedArray`].
    pub fn into_array(self) -> Result<JSONArray, DocumentError> {
        match self {
            JSONValue::Array(arr) => Ok(arr),
            _ => Err(DocumentError::ExpectedArray),
        }
    }

    /// Serialize this value to a standalone JSON fragment: its raw bytes (offsets
    /// starting at `0`) and a description of just the entries it introduces.
    ///
    /// Used by `document.rs`'s mutation path to turn an arbitrary `JSONValue` into the
    /// same (bytes, entries) shape a parsed subtree already has, so both can be spliced
    /// into a parent the same way.
    pub(crate) fn to_fragment(&self) -> Result<(Vec<u8>, Description), DocumentError> {
        match self {
            JSONValue::Object(obj) => Ok((obj.raw_bytes().to_vec(), obj.raw_description().clone())),
            JSONValue::Array(arr) => Ok((arr.raw_bytes().to_vec(), arr.raw_description().clone())),
            JSONValue::String(s) => {
                let mut bytes = Vec::new();
                escape_string_into(&mut bytes, s);
                let has_escape = s
                    .bytes()
                    .any(|b| b == b'"' || b == b'\\' || b < 0x20);
                let entry_type = if has_escape { EntryType::StringWithEscaping } else { EntryType::String };

                let mut description = Description::new();
                description.push_leaf_entry(entry_type, 0, bytes.len());
                Ok((bytes, description))
            }
            JSONValue::Integer(n) => {
                let mut bytes = Vec::new();
                serialize_integer(&mut bytes, *n);

                let mut description = Description::new();
                description.push_leaf_entry(EntryType::Integer, 0, bytes.len());
                Ok((bytes, description))
            }
            JSONValue::Floating(f) => {
                let mut bytes = Vec::new();
                serialize_floating(&mut bytes, *f)?;

                let mut description = Description::new();
                description.push_leaf_entry(EntryType::FloatingNumber, 0, bytes.len());
                Ok((bytes, description))
            }
            JSONValue::Bool(true) => {
                let mut description = Description::new();
                description.push_leaf_entry(EntryType::BoolTrue, 0, 4);
                Ok((b"true".to_vec(), description))
            }
            JSONValue::Bool(false) => {
                let mut description = Description::new();
                description.push_leaf_entry(EntryType::BoolFalse, 0, 5);
                Ok((b"false".to_vec(), description))
            }
            JSONValue::Null => {
                let mut description = Description::new();
                description.push_leaf_entry(EntryType::Null, 0, 4);
                Ok((b"null".to_vec(), description))
            }
        }
    }
}

/// Semantic equality: cross-numeric (`Integer(n) == Floating(n as f64)`) and recursive
/// for containers, independent of object key order (`JSONObject`'s own `PartialEq`
/// handles that part).
impl PartialEq for JSONValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JSONValue::Object(a), JSONValue::Object(b)) => a == b,
            (JSONValue::Array(a), JSONValue::Array(b)) => a == b,
            (JSONValue::String(a), JSONValue::String(b)) => a == b,
            (JSONValue::Bool(a), JSONValue::Bool(b)) => a == b,
            (JSONValue::Null, JSONValue::Null) => true,
            (JSONValue::Integer(a), JSONValue::Integer(b)) => a == b,
            (JSONValue::Floating(a), JSONValue::Floating(b)) => a == b,
            (JSONValue::Integer(a), JSONValue::Floating(b)) => (*a as f64) == *b,
            (JSONValue::Floating(a), JSONValue::Integer(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl From<JSONObject> for JSONValue {
    fn from(obj: JSONObject) -> Self {
        JSONValue::Object(obj)
    }
}

impl From<JSONArray> for JSONValue {
    fn from(arr: JSONArray) -> Self {
        JSONValue::Array(arr)
    }
}

impl From<String> for JSONValue {
    fn from(s: String) -> Self {
        JSONValue::String(s)
    }
}

impl From<&str> for JSONValue {
    fn from(s: &str) -> Self {
        JSONValue::String(s.to_owned())
    }
}

impl From<i64> for JSONValue {
    fn from(n: i64) -> Self {
        JSONValue::Integer(n)
    }
}

impl From<f64> for JSONValue {
    fn from(f: f64) -> Self {
        JSONValue::Floating(f)
    }
}

impl From<bool> for JSONValue {
    fn from(b: bool) -> Self {
        JSONValue::Bool(b)
    }
}

#[cfg(feature = "serde_json")]
mod serde_conversion {
    use super::JSONValue;
    use crate::error::DocumentError;

    impl JSONValue {
        /// Convert to a `serde_json::Value`, recursively decoding any nested object or
        /// array. Fallible (unlike the teacher's read-only equivalent) because this
        /// crate decodes container members lazily, so a lone surrogate or
        /// overflow-to-infinity buried in a nested value surfaces here rather than at
        /// parse time.
        pub fn to_serde_value(&self) -> Result<serde_json::Value, DocumentError> {
            Ok(match self {
                JSONValue::Object(obj) => obj.to_value()?,
                JSONValue::Array(arr) => arr.to_value()?,
                JSONValue::String(s) => serde_json::Value::String(s.clone()),
                JSONValue::Integer(n) => serde_json::Value::from(*n),
                JSONValue::Floating(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .ok_or(DocumentError::NonFiniteNumber)?,
                JSONValue::Bool(b) => serde_json::Value::Bool(*b),
                JSONValue::Null => serde_json::Value::Null,
            })
        }
    }
}
