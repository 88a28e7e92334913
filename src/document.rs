/*!
The document view: [`JSONObject`] and [`JSONArray`], a buffer and description pair that
exposes typed reads, keyed/indexed access, and structural mutation without re-parsing.

Both variants share the same (buffer, description) plumbing — member iteration, nested
slicing, and the splice primitive that backs every mutation — via the private
[`DocumentCore`]. The public types differ only in whether members are addressed by key
or by index.
*/

use std::fmt;
use std::ops::Range;

use crate::decode::{self, DecodedNumber};
use crate::description::{Description, EntryType};
use crate::error::{DocumentError, ParseError};
use crate::tokenizer::{self, RootKind};
use crate::value::JSONValue;

#[derive(Debug, Clone, Default)]
struct DocumentCore {
    buffer: Vec<u8>,
    description: Description,
}

impl DocumentCore {
    fn empty(root_kind: RootKind) -> Self {
        let (bytes, entry_type): (&[u8], EntryType) = match root_kind {
            RootKind::Object => (b"{}", EntryType::Object),
            RootKind::Array => (b"[]", EntryType::Array),
        };

        let mut description = Description::new();
        let root = description.reserve_container(entry_type, 0);
        description.complete_container(root, bytes.len(), 0);

        DocumentCore {
            buffer: bytes.to_vec(),
            description,
        }
    }

    fn parse(input: &[u8], root_kind: RootKind) -> Result<Self, ParseError> {
        let description = tokenizer::parse_root(input, root_kind)?;
        Ok(DocumentCore {
            buffer: input.to_vec(),
            description,
        })
    }

    fn as_str(&self) -> &str {
        from_utf8_unchecked!(&self.buffer)
    }

    #[inline]
    fn root_member_count(&self) -> u32 {
        self.description.member_count_at(0)
    }

    fn insertion_point(&self) -> usize {
        let (offset, length) = self.description.json_bounds_at(0);
        offset + length - 1
    }

    /// `(key entry index, value entry index)` for every member, in source order.
    fn object_members(&self) -> Vec<(usize, usize)> {
        let mut members = Vec::with_capacity(self.root_member_count() as usize);
        let mut idx = 1;
        for _ in 0..self.root_member_count() {
            let key_index = idx;
            let value_index = idx + 1;
            members.push((key_index, value_index));
            idx = self.description.skip_index(value_index);
        }
        members
    }

    /// Value entry index for every element, in source order.
    fn array_elements(&self) -> Vec<usize> {
        let mut elements = Vec::with_capacity(self.root_member_count() as usize);
        let mut idx = 1;
        for _ in 0..self.root_member_count() {
            elements.push(idx);
            idx = self.description.skip_index(idx);
        }
        elements
    }

    fn decode_key(&self, key_index: usize) -> Result<String, ParseError> {
        let (json_offset, json_length) = self.description.json_bounds_at(key_index);
        let has_escape = self.description.type_at(key_index) == EntryType::StringWithEscaping;
        decode::decode_string(&self.buffer, json_offset, json_length, has_escape)
    }

    fn decode_value(&self, entry_index: usize) -> Result<JSONValue, DocumentError> {
        let entry_type = self.description.type_at(entry_index);

        match entry_type {
            EntryType::Object | EntryType::Array => {
                let count = self.description.index_length_at(entry_index) as usize;
                let sliced = self.description.slice_rebased(entry_index, count);
                let (json_offset, json_length) = self.description.json_bounds_at(entry_index);
                let bytes = self.buffer[json_offset..json_offset + json_length].to_vec();
                let core = DocumentCore { buffer: bytes, description: sliced };

                Ok(if entry_type == EntryType::Object {
                    JSONValue::Object(JSONObject { core })
                } else {
                    JSONValue::Array(JSONArray { core })
                })
            }
            EntryType::String | EntryType::StringWithEscaping => {
                let (json_offset, json_length) = self.description.json_bounds_at(entry_index);
                let has_escape = entry_type == EntryType::StringWithEscaping;
                let s = decode::decode_string(&self.buffer, json_offset, json_length, has_escape)?;
                Ok(JSONValue::String(s))
            }
            EntryType::Integer | EntryType::FloatingNumber => {
                let (json_offset, json_length) = self.description.json_bounds_at(entry_index);
                match decode::decode_number(&self.buffer, json_offset, json_length, entry_type)? {
                    DecodedNumber::Integer(n) => Ok(JSONValue::Integer(n)),
                    DecodedNumber::Floating(f) => Ok(JSONValue::Floating(f)),
                }
            }
            EntryType::BoolTrue => Ok(JSONValue::Bool(true)),
            EntryType::BoolFalse => Ok(JSONValue::Bool(false)),
            EntryType::Null => Ok(JSONValue::Null),
        }
    }

    fn find_member(&self, key: &str) -> Result<Option<(usize, usize)>, DocumentError> {
        for (key_index, value_index) in self.object_members() {
            if self.decode_key(key_index)? == key {
                return Ok(Some((key_index, value_index)));
            }
        }
        Ok(None)
    }

    /// Locate the nearest comma after a member's closing byte, skipping whitespace.
    /// Panics (a corrupt-index error) if none is found — every interior member in a
    /// `memberCount > 1` container must be followed or preceded by one.
    fn find_comma_after(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.buffer.len() && matches!(self.buffer[i], b' ' | b'\t' | b'\r' | b'\n') {
            i += 1;
        }
        if self.buffer.get(i) == Some(&b',') {
            i + 1
        } else {
            internal_error!("expected a comma after removed member ending at byte {}", from)
        }
    }

    fn find_comma_before(&self, upto: usize) -> usize {
        let mut i = upto;
        while i > 0 && matches!(self.buffer[i - 1], b' ' | b'\t' | b'\r' | b'\n') {
            i -= 1;
        }
        if i > 0 && self.buffer[i - 1] == b',' {
            i - 1
        } else {
            internal_error!("expected a comma before removed member starting at byte {}", upto)
        }
    }

    /// The byte range to remove for a member, including exactly one adjacent comma
    /// when the container has other members left.
    fn removal_range(&self, is_first: bool, member_count: u32, member_start: usize, member_end: usize) -> Range<usize> {
        if member_count == 1 {
            member_start..member_end
        } else if is_first {
            member_start..self.find_comma_after(member_end)
        } else {
            self.find_comma_before(member_start)..member_end
        }
    }

    /// Replace `old_entry_count` description entries at `entry_index`, and the buffer
    /// bytes in `old_json_range`, with a fragment (already serialized to bytes with its
    /// own 0-based description). Every mutation funnels through this one routine.
    fn splice_value(
        &mut self,
        entry_index: usize,
        old_entry_count: usize,
        old_json_range: Range<usize>,
        fragment_bytes: Vec<u8>,
        mut fragment_description: Description,
        member_count_delta: i64,
    ) {
        let byte_delta = fragment_bytes.len() as isize - old_json_range.len() as isize;
        fragment_description.advance_all_json_offsets(old_json_range.start as i64);

        self.buffer.splice(old_json_range, fragment_bytes);
        self.description.apply_splice(
            entry_index,
            old_entry_count,
            fragment_description.as_raw_entries(),
            byte_delta,
            member_count_delta,
        );
    }

    fn replace_value_at(&mut self, value_index: usize, value: &JSONValue) -> Result<(), DocumentError> {
        let (json_offset, json_length) = self.description.json_bounds_at(value_index);
        let old_entry_count = self.description.index_length_at(value_index) as usize;
        let (fragment_bytes, fragment_description) = value.to_fragment()?;

        self.splice_value(
            value_index,
            old_entry_count,
            json_offset..json_offset + json_length,
            fragment_bytes,
            fragment_description,
            0,
        );
        Ok(())
    }

    fn insert_member(&mut self, key: &str, value: &JSONValue) -> Result<(), DocumentError> {
        let needs_leading_comma = self.root_member_count() > 0;
        let (fragment_bytes, fragment_description) = build_member_fragment(key, value, needs_leading_comma)?;
        let insertion_point = self.insertion_point();
        let entry_index = self.description.entry_count();

        self.splice_value(entry_index, 0, insertion_point..insertion_point, fragment_bytes, fragment_description, 1);
        Ok(())
    }

    fn remove_member(&mut self, key_index: usize, value_index: usize) -> Result<(), DocumentError> {
        let is_first = key_index == 1;
        let member_count = self.root_member_count();
        let key_start = self.description.json_offset_at(key_index) as usize;
        let (value_offset, value_length) = self.description.json_bounds_at(value_index);
        let member_end = value_offset + value_length;

        let range = self.removal_range(is_first, member_count, key_start, member_end);
        let entry_count = 1 + self.description.index_length_at(value_index) as usize;

        self.splice_value(key_index, entry_count, range, Vec::new(), Description::new(), -1);
        Ok(())
    }

    fn append_element(&mut self, value: &JSONValue) -> Result<(), DocumentError> {
        let needs_leading_comma = self.root_member_count() > 0;
        let (value_bytes, mut value_description) = value.to_fragment()?;

        let mut bytes = Vec::with_capacity(value_bytes.len() + 1);
        if needs_leading_comma {
            bytes.push(b',');
        }
        let value_start = bytes.len();
        bytes.extend_from_slice(&value_bytes);
        value_description.advance_all_json_offsets(value_start as i64);

        let insertion_point = self.insertion_point();
        let entry_index = self.description.entry_count();

        self.splice_value(entry_index, 0, insertion_point..insertion_point, bytes, value_description, 1);
        Ok(())
    }

    fn remove_element(&mut self, index: usize, value_index: usize) -> Result<(), DocumentError> {
        let is_first = index == 0;
        let member_count = self.root_member_count();
        let (value_offset, value_length) = self.description.json_bounds_at(value_index);
        let member_end = value_offset + value_length;

        let range = self.removal_range(is_first, member_count, value_offset, member_end);
        let entry_count = self.description.index_length_at(value_index) as usize;

        self.splice_value(value_index, entry_count, range, Vec::new(), Description::new(), -1);
        Ok(())
    }
}

/// Assemble a standalone `"key":value` fragment, with a leading comma when it isn't
/// going to be the container's only member.
fn build_member_fragment(key: &str, value: &JSONValue, needs_leading_comma: bool) -> Result<(Vec<u8>, Description), DocumentError> {
    let mut bytes = Vec::new();
    if needs_leading_comma {
        bytes.push(b',');
    }

    let key_start = bytes.len();
    decode::escape_string_into(&mut bytes, key);
    let key_len = bytes.len() - key_start;
    bytes.push(b':');

    let value_start = bytes.len();
    let (value_bytes, mut value_description) = value.to_fragment()?;
    bytes.extend_from_slice(&value_bytes);

    let has_escape = key.bytes().any(|b| b == b'"' || b == b'\\' || b < 0x20);
    let key_entry_type = if has_escape { EntryType::StringWithEscaping } else { EntryType::String };

    let mut description = Description::new();
    description.push_leaf_entry(key_entry_type, key_start, key_len);
    value_description.advance_all_json_offsets(value_start as i64);
    description.append_raw_entries(value_description.as_raw_entries());

    Ok((bytes, description))
}

/// A mutable JSON object: a document whose root is `{ ... }`.
#[derive(Debug, Clone)]
pub struct JSONObject {
    core: DocumentCore,
}

impl JSONObject {
    /// An empty object, `{}`.
    pub fn new() -> Self {
        JSONObject { core: DocumentCore::empty(RootKind::Object) }
    }

    /// Parse `input` as a JSON object. Fails if the root value is not an object.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self, ParseError> {
        Ok(JSONObject { core: DocumentCore::parse(input.as_ref(), RootKind::Object)? })
    }

    pub fn len(&self) -> usize {
        self.core.root_member_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All top-level keys, in source order.
    pub fn keys(&self) -> Result<Vec<String>, DocumentError> {
        self.core
            .object_members()
            .into_iter()
            .map(|(key_index, _)| self.core.decode_key(key_index).map_err(DocumentError::from))
            .collect()
    }

    /// Iterate top-level `(key, value)` pairs, in source order, decoding each member
    /// lazily as the iterator advances rather than up front: a bad member (a lone
    /// surrogate, a number that overflows to infinity) only surfaces as an `Err` for
    /// that member's own step, and never stops an earlier member from being read.
    pub fn entries<'brw>(&'brw self) -> impl Iterator<Item = Result<(String, JSONValue), DocumentError>> + 'brw {
        struct Entries<'brw> {
            core: &'brw DocumentCore,
            next_index: usize,
            remaining: u32,
        }

        impl<'brw> Iterator for Entries<'brw> {
            type Item = Result<(String, JSONValue), DocumentError>;

            fn next(&mut self) -> Option<Self::Item> {
                if self.remaining == 0 {
                    return None;
                }
                self.remaining -= 1;

                let key_index = self.next_index;
                let value_index = key_index + 1;
                self.next_index = self.core.description.skip_index(value_index);

                Some((|| {
                    let key = self.core.decode_key(key_index)?;
                    let value = self.core.decode_value(value_index)?;
                    Ok((key, value))
                })())
            }
        }

        Entries {
            core: &self.core,
            next_index: 1,
            remaining: self.core.root_member_count(),
        }
    }

    /// Look up `key`. Returns `Ok(None)` if absent rather than an error.
    pub fn get(&self, key: &str) -> Result<Option<JSONValue>, DocumentError> {
        match self.core.find_member(key)? {
            Some((_, value_index)) => self.core.decode_value(value_index).map(Some),
            None => Ok(None),
        }
    }

    /// Set `key` to `value`, updating the first matching member in place or appending a
    /// new one if `key` is absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JSONValue>) -> Result<(), DocumentError> {
        let key = key.into();
        let value = value.into();

        match self.core.find_member(&key)? {
            Some((_, value_index)) => self.core.replace_value_at(value_index, &value),
            None => self.core.insert_member(&key, &value),
        }
    }

    /// Remove `key`'s member, if present. A no-op if `key` is absent.
    pub fn remove(&mut self, key: &str) -> Result<(), DocumentError> {
        if let Some((key_index, value_index)) = self.core.find_member(key)? {
            self.core.remove_member(key_index, value_index)
        } else {
            Ok(())
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.core.buffer
    }

    #[cfg(feature = "serde_json")]
    pub fn to_value(&self) -> Result<serde_json::Value, DocumentError> {
        let mut map = serde_json::Map::with_capacity(self.len());
        for entry in self.entries() {
            let (key, value) = entry?;
            map.insert(key, value.to_serde_value()?);
        }
        Ok(serde_json::Value::Object(map))
    }

    pub(crate) fn raw_bytes(&self) -> &[u8] {
        &self.core.buffer
    }

    pub(crate) fn raw_description(&self) -> &Description {
        &self.core.description
    }
}

impl Default for JSONObject {
    fn default() -> Self {
        JSONObject::new()
    }
}

impl fmt::Display for JSONObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.core.as_str())
    }
}

/// Semantic equality: same key set, recursively equal values, independent of source
/// order or duplicate-key bookkeeping. A member that fails to decode (a lone
/// surrogate, a number that overflows to infinity) makes the documents unequal rather
/// than panicking — decode failures are an ordinary `DocumentError`, not a broken
/// index invariant.
impl PartialEq for JSONObject {
    fn eq(&self, other: &Self) -> bool {
        let a: Result<Vec<_>, _> = self.entries().collect();
        let b: Result<Vec<_>, _> = other.entries().collect();

        match (a, b) {
            (Ok(a), Ok(b)) => a.len() == b.len() && a.iter().all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2)),
            _ => false,
        }
    }
}

/// A mutable JSON array: a document whose root is `[ ... ]`.
#[derive(Debug, Clone)]
pub struct JSONArray {
    core: DocumentCore,
}

impl JSONArray {
    /// An empty array, `[]`.
    pub fn new() -> Self {
        JSONArray { core: DocumentCore::empty(RootKind::Array) }
    }

    /// Parse `input` as a JSON array. Fails if the root value is not an array.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self, ParseError> {
        Ok(JSONArray { core: DocumentCore::parse(input.as_ref(), RootKind::Array)? })
    }

    pub fn len(&self) -> usize {
        self.core.root_member_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate elements, in source order, decoding each one lazily as the iterator
    /// advances rather than up front — same reasoning as [`JSONObject::entries`].
    pub fn elements<'brw>(&'brw self) -> impl Iterator<Item = Result<JSONValue, DocumentError>> + 'brw {
        struct Elements<'brw> {
            core: &'brw DocumentCore,
            next_index: usize,
            remaining: u32,
        }

        impl<'brw> Iterator for Elements<'brw> {
            type Item = Result<JSONValue, DocumentError>;

            fn next(&mut self) -> Option<Self::Item> {
                if self.remaining == 0 {
                    return None;
                }
                self.remaining -= 1;

                let value_index = self.next_index;
                self.next_index = self.core.description.skip_index(value_index);

                Some(self.core.decode_value(value_index))
            }
        }

        Elements {
            core: &self.core,
            next_index: 1,
            remaining: self.core.root_member_count(),
        }
    }

    /// Read the element at `index`, failing with [`DocumentError::IndexOutOfRange`] if
    /// it's out of bounds.
    pub fn get(&self, index: usize) -> Result<JSONValue, DocumentError> {
        let elements = self.core.array_elements();
        let value_index = *elements
            .get(index)
            .ok_or(DocumentError::IndexOutOfRange { index, length: elements.len() })?;
        self.core.decode_value(value_index)
    }

    /// Set the element at `index`. `index == len()` appends; anything further out of
    /// range fails with [`DocumentError::IndexOutOfRange`].
    pub fn set(&mut self, index: usize, value: impl Into<JSONValue>) -> Result<(), DocumentError> {
        let value = value.into();
        let count = self.len();

        if index < count {
            let value_index = self.core.array_elements()[index];
            self.core.replace_value_at(value_index, &value)
        } else if index == count {
            self.core.append_element(&value)
        } else {
            Err(DocumentError::IndexOutOfRange { index, length: count })
        }
    }

    /// Remove the element at `index`, failing with [`DocumentError::IndexOutOfRange`]
    /// if it's out of bounds.
    pub fn remove(&mut self, index: usize) -> Result<(), DocumentError> {
        let elements = self.core.array_elements();
        let value_index = *elements
            .get(index)
            .ok_or(DocumentError::IndexOutOfRange { index, length: elements.len() })?;
        self.core.remove_element(index, value_index)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.core.buffer
    }

    #[cfg(feature = "serde_json")]
    pub fn to_value(&self) -> Result<serde_json::Value, DocumentError> {
        let mut values = Vec::with_capacity(self.len());
        for element in self.elements() {
            values.push(element?.to_serde_value()?);
        }
        Ok(serde_json::Value::Array(values))
    }

    pub(crate) fn raw_bytes(&self) -> &[u8] {
        &self.core.buffer
    }

    pub(crate) fn raw_description(&self) -> &Description {
        &self.core.description
    }
}

impl Default for JSONArray {
    fn default() -> Self {
        JSONArray::new()
    }
}

impl fmt::Display for JSONArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.core.as_str())
    }
}

/// Semantic equality: same length, recursively equal values in order. As with
/// [`JSONObject`]'s `PartialEq`, an element that fails to decode makes the arrays
/// unequal rather than panicking.
impl PartialEq for JSONArray {
    fn eq(&self, other: &Self) -> bool {
        let a: Result<Vec<_>, _> = self.elements().collect();
        let b: Result<Vec<_>, _> = other.elements().collect();

        match (a, b) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
