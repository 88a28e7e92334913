/*!
# `seekjson`

A mutable, index-backed JSON document model. A one-pass tokenizer scans a JSON byte
buffer once to build a compact *description* — a packed side-index of value locations
and types — alongside the raw bytes. [`JSONObject`] and [`JSONArray`] read and edit
values through that index without re-parsing; edits mutate both the buffer and the
description in tandem, so the buffer stays a valid JSON serialization at all times.

## ⚠️ CAREFUL

The index is a hand-packed `Vec<u8>` of fixed-width records, and the hot paths read and
write it through unchecked slice/UTF-8 operations in release builds. Any changes to
`description.rs` or `buffer.rs` need to be checked against the `checked` cfg (run tests,
which always build checked) before shipping.
*/

#![cfg_attr(checked, deny(warnings))]
#![allow(clippy::question_mark)] // generates slow code

pub(crate) mod std_ext;

#[macro_use]
mod macros;

mod buffer;
mod decode;
mod description;
mod document;
mod error;
mod tokenizer;
mod value;

pub use document::{JSONArray, JSONObject};
pub use error::{DocumentError, ErrorKind, ParseError, Position, Reason};
pub use value::JSONValue;

#[cfg(test)]
mod tests;
