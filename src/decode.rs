/*!
Converts a (buffer, bounds, type) triple into a native value, and back.

The tokenizer validates structure but never decodes: a string entry's bytes are not
unescaped, a number's bytes are not parsed, until something actually reads the value.
Decoding happens here, lazily, at read time.
*/

use crate::description::EntryType;
use crate::error::{DocumentError, ErrorKind, ParseError, Position};
use crate::std_ext::char::try_from_utf16_surrogate_pair;

/// Recompute a `(line, column)` position for a byte offset, for errors raised during
/// lazy decoding rather than during the single forward pass the tokenizer makes.
pub(crate) fn position_of(buffer: &[u8], byte_offset: usize) -> Position {
    let mut line = 1;
    let mut column = 1;

    for &b in &buffer[..byte_offset.min(buffer.len())] {
        if b == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    Position { line, column }
}

fn lone_surrogate_error(buffer: &[u8], offset: usize) -> ParseError {
    ParseError {
        kind: ErrorKind::InvalidLiteral,
        position: position_of(buffer, offset),
        offending_byte: buffer.get(offset).copied(),
    }
}

/// Decode the string at `buffer[json_offset..json_offset+json_length)` (quotes
/// included in the span). `has_escape` comes from the entry's type, set once by the
/// tokenizer so this never has to scan ahead to find out.
pub(crate) fn decode_string(buffer: &[u8], json_offset: usize, json_length: usize, has_escape: bool) -> Result<String, ParseError> {
    let start = json_offset + 1;
    let end = json_offset + json_length - 1;
    let inner = get_unchecked!(buffer, start..end);

    if !has_escape {
        return Ok(from_utf8_unchecked!(inner).to_owned());
    }

    decode_escaped(inner, buffer, start)
}

fn read_hex4(bytes: &[u8], at: usize) -> u16 {
    let mut value: u16 = 0;
    for k in 0..4 {
        let byte = *get_unchecked!(bytes, at + k);
        let digit = (byte as char)
            .to_digit(16)
            .unwrap_or_else(|| internal_error!("tokenizer accepted a non-hex \\u digit"));
        value = value * 16 + digit as u16;
    }
    value
}

fn decode_escaped(inner: &[u8], buffer: &[u8], base_offset: usize) -> Result<String, ParseError> {
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut i = 0;

    while i < inner.len() {
        let b = inner[i];

        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        i += 1;
        match inner[i] {
            b'"' => {
                out.push(b'"');
                i += 1;
            }
            b'\\' => {
                out.push(b'\\');
                i += 1;
            }
            b'/' => {
                out.push(b'/');
                i += 1;
            }
            b'b' => {
                out.push(0x08);
                i += 1;
            }
            b'f' => {
                out.push(0x0C);
                i += 1;
            }
            b'n' => {
                out.push(b'\n');
                i += 1;
            }
            b'r' => {
                out.push(b'\r');
                i += 1;
            }
            b't' => {
                out.push(b'\t');
                i += 1;
            }
            b'u' => {
                i += 1;
                let high = read_hex4(inner, i);
                i += 4;

                let code_point = if (0xD800..=0xDBFF).contains(&high) {
                    if inner.get(i) != Some(&b'\\') || inner.get(i + 1) != Some(&b'u') {
                        return Err(lone_surrogate_error(buffer, base_offset + i));
                    }
                    let low = read_hex4(inner, i + 2);
                    i += 6;

                    try_from_utf16_surrogate_pair(high, low).map_err(|_| lone_surrogate_error(buffer, base_offset + i))?
                } else if (0xDC00..=0xDFFF).contains(&high) {
                    return Err(lone_surrogate_error(buffer, base_offset + i));
                } else {
                    char::from_u32(high as u32).ok_or_else(|| lone_surrogate_error(buffer, base_offset + i))?
                };

                let mut encode_buf = [0u8; 4];
                out.extend_from_slice(code_point.encode_utf8(&mut encode_buf).as_bytes());
            }
            _ => internal_error!("tokenizer accepted an invalid escape byte"),
        }
    }

    Ok(String::from_utf8(out).unwrap_or_else(|_| internal_error!("decoded JSON escape produced invalid utf8")))
}

/// A decoded JSON number: integers that overflow `i64` degrade to `Floating`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DecodedNumber {
    Integer(i64),
    Floating(f64),
}

pub(crate) fn decode_number(buffer: &[u8], json_offset: usize, json_length: usize, entry_type: EntryType) -> Result<DecodedNumber, DocumentError> {
    let raw = get_unchecked!(buffer, json_offset..json_offset + json_length);
    let text = from_utf8_unchecked!(raw);

    match entry_type {
        EntryType::Integer => match text.parse::<i64>() {
            Ok(v) => Ok(DecodedNumber::Integer(v)),
            Err(_) => {
                let v: f64 = text
                    .parse()
                    .unwrap_or_else(|_| internal_error!("tokenizer accepted a malformed number literal"));
                if !v.is_finite() {
                    return Err(DocumentError::NonFiniteNumber);
                }
                Ok(DecodedNumber::Floating(v))
            }
        },
        EntryType::FloatingNumber => {
            let v: f64 = text
                .parse()
                .unwrap_or_else(|_| internal_error!("tokenizer accepted a malformed number literal"));
            if !v.is_finite() {
                return Err(DocumentError::NonFiniteNumber);
            }
            Ok(DecodedNumber::Floating(v))
        }
        _ => internal_error!("decode_number called on a non-numeric entry"),
    }
}

/// Write `s` as a quoted, escaped JSON string into `out`.
///
/// Escapes `"`, `\`, and control bytes as `\uXXXX`; everything else — including
/// multi-byte UTF-8 sequences — is copied through verbatim.
pub(crate) fn escape_string_into(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');

    for b in s.bytes() {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            0x00..=0x1F => out.extend_from_slice(format!("\\u{:04x}", b).as_bytes()),
            _ => out.push(b),
        }
    }

    out.push(b'"');
}

#[inline]
pub(crate) fn serialize_integer(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(value.to_string().as_bytes());
}

pub(crate) fn serialize_floating(out: &mut Vec<u8>, value: f64) -> Result<(), DocumentError> {
    if !value.is_finite() {
        return Err(DocumentError::NonFiniteNumber);
    }

    out.extend_from_slice(value.to_string().as_bytes());
    Ok(())
}
