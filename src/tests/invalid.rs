use crate::{DocumentError, ErrorKind, JSONArray, JSONObject, Reason};

#[test]
fn err_missing_value() {
    let err = JSONObject::parse(br#"{"a":}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedValue));
    assert_eq!(err.position.column, 6);
}

#[test]
fn err_trailing_comma_object() {
    let err = JSONObject::parse(br#"{"a":1,}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EndOfObject);
}

#[test]
fn err_trailing_comma_array() {
    let err = JSONArray::parse(b"[1,2,]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::EndOfObject);
}

#[test]
fn err_missing_colon() {
    let err = JSONObject::parse(br#"{"a" 1}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedColon));
}

#[test]
fn err_missing_comma() {
    let err = JSONObject::parse(br#"{"a":1 "b":2}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedComma));
}

#[test]
fn err_unterminated_object() {
    let err = JSONObject::parse(br#"{"a":1"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken(Reason::ExpectedObjectClose));
}

#[test]
fn err_unterminated_array() {
    let err = JSONArray::parse(b"[1,2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken(Reason::ExpectedArrayClose));
}

#[test]
fn err_missing_key() {
    let err = JSONObject::parse(br#"{1:2}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedObjectKey));
}

#[test]
fn err_root_not_object() {
    let err = JSONObject::parse(b"[1,2,3]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTopLevelObject);
}

#[test]
fn err_root_not_array() {
    let err = JSONArray::parse(br#"{"a":1}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTopLevelObject);
}

#[test]
fn err_root_scalar() {
    let err = JSONObject::parse(b"42").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTopLevelObject);
}

#[test]
fn err_trailing_garbage() {
    let err = JSONObject::parse(br#"{"a":1} garbage"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedTopLevelObject));
}

#[test]
fn err_invalid_literal() {
    let err = JSONObject::parse(br#"{"a":tru}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
}

#[test]
fn err_unterminated_string() {
    let err = JSONObject::parse(b"{\"a\":\"unterminated}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingData);
}

#[test]
fn err_lone_high_surrogate() {
    let doc = JSONObject::parse(br#"{"a":"\ud800"}"#).unwrap();
    match doc.get("a").unwrap_err() {
        DocumentError::Parse(p) => assert_eq!(p.kind, ErrorKind::InvalidLiteral),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn err_lone_low_surrogate() {
    let doc = JSONObject::parse(br#"{"a":"\udc00"}"#).unwrap();
    match doc.get("a").unwrap_err() {
        DocumentError::Parse(p) => assert_eq!(p.kind, ErrorKind::InvalidLiteral),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn err_non_finite_number() {
    let doc = JSONObject::parse(br#"{"a":1e400}"#).unwrap();
    match doc.get("a").unwrap_err() {
        DocumentError::NonFiniteNumber => {}
        other => panic!("expected a non-finite number error, got {:?}", other),
    }
}

#[test]
fn err_depth_exceeded() {
    let mut input = String::new();
    for _ in 0..600 {
        input.push('[');
    }
    for _ in 0..600 {
        input.push(']');
    }

    let err = JSONArray::parse(input.as_bytes()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken(Reason::ExpectedValue));
}

#[test]
fn index_out_of_range_on_read() {
    let arr = JSONArray::parse(b"[1,2]").unwrap();
    match arr.get(5).unwrap_err() {
        DocumentError::IndexOutOfRange { index: 5, length: 2 } => {}
        other => panic!("expected an out-of-range error, got {:?}", other),
    }
}

#[test]
fn index_out_of_range_on_write() {
    let mut arr = JSONArray::parse(b"[1,2]").unwrap();
    match arr.set(5, 3i64).unwrap_err() {
        DocumentError::IndexOutOfRange { index: 5, length: 2 } => {}
        other => panic!("expected an out-of-range error, got {:?}", other),
    }
}

#[test]
fn wrong_root_shape_accessor() {
    let doc = JSONObject::parse(br#"{"a":1}"#).unwrap();
    let value = doc.get("a").unwrap().unwrap();
    match value.as_object().unwrap_err() {
        DocumentError::ExpectedObject => {}
        other => panic!("expected ExpectedObject, got {:?}", other),
    }
}

#[test]
fn equality_does_not_panic_on_undecodable_member() {
    // a lone surrogate parses fine (the tokenizer never decodes strings) but fails to
    // decode lazily on read — equality must report `false`, not panic, when it hits one
    let a = JSONObject::parse(br#"{"a":"\ud800"}"#).unwrap();
    let b = JSONObject::parse(br#"{"a":"\ud800"}"#).unwrap();
    assert_ne!(a, b);

    let arr_a = JSONArray::parse(br#"["\ud800"]"#).unwrap();
    let arr_b = JSONArray::parse(br#"["\ud800"]"#).unwrap();
    assert_ne!(arr_a, arr_b);
}
