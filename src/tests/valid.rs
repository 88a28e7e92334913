use super::some;

use crate::{JSONObject, JSONValue};

fn assert_matches_serde(ours: &JSONValue, expected: &serde_json::Value) {
    match (ours, expected) {
        (JSONValue::Null, serde_json::Value::Null) => {}
        (JSONValue::Bool(a), serde_json::Value::Bool(b)) => assert_eq!(a, b),
        (JSONValue::Integer(a), serde_json::Value::Number(n)) => {
            assert_eq!(*a as f64, n.as_f64().unwrap());
        }
        (JSONValue::Floating(a), serde_json::Value::Number(n)) => {
            assert!((*a - n.as_f64().unwrap()).abs() < 1e-6, "{} != {:?}", a, n);
        }
        (JSONValue::String(a), serde_json::Value::String(b)) => assert_eq!(a, b),
        (JSONValue::Array(arr), serde_json::Value::Array(items)) => {
            let elements: Vec<_> = arr.elements().map(|e| e.unwrap()).collect();
            assert_eq!(elements.len(), items.len());
            for (e, i) in elements.iter().zip(items) {
                assert_matches_serde(e, i);
            }
        }
        (JSONValue::Object(obj), serde_json::Value::Object(map)) => {
            let entries: Vec<_> = obj.entries().map(|e| e.unwrap()).collect();
            assert_eq!(entries.len(), map.len());
            for (k, v) in &entries {
                assert_matches_serde(v, map.get(k).unwrap_or_else(|| panic!("missing key {}", k)));
            }
        }
        (ours, expected) => panic!("mismatched shapes: {:?} vs {:?}", ours, expected),
    }
}

#[test]
fn round_trip_generated() {
    let iterations = {
        #[cfg(debug)]
        {
            100
        }

        #[cfg(not(debug))]
        {
            500
        }
    };

    for _ in 0..iterations {
        let input = some::json_object();

        let expected: serde_json::Value =
            serde_json::from_str(&input).unwrap_or_else(|e| panic!("generated invalid json `{}`: {}", input, e));

        // a second, independent parser should also accept whatever we generated
        json::parse(&input).unwrap_or_else(|e| panic!("json crate rejected `{}`: {}", input, e));

        let doc = JSONObject::parse(input.as_bytes()).unwrap_or_else(|e| panic!("failed to parse `{}`: {}", input, e));
        assert_matches_serde(&JSONValue::Object(doc.clone()), &expected);

        // idempotent serialization (property 2): reparsing our own output is
        // semantically identical to the document we serialized
        let reparsed = JSONObject::parse(doc.as_bytes()).unwrap();
        assert_eq!(doc, reparsed);
    }
}

#[test]
fn round_trip_empty_object() {
    let doc = JSONObject::parse(b"{}").unwrap();
    assert_eq!(doc.len(), 0);
    assert_eq!(doc.as_bytes(), b"{}");
}

#[test]
fn round_trip_nested_containers() {
    let doc = JSONObject::parse(br#"{"a":{"b":[1,2,{"c":3}]}}"#).unwrap();

    let a = doc.get("a").unwrap().unwrap().into_object().unwrap();
    let b = a.get("b").unwrap().unwrap().into_array().unwrap();
    assert_eq!(b.len(), 3);

    let nested = b.get(2).unwrap().into_object().unwrap();
    assert_eq!(nested.get("c").unwrap(), Some(JSONValue::Integer(3)));
}

#[test]
fn whitespace_is_skipped_between_tokens() {
    let doc = JSONObject::parse(b"  {  \"a\" : 1 , \"b\" : 2  }  ").unwrap();
    assert_eq!(doc.get("a").unwrap(), Some(JSONValue::Integer(1)));
    assert_eq!(doc.get("b").unwrap(), Some(JSONValue::Integer(2)));
}

#[test]
fn semantic_equality_ignores_key_order() {
    let a = JSONObject::parse(br#"{"a":1,"b":2}"#).unwrap();
    let b = JSONObject::parse(br#"{"b":2,"a":1}"#).unwrap();
    assert_eq!(a, b);
}

#[test]
fn cross_numeric_equality() {
    assert_eq!(JSONValue::Integer(29), JSONValue::Floating(29.0));
    assert_eq!(JSONValue::Floating(29.0), JSONValue::Integer(29));
    assert_ne!(JSONValue::Integer(29), JSONValue::Floating(29.5));
}

#[test]
fn integer_overflow_degrades_to_floating() {
    let doc = JSONObject::parse(br#"{"n":123456789012345678901234567890}"#).unwrap();
    match doc.get("n").unwrap().unwrap() {
        JSONValue::Floating(_) => {}
        other => panic!("expected an overflowed integer to degrade to floating, got {:?}", other),
    }
}
