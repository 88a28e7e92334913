use std::collections::HashMap;

use super::some::{self, ObjectOp};

use crate::{JSONObject, JSONValue};

#[test]
fn mutation_script_matches_model() {
    let mut known = Vec::new();
    let mut doc = JSONObject::new();
    let mut model: HashMap<String, JSONValue> = HashMap::new();

    for op in some::random_object_ops(&mut known, 200) {
        match op {
            ObjectOp::Set(key, value) => {
                doc.set(key.clone(), value.clone()).unwrap();
                model.insert(key, value);
            }
            ObjectOp::Remove(key) => {
                doc.remove(&key).unwrap();
                model.remove(&key);
            }
        }

        // every mutation leaves the buffer a valid, reparseable document
        let reparsed = JSONObject::parse(doc.as_bytes()).unwrap();
        assert_eq!(doc, reparsed);
    }

    assert_eq!(doc.len(), model.len());
    for (key, value) in &model {
        assert_eq!(doc.get(key).unwrap().as_ref(), Some(value));
    }
    for key in doc.keys().unwrap() {
        assert!(model.contains_key(&key), "document has key `{}` the model doesn't", key);
    }
}

#[test]
fn remove_of_absent_key_is_a_no_op() {
    let mut doc = JSONObject::parse(br#"{"a":1,"b":2}"#).unwrap();
    let before = doc.clone();

    doc.remove("nonexistent").unwrap();

    assert_eq!(doc, before);
    assert_eq!(doc.as_bytes(), before.as_bytes());
}

#[test]
fn set_then_remove_absent_key_restores_original() {
    let original = JSONObject::parse(br#"{"a":1,"b":2}"#).unwrap();
    let mut doc = original.clone();

    doc.set("c", 3i64).unwrap();
    doc.remove("c").unwrap();

    assert_eq!(doc, original);
}

#[test]
fn repeated_set_on_same_key_only_keeps_last_value() {
    let mut doc = JSONObject::new();
    doc.set("a", 1i64).unwrap();
    doc.set("a", 2i64).unwrap();
    doc.set("a", 3i64).unwrap();

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("a").unwrap(), Some(JSONValue::Integer(3)));
}
