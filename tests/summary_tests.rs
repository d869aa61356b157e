use std::cell::RefCell;
use std::rc::Rc;

use mapping_summary::{
    describe_shape, parse_value, render, shallow_size, summarize, Mapping,
    Snapshot, SummaryError, Value, DEFAULT_MAX_DEPTH,
};
use pretty_assertions::assert_eq;

fn parse_and_summarize(s: &str) -> (Value, Snapshot) {
    let value = parse_value(s).unwrap();
    println!("Summarize: {value}");
    let snapshot = summarize(&value).unwrap();
    (value, snapshot)
}

fn get(container: &Value, key: &str) -> Value {
    let Value::Map(mapping) = container else {
        panic!("Not a mapping: {container}")
    };
    mapping
        .borrow()
        .get(&key.into())
        .cloned()
        .unwrap()
}

#[test]
fn test_mixed_mapping() {
    let (value, snapshot) =
        parse_and_summarize("{\"a\": [1, \"b\", {2}], \"b\": (1, 2)}");

    assert_eq!(snapshot.key_count(), 2);
    assert_eq!(
        snapshot.shape_of(&"a".into()),
        Some("Sequence<Union[Integer,Text,Set<Integer>]>")
    );
    assert_eq!(
        snapshot.shape_of(&"b".into()),
        Some("Tuple[Integer,Integer]")
    );

    for key in ["a", "b"] {
        let size = snapshot.size_of(&key.into()).unwrap();
        assert!(size > 0);
        assert_eq!(size, shallow_size(&get(&value, key)));
    }
}

#[test]
fn test_empty_mapping() {
    let (_, snapshot) = parse_and_summarize("{}");

    assert_eq!(snapshot.key_count(), 0);
    assert_eq!(snapshot.shapes().len(), 0);
    assert_eq!(snapshot.sizes().len(), 0);
    assert_eq!(
        render(&snapshot),
        "Mapping summary: 0 keys (shallow sizes in bytes)"
    );
    assert_eq!(render(&snapshot).lines().count(), 1);
}

#[test]
fn test_shapes_match_describe_shape() {
    let (value, snapshot) =
        parse_and_summarize("{'x': {'y': [[[1.5]]]}, 'z': b'raw', 'w': c'?'}");

    for (key, shape) in snapshot.shapes() {
        let Value::Str(key) = key else {
            panic!("unexpected key {key}")
        };
        assert_eq!(
            shape,
            describe_shape(&get(&value, key), DEFAULT_MAX_DEPTH)
        );
    }
    assert_eq!(
        snapshot.shape_of(&"x".into()),
        Some("Mapping<Text,Sequence<Sequence<Sequence<...>>>>")
    );
}

#[test]
fn test_render_is_idempotent() {
    let text = "{'k': [nil, true, 3], (1, 'two'): {'n': 1.0}}";
    let (value, first) = parse_and_summarize(text);
    let second = summarize(&value).unwrap();

    assert_eq!(first.render(), second.render());
    assert_eq!(first.to_string(), first.render());
}

#[test]
fn test_snapshot_is_independent_of_later_mutation() {
    let (value, snapshot) = parse_and_summarize("{'a': [1, 2], 'b': 'text'}");
    let before = snapshot.render();

    let Value::Map(mapping) = &value else {
        unreachable!()
    };
    if let Value::List(items) = get(&value, "a") {
        items.borrow_mut().push("new".into());
    }
    mapping
        .borrow_mut()
        .insert("c".into(), Value::Nil)
        .unwrap();
    mapping.borrow_mut().remove(&"b".into());

    assert_eq!(snapshot.key_count(), 2);
    assert_eq!(snapshot.shape_of(&"a".into()), Some("Sequence<Integer>"));
    assert_eq!(snapshot.shape_of(&"b".into()), Some("Text"));
    assert_eq!(snapshot.shape_of(&"c".into()), None);
    assert_eq!(snapshot.render(), before);

    let after = summarize(&value).unwrap();
    assert_eq!(
        after.shape_of(&"a".into()),
        Some("Sequence<Union[Integer,Text]>")
    );
}

#[test]
fn test_self_referential_mapping() {
    let storage = Rc::new(RefCell::new(Mapping::new()));
    let value = Value::Map(storage.clone());
    storage
        .borrow_mut()
        .insert("me".into(), value.clone())
        .unwrap();

    let snapshot = summarize(&value).unwrap();
    assert_eq!(
        snapshot.shape_of(&"me".into()),
        Some("Mapping<Text,Mapping<Text,Mapping<Text,Mapping<...>>>>")
    );
    assert_eq!(value.to_string(), "{\"me\": {...}}");
}

#[test]
fn test_invalid_input() {
    let value = parse_value("[('a', 1)]").unwrap();
    let err = summarize(&value).unwrap_err();

    assert_eq!(
        err,
        SummaryError::InvalidInput {
            actual: "Sequence".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "invalid input: expected a Mapping, got Sequence"
    );
}
