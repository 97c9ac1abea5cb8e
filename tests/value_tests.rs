use tomlkit::{parse_document, render, Array, Kind, Table, Value};

#[test]
fn test_array_mutation() {
    let array: Array = vec![
        Value::from("Hello"),
        Value::from("World"),
        Value::from(1234567890),
        Value::from(134509.25043),
        Value::from(true),
    ]
    .into();
    assert_eq!(array.len(), 5);

    array.push("appended");
    assert_eq!(array.len(), 6);
    assert_eq!(array.get(0), Some(Value::from("Hello")));
    assert_eq!(array.get(5), Some(Value::from("appended")));

    let removed = array.remove(1);
    assert_eq!(removed, Some(Value::from("World")));
    assert_eq!(array.len(), 5);
    assert_eq!(array.get(1), Some(Value::from(1234567890)));
    assert_eq!(array.get(4), Some(Value::from("appended")));

    assert_eq!(array.remove(10), None);
    assert_eq!(array.len(), 5);
}

#[test]
fn test_handles_alias_the_same_container() {
    let doc = parse_document("[server]\nports = [8080]").unwrap();
    let server = doc.get("server").unwrap();
    let ports = server.get("ports").unwrap();

    ports.as_array().unwrap().push(8081);
    server.set("host", "localhost");

    let again = doc.get("server").unwrap();
    assert_eq!(again.get("ports").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(again.get("host"), Some(Value::from("localhost")));
    assert!(again.as_table().unwrap().ptr_eq(server.as_table().unwrap()));
}

#[test]
fn test_clone_aliases_deep_clone_copies() {
    let table = Table::new();
    table.insert("a", 1);

    let alias = table.clone();
    let copy = table.deep_clone();
    alias.insert("b", 2);

    assert_eq!(table.len(), 2);
    assert_eq!(copy.len(), 1);
    assert!(table.ptr_eq(&alias));
    assert!(!table.ptr_eq(&copy));
}

#[test]
fn test_same_container_in_two_places() {
    let shared = Table::new();
    shared.insert("x", 1);

    let doc = Table::new();
    doc.insert("left", shared.clone());
    doc.insert("right", shared.clone());
    shared.insert("y", 2);

    assert_eq!(doc.get("left").unwrap().get("y"), Some(Value::from(2)));
    assert_eq!(doc.get("right").unwrap().get("y"), Some(Value::from(2)));
    assert_eq!(render(&doc), "[left]\nx = 1\ny = 2\n\n[right]\nx = 1\ny = 2\n");
}

#[test]
fn test_inserting_a_container_into_itself_copies_it() {
    let table = Table::new();
    table.insert("a", 1);
    table.insert("me", table.clone());

    let inner = table.get("me").unwrap();
    assert!(!inner.as_table().unwrap().ptr_eq(&table));
    assert_eq!(inner.get("a"), Some(Value::from(1)));
    assert_eq!(inner.get("me"), None);

    let array = Array::new();
    array.push(1);
    array.push(array.clone());
    assert_eq!(array.len(), 2);
    assert_eq!(array.get(1).unwrap().as_array().unwrap().len(), 1);
}

#[test]
fn test_table_equality_ignores_order() {
    let a = parse_document("x = 1\ny = 'two'").unwrap();
    let b = parse_document("y = 'two'\nx = 1").unwrap();
    let c = parse_document("x = 1\ny = 'three'").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_array_equality_respects_order() {
    let a: Array = vec![1, 2].into();
    let b: Array = vec![2, 1].into();
    assert_ne!(a, b);
    assert_eq!(a, Array::from(vec![1, 2]));
}

#[test]
fn test_mismatched_subscripts_are_no_ops() {
    let array = Value::from(vec![1, 2, 3]);
    assert_eq!(array.get("key"), None);
    assert!(!array.set("key", 4));
    assert!(!array.set(3, 4));
    assert_eq!(array.get(3), None);
    assert!(array.set(0, 10));
    assert_eq!(array.get(0), Some(Value::from(10)));

    let table = Value::Table(Table::new());
    assert_eq!(table.get(0), None);
    assert!(!table.set(0, 1));
    assert!(table.set("k", 1));

    let scalar = Value::from(7);
    assert_eq!(scalar.get("k"), None);
    assert!(!scalar.set("k", 1));
    assert_eq!(scalar, Value::from(7));
}

#[test]
fn test_kinds_and_accessors() {
    let doc = parse_document(
        "b = true\ni = 1\nf = 1.5\ns = 'x'\nd = 2021-05-20\nt = 04:27:05\ndt = 2021-05-20T04:27:05Z\na = []\n[tb]",
    )
    .unwrap();
    let kinds: Vec<Kind> = doc.iter().map(|(_, v)| v.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Kind::Boolean,
            Kind::Integer,
            Kind::Float,
            Kind::String,
            Kind::Date,
            Kind::Time,
            Kind::DateTime,
            Kind::Array,
            Kind::Table,
        ]
    );

    let int = doc.get("i").unwrap();
    assert_eq!(int.as_integer(), Some(1));
    assert_eq!(int.as_float(), None);
    assert_eq!(doc.get("s").unwrap().as_str(), Some("x"));
    assert_eq!(doc.get("dt").unwrap().type_name(), "date-time");
}

#[test]
fn test_array_insert_past_end_appends() {
    let array: Array = vec![1, 2].into();
    array.insert(0, 0);
    array.insert(99, 3);
    assert_eq!(array, Array::from(vec![0, 1, 2, 3]));
}

#[test]
fn test_value_display_is_inline_toml() {
    let value = tomlkit::toml_value!({ "a": [1, "two"], "b": { "c": true } });
    assert_eq!(value.to_string(), "{ a = [ 1, 'two' ], b = { c = true } }");
}
