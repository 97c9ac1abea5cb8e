use tomlkit::{render, toml_value, Array, Date, Integer, IntegerFormat, Table, Value};

#[test]
fn test_toml_value_booleans() {
    assert_eq!(toml_value!(true), Value::Boolean(true));
    assert_eq!(toml_value!(false), Value::Boolean(false));
}

#[test]
fn test_toml_value_numbers() {
    assert_eq!(toml_value!(42), Value::Integer(Integer::new(42)));
    assert_eq!(toml_value!(-123), Value::Integer(Integer::new(-123)));
    assert_eq!(toml_value!(3.5), Value::Float(3.5));
}

#[test]
fn test_toml_value_strings() {
    assert_eq!(toml_value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(toml_value!(""), Value::String(String::new()));
}

#[test]
fn test_toml_value_arrays() {
    assert_eq!(toml_value!([]), Value::Array(Array::new()));

    let numbers = toml_value!([1, 2, 3]);
    let expected: Array = vec![1, 2, 3].into();
    assert_eq!(numbers, Value::Array(expected));

    let mixed = toml_value!([1, "two", true, [3.0]]);
    assert_eq!(mixed.as_array().unwrap().len(), 4);
    assert_eq!(mixed.get(3).unwrap().get(0), Some(Value::Float(3.0)));
}

#[test]
fn test_toml_value_tables() {
    assert_eq!(toml_value!({}), Value::Table(Table::new()));

    let person = toml_value!({
        "name": "Alice",
        "age": 30,
        "address": {
            "city": "Paris",
            "zip": "75001"
        }
    });
    let table = person.as_table().unwrap();
    assert_eq!(table.keys(), vec!["name", "age", "address"]);
    assert_eq!(
        person.get("address").unwrap().get("city"),
        Some(Value::from("Paris"))
    );
}

#[test]
fn test_toml_value_expressions() {
    let born = Date::new(1815, 12, 10);
    let mask = Integer::new(0o755).with_format(IntegerFormat::Octal);
    let value = toml_value!({
        "born": born,
        "mode": mask,
        "tags": (vec!["a", "b"])
    });
    assert_eq!(value.get("born"), Some(Value::Date(born)));
    assert_eq!(
        render(value.as_table().unwrap()),
        "born = 1815-12-10\nmode = 0o755\ntags = [ 'a', 'b' ]\n"
    );
}

#[test]
fn test_toml_value_builds_fresh_containers() {
    let make = || toml_value!({ "items": [1] });
    let first = make();
    let second = make();
    first.get("items").unwrap().as_array().unwrap().push(2);
    assert_eq!(second.get("items").unwrap().as_array().unwrap().len(), 1);
}
