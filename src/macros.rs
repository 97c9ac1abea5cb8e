/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become block tables, arrays become single-line arrays, and any
/// other expression goes through `Value::from`.
///
/// ```rust
/// use tomlkit::{toml_value, Value};
///
/// let server = toml_value!({
///     "host": "localhost",
///     "ports": [8080, 8081],
///     "tls": { "enabled": true }
/// });
/// assert_eq!(server.get("ports").and_then(|p| p.get(0)), Some(Value::from(8080)));
/// ```
#[macro_export]
macro_rules! toml_value {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let array = $crate::Array::new();
        $(
            array.push($crate::toml_value!($elem));
        )*
        $crate::Value::Array(array)
    }};

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let table = $crate::Table::new();
        $(
            table.insert($key, $crate::toml_value!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
