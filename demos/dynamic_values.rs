//! Building and editing value trees at runtime.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use std::error::Error;
use tomlkit::{from_table, parse_document, render, to_value, toml_value, Table, Value};

#[derive(Debug, Serialize, Deserialize)]
struct Server {
    host: String,
    port: u16,
    features: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a tree with the toml_value! macro
    let config = toml_value!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "debug": true
    });
    println!("Config as TOML:\n{}", config);

    // Access values dynamically
    if let Some(host) = config.get("host") {
        println!("Accessing field 'host': {}", host);
    }
    if let Some(port) = config.get("port").and_then(|v| v.as_integer()) {
        println!("Accessing field 'port': {}", port);
    }

    // Handles share the container they point at
    let features = config.get("features").ok_or("no features")?;
    features.as_array().ok_or("features is not an array")?.push("metrics");
    println!(
        "Features after push through a second handle: {}\n",
        config.get("features").ok_or("no features")?
    );

    // Edit a parsed document and render it back
    let doc = parse_document("[server]\nhost = 'example.com'\nport = 443\nfeatures = []")?;
    let server = doc.get("server").ok_or("no server table")?;
    server.set("port", 8443);
    let owner = Table::new();
    owner.insert("name", "ops");
    doc.insert("owner", owner);
    println!("Edited document:\n{}", render(&doc));

    // Decode part of the tree into a struct
    let server: Server = from_table(server.as_table().ok_or("server is not a table")?)?;
    println!("Decoded: {:?}\n", server);

    // Convert an existing struct to a Value
    let value = to_value(&server)?;
    if let Value::Table(table) = &value {
        println!("Struct as a tree has keys {:?}", table.keys());
    }

    Ok(())
}
