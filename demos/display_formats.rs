//! Integers written in hexadecimal, octal and binary.
//!
//! Run with: cargo run --example display_formats

use serde::{Deserialize, Serialize};
use std::error::Error;
use tomlkit::{from_str, to_string, Integer, IntegerFormat, Table};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Permissions {
    owner: String,
    mode: Integer,
    flags: Integer,
    color: Integer,
}

fn main() -> Result<(), Box<dyn Error>> {
    let perms = Permissions {
        owner: "root".to_string(),
        mode: Integer::new(0o755).with_format(IntegerFormat::Octal),
        flags: Integer::new(0b1010_1001).with_format(IntegerFormat::Binary),
        color: Integer::new(0xEA64)
            .with_format(IntegerFormat::Hexadecimal)
            .with_uppercase(true),
    };

    let toml = to_string(&perms)?;
    println!("TOML output:\n{}", toml);

    // Formats are layout only; values compare equal either way
    let back: Permissions = from_str(&toml)?;
    assert_eq!(perms, back);
    println!("✓ Round-trip successful (formats ignored by equality)");

    // Literals keep their base when parsed directly
    let parsed: Integer = "0xdead_beef".parse()?;
    println!("{} has value {}", parsed, parsed.value());

    // Negative values have no prefixed form
    let table = Table::new();
    table.insert("offset", Integer::new(-16).with_format(IntegerFormat::Hexadecimal));
    println!("{}", table);

    Ok(())
}
