//! Basic TOML encoding and decoding through serde.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use std::error::Error;
use tomlkit::{from_str, to_string, Date};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    joined: Date,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Team {
    name: String,
    users: Vec<User>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let team = Team {
        name: "Platform".to_string(),
        users: vec![
            User {
                id: 42,
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
                joined: Date::new(2021, 5, 20),
            },
            User {
                id: 43,
                name: "Bob Smith".to_string(),
                email: "bob@example.com".to_string(),
                joined: Date::new(2022, 1, 3),
            },
        ],
    };

    // Serialize to TOML
    let toml = to_string(&team)?;
    println!("TOML output:\n{}", toml);

    // Deserialize back to struct
    let team_back: Team = from_str(&toml)?;
    assert_eq!(team, team_back);
    println!("✓ Round-trip successful");

    // Decode errors name the offending key
    let broken = toml.replacen("id = 43", "id = 'forty-three'", 1);
    if let Err(e) = from_str::<Team>(&broken) {
        println!("✓ Expected error: {}", e);
    }

    Ok(())
}
