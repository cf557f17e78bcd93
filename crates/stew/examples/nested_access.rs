//! Example of dot-path access and signed encodings.
//!
//! cargo run --package stew --example nested_access

use stew::{Map, map};

fn main() -> Result<(), stew::Error> {
    let mut m = Map::from_json(r#"{"users": {"amy": {"name": "Amy"}}}"#)?;

    // m["users"]["bob"]["name"] = "Bob"
    m.set("users.bob.name", "Bob");
    m.merge_here(&map! { "count" => 2 });

    println!("{}", m.get_str("users.bob.name")?);
    println!("{}", m.to_json()?);

    let signed = m.signed_base64("secret")?;
    println!("{signed}");

    let restored = Map::from_signed_base64(&signed, "secret")?;
    println!("{}", restored.get_map("users")?.len());
    Ok(())
}
