//! Custom indicators, a strict policy and diagnostics.
//!
//! Run with: cargo run --example custom_options

use datafile::{Document, Level, Options, Policy};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // `#` or `;` start a comment, `:` or `=` separate keys from values
    let options = Options::new()
        .with_comment_indicators("#;")
        .with_equal_indicators(":=");

    let text = "# database\n[db]\nhost: localhost\nport = 5432\n";
    let doc = Document::parse_str_with_options(text, options.clone());
    println!("Parsed with '#' and ':':");
    println!("{doc}");

    // The first indicator of each set is used when writing
    assert!(doc.to_string().contains("port:5432"));

    // Strict documents only update what is already there
    let mut strict = Document::parse_str_with_options(text, options.with_policy(Policy::STRICT))
        .with_sink(|level: Level, message: &str| eprintln!("[{level}] {message}"));

    strict.set_int("port", 6543, "", "db")?;
    match strict.set_value("user", "admin", "", "db") {
        Ok(()) => println!("unexpected: key created"),
        Err(err) => println!("Refused: {err}"),
    }
    match strict.create_section("db", "") {
        Ok(()) => println!("unexpected: section created"),
        Err(err) => println!("Refused: {err}"),
    }

    // create_key may add keys even under a strict policy
    strict.create_key("user", "admin", "", "db")?;
    println!("\nStrict document after edits:\n{strict}");

    Ok(())
}
