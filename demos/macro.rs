//! Building documents with the ini! macro.
//!
//! Run with: cargo run --example macro

use datafile::ini;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let workers = 4;

    let mut doc = ini! {
        "" => { "Name": "demo" },
        "Server" => {
            "Host": "0.0.0.0",
            "Port": 8080,
            "Workers": workers * 2,
        },
        "Features" => {
            "Compression": true,
            "Ratio": 0.75,
        },
    };

    doc.set_section_comment("Features", "Toggle optional behaviour")?;
    println!("{doc}");

    assert_eq!(doc.get_int("workers", "server")?, 8);
    assert!(doc.get_bool("compression", "features")?);
    println!("✓ Built {} keys in {} sections", doc.key_count(), doc.section_count());

    Ok(())
}
