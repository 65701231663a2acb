//! Load, query, modify and save an INI file.
//!
//! Run with: cargo run --example simple

use datafile::{Document, Options};
use std::error::Error;

const SETTINGS: &str = "\
Name=Joe User

;
; Settings unique to this server
;
[ServerSettings]
Port=1200
IP=127.0.0.1
Secure=yes
";

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("datafile-simple.ini");
    std::fs::write(&path, SETTINGS)?;

    let mut doc = Document::open(&path, Options::default());
    println!(
        "Loaded {} sections and {} keys from {}",
        doc.section_count(),
        doc.key_count(),
        path.display()
    );

    // Names are matched ignoring case
    let port = doc.get_int("port", "serversettings")?;
    let secure = doc.get_bool("SECURE", "ServerSettings")?;
    println!("Port={port} Secure={secure}");

    doc.set_int("Port", port + 1, "", "ServerSettings")?;
    doc.set_value("Theme", "dark", "Added by the demo", "UserSettings")?;
    assert!(doc.is_dirty());

    doc.save()?;
    println!("\nSaved:\n{}", std::fs::read_to_string(&path)?);

    let reloaded = Document::open(&path, Options::default());
    assert_eq!(reloaded.get_int("Port", "ServerSettings")?, port + 1);
    println!("✓ Round-trip successful");

    std::fs::remove_file(&path)?;
    Ok(())
}
