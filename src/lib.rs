//! # datafile
//!
//! An in-memory document model for INI files that keeps comments.
//!
//! ## What does it do?
//!
//! `datafile` loads an INI file into a [`Document`], lets you query and
//! change sections and keys with case-insensitive names, and writes the
//! document back with every section and key comment in place.
//!
//! ## Key Features
//!
//! - **Comment Preserving**: comments above headers and keys survive a load/save cycle
//! - **Case Insensitive**: `[Net]`, `[NET]` and `[net]` name the same section
//! - **Typed Accessors**: `get_int`, `get_bool`, `set_float` and the generic
//!   [`Document::get`] / [`Document::set`]
//! - **Explicit Policy**: whether setters may create missing sections or keys is
//!   a [`Policy`] value, not hidden state
//! - **Forgiving Parser**: malformed lines are skipped, never fatal
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! datafile = "0.1"
//! ```
//!
//! ### Reading and Writing
//!
//! ```rust
//! use datafile::Document;
//!
//! let text = "\
//! Name=Joe User
//!
//! ; Settings unique to this server
//! [ServerSettings]
//! Port=1200
//! ";
//!
//! let mut doc = Document::parse_str(text);
//! assert_eq!(doc.get_int("port", "serversettings").unwrap(), 1200);
//! assert_eq!(
//!     doc.section("ServerSettings").unwrap().comment(),
//!     "Settings unique to this server"
//! );
//!
//! doc.set_int("Port", 8080, "", "ServerSettings").unwrap();
//! assert!(doc.is_dirty());
//! assert!(doc.to_string().contains("Port=8080"));
//! ```
//!
//! ### Files
//!
//! ```rust,no_run
//! use datafile::{Document, Options};
//!
//! let mut doc = Document::open("settings.ini", Options::default());
//! doc.set_bool("Enabled", true, "", "Feature").unwrap();
//! doc.save().unwrap();
//! ```
//!
//! ### Strict Documents
//!
//! ```rust
//! use datafile::{Document, Error, Options, Policy};
//!
//! let mut doc = Document::parse_str_with_options(
//!     "[Known]\nkey=1\n",
//!     Options::new().with_policy(Policy::STRICT),
//! );
//! assert!(doc.set_value("key", "2", "", "Known").is_ok());
//! assert!(matches!(
//!     doc.set_value("other", "2", "", "Known"),
//!     Err(Error::PolicyDenied { .. })
//! ));
//! ```
//!
//! ### Building with the ini! Macro
//!
//! ```rust
//! use datafile::ini;
//!
//! let doc = ini! {
//!     "Server" => { "Host": "localhost", "Port": 1200 },
//! };
//! assert_eq!(doc.to_string(), "\n[Server]\nHost=localhost\nPort=1200\n");
//! ```
//!
//! ## Diagnostics
//!
//! Recoverable events (a missing file, a skipped line, a rejected duplicate
//! section) are reported to a [`DiagnosticSink`]. The default sink discards
//! them; [`LogSink`] forwards them to the `log` crate.
//!
//! ## Format
//!
//! See the [`format`] module for the exact dialect.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Load, query, modify and save a file
//! - **`macro.rs`** - Building documents with the ini! macro
//! - **`custom_options.rs`** - Custom indicators, strict policy and logging
//!
//! Run any example with: `cargo run --example <name>`

mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod macros;
mod map;
pub mod model;
pub mod options;
pub mod report;
pub mod ser;
pub mod text;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use model::{Key, Section};
pub use options::{Options, Policy};
pub use report::{DiagnosticSink, Level, LogSink, NoopSink};
pub use ser::Serializer;
pub use value::{FromValue, ToValue};

use std::io;

/// Parses INI text with default options.
///
/// Parsing never fails: lines that cannot be interpreted are skipped.
///
/// # Examples
///
/// ```rust
/// let doc = datafile::from_str("[A]\nk=v\n");
/// assert_eq!(doc.get_value("k", "a").unwrap(), "v");
/// ```
#[must_use]
pub fn from_str(s: &str) -> Document {
    Document::parse_str(s)
}

/// Parses INI text with custom indicators and policy.
///
/// # Examples
///
/// ```rust
/// use datafile::{from_str_with_options, Options};
///
/// let options = Options::new().with_comment_indicators("#").with_equal_indicators(":");
/// let doc = from_str_with_options("# port\nport: 80\n", options);
/// assert_eq!(doc.key("port", "").unwrap().comment(), "port");
/// ```
#[must_use]
pub fn from_str_with_options(s: &str, options: Options) -> Document {
    Document::parse_str_with_options(s, options)
}

/// Reads the whole stream and parses it with default options.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let doc = datafile::from_reader(Cursor::new(b"k=v\n")).unwrap();
/// assert_eq!(doc.get_value("K", "").unwrap(), "v");
/// ```
///
/// # Errors
///
/// Returns any error raised while reading from `reader`.
pub fn from_reader<R: io::Read>(reader: R) -> io::Result<Document> {
    from_reader_with_options(reader, Options::default())
}

/// Reads the whole stream and parses it with custom options.
///
/// # Errors
///
/// Returns any error raised while reading from `reader`.
pub fn from_reader_with_options<R: io::Read>(mut reader: R, options: Options) -> io::Result<Document> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(Document::parse_str_with_options(
        &String::from_utf8_lossy(&bytes),
        options,
    ))
}

/// Renders a document as INI text.
///
/// # Examples
///
/// ```rust
/// let doc = datafile::from_str(";hi\nk=v\n");
/// assert_eq!(datafile::to_string(&doc), "\n; hi\nk=v\n");
/// ```
#[must_use]
pub fn to_string(document: &Document) -> String {
    document.to_string()
}

/// Writes a document as INI text to `writer`.
///
/// # Examples
///
/// ```rust
/// let doc = datafile::from_str("[S]\nk=v\n");
/// let mut buffer = Vec::new();
/// datafile::to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"\n[S]\nk=v\n");
/// ```
///
/// # Errors
///
/// Returns any error raised while writing to `writer`.
pub fn to_writer<W: io::Write>(writer: W, document: &Document) -> io::Result<()> {
    document.write_to(writer)
}
