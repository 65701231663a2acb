//! The INI dialect read and written by this crate.
//!
//! # Overview
//!
//! A file is a sequence of lines. Each line is trimmed of whitespace and of
//! the equal indicators at both ends, then classified by its first
//! character:
//!
//! | Line | Meaning |
//! |------|---------|
//! | `; text` | Comment, attached to the next header or key |
//! | `[name]` | Section header |
//! | `key=value` | Key in the current section |
//! | *(blank)* | Ignored |
//!
//! Keys that appear before the first header belong to the **default
//! section**, which has an empty name and never gets a header when written.
//!
//! # Sections
//!
//! ```text
//! [ServerSettings]
//! Port=1200
//! ```
//!
//! **Rules**:
//! - The name runs from after `[` to the last `]` on the line. A header
//!   without `]` takes the rest of the line as its name.
//! - Names are compared ignoring ASCII case: `[net]` and `[NET]` are the
//!   same section.
//! - A repeated header does not create a second section; its keys are added
//!   to the first one.
//! - A header with no keys is kept and written back as a bare header.
//!
//! # Keys
//!
//! ```text
//! Name = Joe User
//! Path=C:\data=old
//! ```
//!
//! **Rules**:
//! - The line is split at the first equal indicator. The key is trimmed; the
//!   value keeps everything after the indicator except surrounding
//!   whitespace, so the second line above has value `C:\data=old`.
//! - A line without an indicator is a key with an empty value.
//! - Key names are compared ignoring ASCII case. A repeated key updates the
//!   first occurrence in place.
//! - Lines whose key is empty after trimming are skipped.
//!
//! # Comments
//!
//! Comment lines start with any of the comment indicators (`;` by default).
//! Consecutive comment lines form one block, stored without the indicator
//! and one following space, lines joined with `\n`:
//!
//! ```text
//! ;
//! ; Settings unique to this server
//! ;
//!
//! [ServerSettings]
//! ```
//!
//! gives section `ServerSettings` the comment `"\nSettings unique to this server\n"`.
//! Blank lines between a comment block and its target do not detach it. A
//! comment at the very end of the file has no target and is dropped.
//!
//! # Values
//!
//! All values are strings. Typed accessors interpret them as follows:
//!
//! | Type | Read | Written |
//! |------|------|---------|
//! | Integer | Decimal, surrounding whitespace allowed | Decimal |
//! | Float | Rust float syntax (`1.5`, `1e3`, `inf`) | Shortest round-trip form |
//! | Boolean | `1…`, `true`, `yes` (any case) are true; all else false | `True` / `False` |
//!
//! # Writing
//!
//! Sections are written in order with their keys in order. Every commented
//! entry and every named section is preceded by one blank line. Each line
//! of a comment gets the first comment indicator and a space. Keys are
//! written as `key` + first equal indicator + `value`, so custom indicators
//! round-trip:
//!
//! ```text
//! Name=Joe User
//!
//! ; Settings unique to this server
//! [ServerSettings]
//! Port=1200
//! ```
//!
//! # Encoding
//!
//! Files are read as UTF-8. A leading byte order mark is skipped and invalid
//! sequences are replaced with U+FFFD. Both `\n` and `\r\n` line endings are
//! accepted; output always uses `\n`.
//!
//! # Limitations
//!
//! - **No nesting**: sections cannot contain sections
//! - **No quoting or escapes**: a value cannot start or end with whitespace
//! - **No includes** or variable interpolation
//! - **Inline comments** are not recognized: `k=v ; note` has value `v ; note`
//! - **Default-section comments**: the default section has no header, so its
//!   comment is written above its first key (or the next header when it has
//!   no keys) and is read back as that entry's comment
//! - **Line breaks in values** are not representable: trailing `\r` or `\n`
//!   is dropped on write

// This module contains only documentation; no implementation code
