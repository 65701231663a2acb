//! Writing documents back to text.
//!
//! Layout rules:
//!
//! - A section comment is preceded by a blank line and written right above
//!   its header.
//! - A named section without a comment gets a blank line before `[name]`.
//!   The default section has no header at all.
//! - A key with a comment is written as a blank line, the comment, then the
//!   `key=value` line; a key without one is written directly.
//! - Keys with an empty name are skipped.
//!
//! Each comment line gets the first comment indicator, followed by a space
//! unless the line is empty or already starts with an indicator. Re-parsing
//! the output yields the same sections, keys, values and comments.
//!
//! ```rust
//! use datafile::Document;
//!
//! let mut doc = Document::new();
//! doc.set_value("Name", "Joe User", "", "UserSettings").unwrap();
//! doc.set_value("Port", "1200", "Settings unique to this server", "ServerSettings").unwrap();
//!
//! assert_eq!(
//!     doc.to_string(),
//!     "\n[UserSettings]\nName=Joe User\n\n[ServerSettings]\n\n; Settings unique to this server\nPort=1200\n"
//! );
//! ```

use crate::model::{Key, Section};
use crate::options::Options;

/// Renders sections into text.
///
/// Created via [`Serializer::new`]; feed it sections in order and take the
/// text with [`Serializer::into_inner`]. Most callers want
/// [`Document::to_string`](std::string::ToString::to_string) or
/// [`Document::save`](crate::Document::save) instead.
///
/// # Examples
///
/// ```rust
/// use datafile::{Key, Options, Section, Serializer};
///
/// let options = Options::new();
/// let mut serializer = Serializer::new(&options);
/// serializer.serialize_section(&Section::new("A").with_keys([Key::new("k", "v")]));
/// assert_eq!(serializer.into_inner(), "\n[A]\nk=v\n");
/// ```
pub struct Serializer<'a> {
    output: String,
    options: &'a Options,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every section in order.
    pub fn serialize_sections<'s, I>(&mut self, sections: I)
    where
        I: IntoIterator<Item = &'s Section>,
    {
        for section in sections {
            self.serialize_section(section);
        }
    }

    pub fn serialize_section(&mut self, section: &Section) {
        let wrote_comment = !section.comment().is_empty();
        if wrote_comment {
            self.write_blank();
            self.write_comment(section.comment());
        }

        if !section.is_default() {
            if !wrote_comment {
                self.write_blank();
            }
            self.write_line(&format!("[{}]", section.name()));
        }

        for key in section.keys() {
            self.serialize_key(key);
        }
    }

    fn serialize_key(&mut self, key: &Key) {
        if key.name().is_empty() {
            return;
        }
        if !key.comment().is_empty() {
            self.write_blank();
            self.write_comment(key.comment());
        }
        let line = format!("{}{}{}", key.name(), self.options.equal_char(), key.value());
        self.write_line(&line);
    }

    fn write_comment(&mut self, comment: &str) {
        let indicator = self.options.comment_char();
        for line in comment.split('\n') {
            let line = line.trim_end();
            let mut rendered = String::with_capacity(line.len() + 2);
            rendered.push(indicator);
            if !line.is_empty() && !self.options.is_comment_start(line) {
                rendered.push(' ');
            }
            rendered.push_str(line);
            self.write_line(&rendered);
        }
    }

    fn write_blank(&mut self) {
        self.output.push('\n');
    }

    /// Appends `line` followed by exactly one `\n`. Trailing terminators in
    /// `line` are dropped so a stray `\r` cannot swallow the next line.
    fn write_line(&mut self, line: &str) {
        self.output.push_str(line.trim_end_matches(['\n', '\r']));
        self.output.push('\n');
    }
}
