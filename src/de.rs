//! Parsing text into sections and keys.
//!
//! The parser is line oriented and single pass. It keeps a cursor on the
//! current section (initially the default section) and accumulates comment
//! lines until the next header or key claims them:
//!
//! ```text
//! Name=Joe            <- default section
//!
//! ; Settings unique   <- pending comment...
//! ; to this server
//!
//! [Server]            <- ...attached here; blank lines do not flush it
//! Port=1200
//! ```
//!
//! Nothing in a stream is fatal. Lines that cannot be interpreted (a key
//! line with an empty name) are skipped, invalid UTF-8 is decoded lossily
//! and a read error simply ends the input. Parsing always creates sections
//! and keys, whatever auto-create policy the target document uses.

use crate::map::SectionMap;
use crate::model::{Key, Section};
use crate::options::Options;
use crate::report::{DiagnosticSink, Level};
use crate::text::{split_key_value, trim_with};
use std::borrow::Cow;
use std::io::BufRead;

const UTF8_BOM: &str = "\u{feff}";

/// Builds a [`SectionMap`] from lines of text.
pub(crate) struct Parser<'a> {
    options: &'a Options,
    sink: &'a dyn DiagnosticSink,
    sections: SectionMap,
    current: usize,
    pending: Option<String>,
    line: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(options: &'a Options, sink: &'a dyn DiagnosticSink) -> Self {
        Parser {
            options,
            sink,
            sections: SectionMap::new(),
            current: 0,
            pending: None,
            line: 0,
        }
    }

    pub(crate) fn parse_str(mut self, text: &str) -> SectionMap {
        for line in text.split('\n') {
            self.parse_line(line);
        }
        self.finish()
    }

    /// Consumes `reader` line by line. A read error ends the input; whatever
    /// was parsed up to that point is kept.
    pub(crate) fn parse_reader<R: BufRead>(mut self, mut reader: R) -> SectionMap {
        let mut buffer = Vec::with_capacity(256);
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buffer);
                    if let Cow::Owned(_) = line {
                        self.report(Level::Debug, || {
                            format!("line {}: invalid UTF-8 replaced", self.line + 1)
                        });
                    }
                    self.parse_line(&line);
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.report(Level::Error, || {
                        format!("read failed after line {}: {err}", self.line)
                    });
                    break;
                }
            }
        }
        self.finish()
    }

    fn parse_line(&mut self, raw: &str) {
        self.line += 1;
        let raw = if self.line == 1 {
            raw.strip_prefix(UTF8_BOM).unwrap_or(raw)
        } else {
            raw
        };
        let line = trim_with(raw, &self.options.equal_indicators);

        if self.options.is_comment_start(line) {
            self.push_comment(line);
        } else if let Some(header) = line.strip_prefix('[') {
            let name = match header.rfind(']') {
                Some(end) => &header[..end],
                None => header,
            };
            self.open_section(name);
        } else if !line.is_empty() {
            let (key, value) = split_key_value(line, &self.options.equal_indicators);
            if key.is_empty() {
                self.report(Level::Debug, || {
                    format!("line {}: skipping line without a key: {line:?}", self.line)
                });
                return;
            }
            self.set_key(key, value);
        }
    }

    fn push_comment(&mut self, line: &str) {
        let mut chars = line.chars();
        chars.next();
        let text = chars.as_str();
        let text = text.strip_prefix(' ').unwrap_or(text);

        match &mut self.pending {
            Some(pending) => {
                pending.push('\n');
                pending.push_str(text);
            }
            None => self.pending = Some(text.to_string()),
        }
    }

    fn open_section(&mut self, name: &str) {
        let comment = self.pending.take().unwrap_or_default();
        if let Some(index) = self.sections.index_of(name) {
            self.report(Level::Debug, || {
                format!("line {}: section [{name}] repeated, merging keys", self.line)
            });
            self.current = index;
            return;
        }
        let section = Section::new(name).with_comment(comment);
        if let Some(index) = self.sections.insert(section) {
            self.current = index;
        }
    }

    fn set_key(&mut self, name: &str, value: &str) {
        let comment = self.pending.take().unwrap_or_default();
        let Some(section) = self.sections.get_index_mut(self.current) else {
            return;
        };
        if let Some(key) = section.get_mut(name) {
            key.set(value.to_string(), comment);
        } else {
            section.push(Key::new(name, value).with_comment(comment));
        }
    }

    fn finish(self) -> SectionMap {
        if self.pending.is_some() {
            self.report(Level::Debug, || {
                "comment at end of input has nothing to attach to".to_string()
            });
        }
        self.sections
    }

    fn report(&self, level: Level, message: impl FnOnce() -> String) {
        if self.sink.enabled(level) {
            self.sink.report(level, &message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoopSink;
    use std::io::Cursor;

    fn parse(text: &str) -> SectionMap {
        let options = Options::default();
        Parser::new(&options, &NoopSink).parse_str(text)
    }

    fn value<'m>(map: &'m SectionMap, section: &str, key: &str) -> Option<&'m str> {
        map.get(section)?.get(key).map(Key::value)
    }

    #[test]
    fn test_keys_before_header_go_to_default_section() {
        let map = parse("Name=Joe\n[Header]\nName=Ann\n");
        assert_eq!(value(&map, "", "Name"), Some("Joe"));
        assert_eq!(value(&map, "Header", "Name"), Some("Ann"));
    }

    #[test]
    fn test_comment_survives_blank_lines() {
        let map = parse(";c1\n\nKey=V\n");
        let key = map.get("").and_then(|s| s.get("Key")).unwrap();
        assert_eq!(key.comment(), "c1");
    }

    #[test]
    fn test_multiline_comment_attaches_to_section() {
        let map = parse(";\n; Settings unique to this server\n;\n[ServerSettings]\nPort=1200\n");
        let section = map.get("serversettings").unwrap();
        assert_eq!(section.comment(), "\nSettings unique to this server\n");
        assert_eq!(section.get("port").unwrap().comment(), "");
    }

    #[test]
    fn test_header_without_closing_bracket() {
        let map = parse("[Open\nk=v\n");
        assert_eq!(value(&map, "Open", "k"), Some("v"));
    }

    #[test]
    fn test_header_uses_last_bracket() {
        let map = parse("[a]b]\n");
        assert!(map.contains("a]b"));
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let map = parse("a=1\nb=2\n; again\nA=3\n");
        let section = map.get("").unwrap();
        assert_eq!(section.len(), 2);
        assert_eq!(section.keys()[0].value(), "3");
        assert_eq!(section.keys()[0].name(), "a");
        assert_eq!(section.keys()[0].comment(), "again");
    }

    #[test]
    fn test_repeated_header_merges() {
        let map = parse("[A]\nx=1\n[B]\n[a]\ny=2\n");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("A").unwrap().len(), 2);
    }

    #[test]
    fn test_edge_delimiters_and_blank_lines() {
        let map = parse("=orphan\n  \n===\nk = v\n");
        let section = map.get("").unwrap();
        assert_eq!(section.len(), 2);
        assert_eq!(value(&map, "", "orphan"), Some(""));
        assert_eq!(value(&map, "", "k"), Some("v"));
    }

    #[test]
    fn test_crlf_and_bom() {
        let map = parse("\u{feff}[S]\r\nk=v\r\n");
        assert_eq!(value(&map, "S", "k"), Some("v"));
    }

    #[test]
    fn test_custom_indicators() {
        let options = Options::new()
            .with_comment_indicators("#")
            .with_equal_indicators(":");
        let map = Parser::new(&options, &NoopSink).parse_str("# note\nhost: example.org\n; k=v\n");
        let section = map.get("").unwrap();
        assert_eq!(section.get("host").unwrap().comment(), "note");
        assert_eq!(section.get("host").unwrap().value(), "example.org");
        assert_eq!(section.get("; k=v").map(Key::value), Some(""));
    }

    #[test]
    fn test_reader_with_invalid_utf8() {
        let options = Options::default();
        let bytes: &[u8] = b"k=\xff\xfe\nok=1\n";
        let map = Parser::new(&options, &NoopSink).parse_reader(Cursor::new(bytes));
        assert_eq!(value(&map, "", "ok"), Some("1"));
        assert_eq!(value(&map, "", "k"), Some("\u{fffd}\u{fffd}"));
    }

    #[test]
    fn test_read_error_keeps_parsed_lines() {
        struct Failing(usize);

        impl std::io::Read for Failing {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.0 == 0 {
                    self.0 += 1;
                    let data = b"a=1\n";
                    buf[..data.len()].copy_from_slice(data);
                    Ok(data.len())
                } else {
                    Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
                }
            }
        }

        let options = Options::default();
        let seen = std::cell::RefCell::new(Vec::new());
        let sink = |level: Level, message: &str| seen.borrow_mut().push((level, message.to_string()));
        let map = Parser::new(&options, &sink)
            .parse_reader(std::io::BufReader::new(Failing(0)));

        assert_eq!(value(&map, "", "a"), Some("1"));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Level::Error);
        assert!(seen[0].1.contains("disk gone"));
    }
}
