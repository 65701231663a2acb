//! The in-memory document.
//!
//! A [`Document`] owns its sections, which own their keys. Lookups hand out
//! shared references only; every mutation goes through a `Document` method
//! so the dirty flag and the naming rules stay consistent:
//!
//! - exactly one default (unnamed) section exists at all times
//! - section names are unique ignoring ASCII case
//! - key lookups ignore ASCII case and resolve to the first match
//! - `is_dirty()` is `false` after construction, load and save, and `true`
//!   after any accepted mutation
//!
//! ## Examples
//!
//! ```rust
//! use datafile::Document;
//!
//! let mut doc = Document::parse_str("Name=Joe\n[Net]\nPort=1200\n");
//! assert_eq!(doc.get_value("name", "").unwrap(), "Joe");
//! assert_eq!(doc.get_int("PORT", "net").unwrap(), 1200);
//! assert!(!doc.is_dirty());
//!
//! doc.set_bool("Enabled", true, "", "Net").unwrap();
//! assert!(doc.is_dirty());
//! assert_eq!(doc.key_count(), 3);
//! ```

use crate::de::Parser;
use crate::error::{Error, Result};
use crate::map::SectionMap;
use crate::model::{Key, Section};
use crate::options::{Options, Policy};
use crate::report::{DiagnosticSink, Level, NoopSink};
use crate::ser::Serializer;
use crate::text::eq_no_case;
use crate::value::{FromValue, ToValue};
use serde::de::Deserializer;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

type Sink = Arc<dyn DiagnosticSink + Send + Sync>;

/// Sections, keys and comments of one INI file, plus its path and dirty flag.
///
/// Not synchronized: share it across threads behind a lock.
///
/// Cloning copies content, path and dirty flag but never autosave: only the
/// original writes itself back on drop.
pub struct Document {
    sections: SectionMap,
    file_path: Option<PathBuf>,
    dirty: bool,
    options: Options,
    sink: Sink,
}

impl Document {
    /// Creates an empty document holding only the default section.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Document {
            sections: SectionMap::new(),
            file_path: None,
            dirty: false,
            options,
            sink: Arc::new(NoopSink),
        }
    }

    /// Creates a document bound to `path` and loads it if possible.
    ///
    /// A file that cannot be read leaves an empty document that still
    /// remembers `path`, so it can be filled in and saved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafile::{Document, Options};
    ///
    /// let doc = Document::open("/definitely/not/here.ini", Options::default());
    /// assert_eq!(doc.key_count(), 0);
    /// assert!(doc.file_path().is_some());
    /// ```
    #[must_use]
    pub fn open(path: impl AsRef<Path>, options: Options) -> Self {
        let path = path.as_ref();
        let mut document = Self::with_options(options);
        if document.load(path).is_err() {
            document.file_path = Some(path.to_path_buf());
        }
        document
    }

    /// Parses `text` with default options.
    #[must_use]
    pub fn parse_str(text: &str) -> Self {
        Self::parse_str_with_options(text, Options::default())
    }

    #[must_use]
    pub fn parse_str_with_options(text: &str, options: Options) -> Self {
        let mut document = Self::with_options(options);
        document.sections = Parser::new(&document.options, &NoopSink).parse_str(text);
        document
    }

    /// Builds a document from sections, merging those whose names collide.
    ///
    /// A colliding section contributes its keys to the earlier one and
    /// replaces its comment when it has one.
    #[must_use]
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut document = Self::new();
        for section in sections {
            match document.sections.get_mut(section.name()) {
                Some(existing) => {
                    if !section.comment().is_empty() {
                        existing.set_comment(section.comment().to_string());
                    }
                    for key in section.keys() {
                        existing.push(key.clone());
                    }
                }
                None => {
                    document.sections.insert(section);
                }
            }
        }
        document
    }

    /// Installs a diagnostic sink.
    #[must_use]
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: DiagnosticSink + Send + Sync + 'static,
    {
        self.set_sink(sink);
        self
    }

    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: DiagnosticSink + Send + Sync + 'static,
    {
        self.sink = Arc::new(sink);
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    #[must_use]
    pub fn policy(&self) -> Policy {
        self.options.policy
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.options.policy = policy;
    }

    // Lifecycle ////////////////////////////////////////////////////////////

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Sets the path used by [`Document::save`].
    ///
    /// Replacing a different, previously set path marks the document dirty:
    /// its content has not been written to the new location yet.
    pub fn set_file_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(current) = self.file_path.as_deref() {
            let renamed = !current.as_os_str().is_empty()
                && !eq_no_case(&current.to_string_lossy(), &path.to_string_lossy());
            if renamed {
                self.dirty = true;
                self.report(Level::Warn, || {
                    format!(
                        "the file name has changed from <{}> to <{}>",
                        current.display(),
                        path.display()
                    )
                });
            }
        }
        self.file_path = Some(path.to_path_buf());
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Drops every section and key, forgets the file path and clears the
    /// dirty flag. Options and sink are kept.
    pub fn clear(&mut self) {
        self.sections = SectionMap::new();
        self.file_path = None;
        self.dirty = false;
    }

    /// Replaces the content with the file at `path` and binds the document
    /// to it.
    ///
    /// Lines that cannot be interpreted are skipped; only a file that cannot
    /// be opened is an error, in which case the document is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                self.report(Level::Info, || {
                    format!("unable to open <{}>: {err}. Does it exist?", path.display())
                });
                return Err(Error::io(path, err));
            }
        };
        self.read_from(file);
        self.file_path = Some(path.to_path_buf());
        self.report(Level::Debug, || {
            format!(
                "loaded {} sections and {} keys from <{}>",
                self.section_count(),
                self.key_count(),
                path.display()
            )
        });
        Ok(())
    }

    /// Replaces the content with whatever `reader` yields and clears the
    /// dirty flag. A read error ends the input early; it is reported to the
    /// sink, not returned.
    pub fn read_from<R: Read>(&mut self, reader: R) {
        let sections =
            Parser::new(&self.options, self.sink.as_ref()).parse_reader(BufReader::new(reader));
        self.sections = sections;
        self.dirty = false;
    }

    /// Writes the whole document to its file, replacing previous content.
    ///
    /// # Errors
    ///
    /// - [`Error::NothingToPersist`] when there is no named section and no key
    /// - [`Error::NoFileName`] when no path has been set
    /// - [`Error::Io`] when the file cannot be created or written
    ///
    /// Nothing is written in the first two cases, and the dirty flag is only
    /// cleared on success.
    pub fn save(&mut self) -> Result<()> {
        if self.is_empty() {
            self.report(Level::Info, || "nothing to save".to_string());
            return Err(Error::NothingToPersist);
        }
        let path = match self.file_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => {
                self.report(Level::Error, || "no file name has been set".to_string());
                return Err(Error::NoFileName);
            }
        };

        let text = self.render();
        let written = File::create(&path).and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.flush()
        });
        if let Err(err) = written {
            self.report(Level::Error, || {
                format!("unable to save <{}>: {err}", path.display())
            });
            return Err(Error::io(path, err));
        }

        self.dirty = false;
        Ok(())
    }

    /// Binds the document to `path`, then saves it.
    ///
    /// # Errors
    ///
    /// Same as [`Document::save`].
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.set_file_path(path);
        self.save()
    }

    /// Writes the serialized document to `writer`. Does not touch the dirty flag.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()
    }

    fn render(&self) -> String {
        let mut serializer = Serializer::new(&self.options);
        serializer.serialize_sections(self.sections.iter());
        serializer.into_inner()
    }

    // Queries //////////////////////////////////////////////////////////////

    /// Iterates sections in file order, default section first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn key(&self, key: &str, section: &str) -> Option<&Key> {
        self.sections.get(section)?.get(key)
    }

    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    /// Number of sections, the default section included.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of keys across all sections.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Returns `true` when there is no named section and no key, i.e.
    /// nothing worth saving.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section_count() <= 1 && self.key_count() == 0
    }

    // Typed getters ////////////////////////////////////////////////////////

    /// Returns the raw value of `key` in `section` (`""` is the default section).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the section or key does not exist.
    pub fn get_value(&self, key: &str, section: &str) -> Result<&str> {
        let found = self
            .sections
            .get(section)
            .ok_or_else(|| Error::section_not_found(section))?;
        found
            .get(key)
            .map(Key::value)
            .ok_or_else(|| Error::key_not_found(key, section))
    }

    /// Owned variant of [`Document::get_value`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the section or key does not exist.
    pub fn get_string(&self, key: &str, section: &str) -> Result<String> {
        self.get_value(key, section).map(str::to_string)
    }

    /// Reads and converts a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the section or key does not exist, or
    /// [`Error::ValueParse`] if the stored string is not a valid `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafile::{Document, Error};
    ///
    /// let doc = Document::parse_str("[Net]\nPort=1200\nHost=example.org\n");
    /// assert_eq!(doc.get::<u16>("Port", "Net").unwrap(), 1200);
    /// assert!(matches!(doc.get::<u16>("Host", "Net"), Err(Error::ValueParse { .. })));
    /// ```
    pub fn get<T: FromValue>(&self, key: &str, section: &str) -> Result<T> {
        let raw = self.get_value(key, section)?;
        T::from_value(raw).ok_or_else(|| Error::ValueParse {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            expected: T::EXPECTED,
        })
    }

    /// # Errors
    ///
    /// See [`Document::get`].
    pub fn get_int(&self, key: &str, section: &str) -> Result<i64> {
        self.get(key, section)
    }

    /// # Errors
    ///
    /// See [`Document::get`].
    pub fn get_float(&self, key: &str, section: &str) -> Result<f64> {
        self.get(key, section)
    }

    /// Reads a boolean: `1…`, `true` and `yes` are true, anything else is false.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] only; any existing value is a valid boolean.
    pub fn get_bool(&self, key: &str, section: &str) -> Result<bool> {
        self.get(key, section)
    }

    // Setters //////////////////////////////////////////////////////////////

    /// Sets `key` in `section` to `value`, replacing its comment.
    ///
    /// A missing section is created if the policy allows it; the key is then
    /// looked up in that section and created only if the policy allows that
    /// too. An existing key keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PolicyDenied`] if the section or key is missing and
    /// may not be created. A section created before the key was refused is
    /// kept.
    pub fn set_value(&mut self, key: &str, value: &str, comment: &str, section: &str) -> Result<()> {
        let policy = self.options.policy;
        self.write_value(key, value.to_string(), comment, section, policy)
    }

    /// Converts and stores a value.
    ///
    /// # Errors
    ///
    /// See [`Document::set_value`].
    pub fn set<T: ToValue + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        comment: &str,
        section: &str,
    ) -> Result<()> {
        let policy = self.options.policy;
        self.write_value(key, value.to_value(), comment, section, policy)
    }

    /// # Errors
    ///
    /// See [`Document::set_value`].
    pub fn set_int(&mut self, key: &str, value: i64, comment: &str, section: &str) -> Result<()> {
        self.set(key, &value, comment, section)
    }

    /// # Errors
    ///
    /// See [`Document::set_value`].
    pub fn set_float(&mut self, key: &str, value: f64, comment: &str, section: &str) -> Result<()> {
        self.set(key, &value, comment, section)
    }

    /// Stores `True` or `False`.
    ///
    /// # Errors
    ///
    /// See [`Document::set_value`].
    pub fn set_bool(&mut self, key: &str, value: bool, comment: &str, section: &str) -> Result<()> {
        self.set(key, &value, comment, section)
    }

    fn write_value(
        &mut self,
        key: &str,
        value: String,
        comment: &str,
        section: &str,
        policy: Policy,
    ) -> Result<()> {
        if !self.sections.contains(section) {
            if !policy.auto_create_sections {
                return Err(Error::PolicyDenied {
                    section: section.to_string(),
                    key: None,
                });
            }
            self.sections.insert(Section::new(section));
            self.dirty = true;
        }

        let target = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::section_not_found(section))?;
        if let Some(existing) = target.get_mut(key) {
            existing.set(value, comment.to_string());
        } else if policy.auto_create_keys {
            target.push(Key::new(key, value).with_comment(comment));
        } else {
            return Err(Error::PolicyDenied {
                section: section.to_string(),
                key: Some(key.to_string()),
            });
        }

        self.dirty = true;
        Ok(())
    }

    // Structure ////////////////////////////////////////////////////////////

    /// Adds an empty section. Never replaces an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if the name is taken (ignoring case).
    pub fn create_section(&mut self, name: &str, comment: &str) -> Result<()> {
        self.create_section_with_keys(name, comment, &[])
    }

    /// Adds a section holding copies of `keys`, in order and as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if the name is taken (ignoring case).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafile::{Document, Key};
    ///
    /// let mut doc = Document::new();
    /// let keys = [Key::new("Port", "1200"), Key::new("Host", "localhost")];
    /// doc.create_section_with_keys("Net", "network", &keys).unwrap();
    /// assert!(doc.create_section("NET", "").is_err());
    /// assert_eq!(doc.key_count(), 2);
    /// ```
    pub fn create_section_with_keys(&mut self, name: &str, comment: &str, keys: &[Key]) -> Result<()> {
        let section = Section::new(name)
            .with_comment(comment)
            .with_keys(keys.iter().cloned());
        if self.sections.insert(section).is_none() {
            self.report(Level::Info, || {
                format!("section <{name}> already exists, not creating it")
            });
            return Err(Error::DuplicateSection {
                section: name.to_string(),
            });
        }
        self.dirty = true;
        Ok(())
    }

    /// Like [`Document::set_value`], but always allows creating the key.
    /// Section creation still follows the document's policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PolicyDenied`] if the section is missing and may not
    /// be created.
    pub fn create_key(&mut self, key: &str, value: &str, comment: &str, section: &str) -> Result<()> {
        let policy = self.options.policy.creating_keys();
        self.write_value(key, value.to_string(), comment, section, policy)
    }

    /// Removes a named section and its keys. Returns whether anything was
    /// removed; the default section is never removed.
    pub fn delete_section(&mut self, name: &str) -> bool {
        let removed = self.sections.remove(name).is_some();
        self.dirty |= removed;
        removed
    }

    /// Removes the first key matching `key` in `section`. Returns whether
    /// anything was removed.
    pub fn delete_key(&mut self, key: &str, section: &str) -> bool {
        let removed = self
            .sections
            .get_mut(section)
            .and_then(|found| found.remove(key))
            .is_some();
        self.dirty |= removed;
        removed
    }

    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the section does not exist.
    pub fn set_section_comment(&mut self, name: &str, comment: &str) -> Result<()> {
        let found = self
            .sections
            .get_mut(name)
            .ok_or_else(|| Error::section_not_found(name))?;
        found.set_comment(comment.to_string());
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the section or key does not exist.
    pub fn set_key_comment(&mut self, key: &str, comment: &str, section: &str) -> Result<()> {
        let found = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::section_not_found(section))?
            .get_mut(key)
            .ok_or_else(|| Error::key_not_found(key, section))?;
        found.set_comment(comment.to_string());
        self.dirty = true;
        Ok(())
    }

    /// Empties the default section (keys and comment). Returns whether it
    /// held anything.
    pub fn clear_default_section(&mut self) -> bool {
        let section = self.sections.default_section_mut();
        let had_content = !section.is_empty() || !section.comment().is_empty();
        section.clear();
        self.dirty |= had_content;
        had_content
    }

    fn report(&self, level: Level, message: impl FnOnce() -> String) {
        if self.sink.enabled(level) {
            self.sink.report(level, &message());
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Document {
            sections: self.sections.clone(),
            file_path: self.file_path.clone(),
            dirty: self.dirty,
            options: self.options.clone().with_autosave(false),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        if !(self.options.autosave && self.dirty) {
            return;
        }
        if let Err(err) = self.save() {
            self.report(Level::Error, || format!("autosave failed: {err}"));
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("sections", &self.sections)
            .field("file_path", &self.file_path)
            .field("dirty", &self.dirty)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The serialized text, exactly as [`Document::save`] would write it.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Document {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Document::parse_str(s))
    }
}

/// Serializes as the ordered sequence of sections, default section first.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.section_count()))?;
        for section in self.sections() {
            seq.serialize_element(section)?;
        }
        seq.end()
    }
}

/// Deserializes from a sequence of sections, see [`Document::from_sections`].
impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sections = Vec::<Section>::deserialize(deserializer)?;
        Ok(Document::from_sections(sections))
    }
}
