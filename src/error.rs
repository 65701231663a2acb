//! Error types for loading, querying, mutating and saving documents.
//!
//! Every fallible operation in this crate returns [`Result`]. Nothing here is
//! fatal to the process: the caller decides whether a missing key or an
//! unwritable file matters.
//!
//! ## Error Categories
//!
//! - **Lookup**: [`Error::NotFound`] for a section or key that does not exist
//! - **Policy**: [`Error::PolicyDenied`] when auto-creation is switched off
//! - **Structure**: [`Error::DuplicateSection`] when a section name is taken
//! - **Conversion**: [`Error::ValueParse`] when a stored string is not the requested type
//! - **Persistence**: [`Error::Io`], [`Error::NothingToPersist`], [`Error::NoFileName`]
//!
//! ## Examples
//!
//! ```rust
//! use datafile::{Document, Error};
//!
//! let doc = Document::new();
//! let err = doc.get_value("Port", "Network").unwrap_err();
//! assert!(matches!(err, Error::NotFound { .. }));
//! assert_eq!(err.to_string(), "section [Network] not found");
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents everything that can go wrong while working with a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum Error {
    /// The section, or the key within it, does not exist.
    #[error("{}", describe(.section, .key, "not found"))]
    NotFound {
        section: String,
        key: Option<String>,
    },

    /// The target is missing and the auto-create policy forbids creating it.
    #[error("{}", describe(.section, .key, "not found and auto-create is disabled"))]
    PolicyDenied {
        section: String,
        key: Option<String>,
    },

    /// A section with this name (compared case-insensitively) already exists.
    #[error("section [{section}] already exists")]
    DuplicateSection { section: String },

    /// The file could not be opened for reading or writing.
    #[error("unable to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Save was requested for a document without any section or key.
    #[error("nothing to save")]
    NothingToPersist,

    /// The stored string could not be interpreted as the requested type.
    #[error("value of key {key:?} in section [{section}]: cannot parse {value:?} as {expected}")]
    ValueParse {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    /// Save was requested before a file path was set.
    #[error("no file name has been set")]
    NoFileName,
}

impl Error {
    pub(crate) fn section_not_found(section: &str) -> Self {
        Error::NotFound {
            section: section.to_string(),
            key: None,
        }
    }

    pub(crate) fn key_not_found(key: &str, section: &str) -> Self {
        Error::NotFound {
            section: section.to_string(),
            key: Some(key.to_string()),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    ///
    /// Convenient when a missing entry should fall back to a default while
    /// every other failure still propagates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafile::Document;
    ///
    /// let doc = Document::new();
    /// let port = match doc.get_int("Port", "") {
    ///     Ok(port) => port,
    ///     Err(err) if err.is_not_found() => 8080,
    ///     Err(err) => return Err(err),
    /// };
    /// assert_eq!(port, 8080);
    /// # Ok::<(), datafile::Error>(())
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

fn describe(section: &str, key: &Option<String>, what: &str) -> String {
    match key {
        Some(key) => format!("key {key:?} in section [{section}] {what}"),
        None => format!("section [{section}] {what}"),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
