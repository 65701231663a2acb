//! Configuration options for parsing, writing and mutating documents.
//!
//! This module provides:
//!
//! - [`Options`]: indicator characters, auto-create policy and autosave
//! - [`Policy`]: whether a write may create missing sections or keys
//!
//! ## Examples
//!
//! ```rust
//! use datafile::{Document, Options, Policy};
//!
//! // Accept `#` comments as well, write `;` comments
//! let options = Options::new().with_comment_indicators(";#");
//! let doc = Document::parse_str_with_options("# hello\nkey=value\n", options);
//! assert_eq!(doc.key("key", "").map(|k| k.comment()), Some("hello"));
//!
//! // Refuse to create anything on write
//! let mut doc = Document::with_options(Options::new().with_policy(Policy::STRICT));
//! assert!(doc.set_value("Port", "1200", "", "Network").is_err());
//! ```

/// Controls whether writes may create missing sections or keys.
///
/// Every write path takes a policy explicitly. Documents carry one in their
/// [`Options`]; parsing always uses [`Policy::CREATE_ALL`] regardless.
///
/// # Examples
///
/// ```rust
/// use datafile::Policy;
///
/// let policy = Policy::default();
/// assert_eq!(policy, Policy::CREATE_ALL);
/// assert!(!Policy::STRICT.auto_create_keys);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy {
    pub auto_create_sections: bool,
    pub auto_create_keys: bool,
}

impl Policy {
    /// Missing sections and keys are created on write.
    pub const CREATE_ALL: Policy = Policy {
        auto_create_sections: true,
        auto_create_keys: true,
    };

    /// Writes only ever update existing keys.
    pub const STRICT: Policy = Policy {
        auto_create_sections: false,
        auto_create_keys: false,
    };

    /// Returns this policy with key creation forced on.
    #[must_use]
    pub const fn creating_keys(self) -> Self {
        Policy {
            auto_create_keys: true,
            ..self
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::CREATE_ALL
    }
}

/// Configuration for a [`Document`](crate::Document).
///
/// Any character of `comment_indicators` starts a comment line and any
/// character of `equal_indicators` separates a key from its value. The writer
/// always uses the first character of each set.
///
/// # Examples
///
/// ```rust
/// use datafile::{Options, Policy};
///
/// let options = Options::new()
///     .with_comment_indicators("#;")
///     .with_equal_indicators("=:")
///     .with_policy(Policy::STRICT)
///     .with_autosave(true);
///
/// assert_eq!(options.comment_char(), '#');
/// assert_eq!(options.equal_char(), '=');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub comment_indicators: String,
    pub equal_indicators: String,
    pub policy: Policy,
    pub autosave: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            comment_indicators: ";".to_string(),
            equal_indicators: "=".to_string(),
            policy: Policy::default(),
            autosave: false,
        }
    }
}

impl Options {
    /// Creates default options (`;` comments, `=` delimiter, auto-create on, no autosave).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafile::Options;
    ///
    /// let options = Options::new();
    /// assert_eq!(options.comment_indicators, ";");
    /// assert!(!options.autosave);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the characters that start a comment line.
    #[must_use]
    pub fn with_comment_indicators(mut self, indicators: impl Into<String>) -> Self {
        self.comment_indicators = indicators.into();
        self
    }

    /// Sets the characters that separate a key from its value.
    #[must_use]
    pub fn with_equal_indicators(mut self, indicators: impl Into<String>) -> Self {
        self.equal_indicators = indicators.into();
        self
    }

    /// Sets the auto-create policy used by `set_*` accessors.
    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Toggles section auto-creation only.
    #[must_use]
    pub fn with_auto_create_sections(mut self, enabled: bool) -> Self {
        self.policy.auto_create_sections = enabled;
        self
    }

    /// Toggles key auto-creation only.
    #[must_use]
    pub fn with_auto_create_keys(mut self, enabled: bool) -> Self {
        self.policy.auto_create_keys = enabled;
        self
    }

    /// Saves a dirty document when it is dropped.
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// The character written in front of comment lines.
    #[must_use]
    pub fn comment_char(&self) -> char {
        self.comment_indicators.chars().next().unwrap_or(';')
    }

    /// The character written between a key and its value.
    #[must_use]
    pub fn equal_char(&self) -> char {
        self.equal_indicators.chars().next().unwrap_or('=')
    }

    pub(crate) fn is_comment_start(&self, line: &str) -> bool {
        line.chars()
            .next()
            .is_some_and(|c| self.comment_indicators.contains(c))
    }
}
