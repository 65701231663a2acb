//! Diagnostic reporting.
//!
//! A [`Document`](crate::Document) never prints anything by itself. It hands
//! leveled messages to a [`DiagnosticSink`], which is [`NoopSink`] unless the
//! caller installs another one. [`LogSink`] forwards into the `log` facade;
//! any `Fn(Level, &str)` closure works as a sink too.
//!
//! ## Examples
//!
//! ```rust
//! use datafile::{Document, Level, LogSink};
//! use std::sync::{Arc, Mutex};
//!
//! // Route through `log` (whatever logger the application installed)
//! let doc = Document::new().with_sink(LogSink);
//!
//! // Or collect messages yourself
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = {
//!     let seen = Arc::clone(&seen);
//!     move |level: Level, message: &str| seen.lock().unwrap().push((level, message.to_string()))
//! };
//! let mut doc = Document::new().with_sink(sink);
//! assert!(doc.save().is_err());
//! assert_eq!(seen.lock().unwrap()[0].0, Level::Info);
//! ```

use std::fmt;

/// Severity of a diagnostic message, from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Critical,
}

impl Level {
    /// Returns the lowercase name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error | Level::Fatal | Level::Critical => log::Level::Error,
        }
    }
}

/// Receives diagnostic messages.
///
/// Implementations must not block and must not panic; reporting is
/// fire-and-forget and never changes the outcome of an operation.
pub trait DiagnosticSink {
    fn report(&self, level: Level, message: &str);

    /// Lets callers skip formatting messages nobody will read.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(Level, &str),
{
    fn report(&self, level: Level, message: &str) {
        self(level, message);
    }
}

/// Discards every message. The default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _level: Level, _message: &str) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}

/// Forwards messages to the `log` crate under the `datafile` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, level: Level, message: &str) {
        let mapped = log::Level::from(level);
        log::log!(target: "datafile", mapped, "<{}> {}", level, message);
    }

    fn enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: "datafile", log::Level::from(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_levels_are_ordered() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Fatal < Level::Critical);
        assert_eq!(Level::Warn.to_string(), "warn");
    }

    #[test]
    fn test_fatal_and_critical_map_to_log_error() {
        assert_eq!(log::Level::from(Level::Fatal), log::Level::Error);
        assert_eq!(log::Level::from(Level::Critical), log::Level::Error);
        assert_eq!(log::Level::from(Level::Debug), log::Level::Debug);
    }

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |level: Level, message: &str| seen.borrow_mut().push((level, message.to_string()));
        sink.report(Level::Warn, "renamed");
        assert!(sink.enabled(Level::Debug));
        assert_eq!(seen.into_inner(), vec![(Level::Warn, "renamed".to_string())]);
    }

    #[test]
    fn test_noop_sink_is_disabled() {
        assert!(!NoopSink.enabled(Level::Critical));
        NoopSink.report(Level::Critical, "ignored");
    }
}
