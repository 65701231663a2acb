//! Text helpers shared by the parser, the writer and the lookup code.
//!
//! Name matching throughout the crate is ASCII case-insensitive, the same
//! rule `strcasecmp` applies in the C locale.

use std::cmp::Ordering;

/// Trims whitespace and `=` from both ends of `s`.
///
/// # Examples
///
/// ```rust
/// use datafile::text::trim;
///
/// assert_eq!(trim("  Port = "), "Port");
/// assert_eq!(trim("=value"), "value");
/// ```
#[must_use]
pub fn trim(s: &str) -> &str {
    trim_with(s, "=")
}

/// Trims whitespace and any character of `delimiters` from both ends of `s`.
#[must_use]
pub fn trim_with<'a>(s: &'a str, delimiters: &str) -> &'a str {
    s.trim_matches(|c: char| c.is_whitespace() || delimiters.contains(c))
}

/// Compares two names ignoring ASCII case.
///
/// # Examples
///
/// ```rust
/// use datafile::text::compare_no_case;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_no_case("Port", "PORT"), Ordering::Equal);
/// assert_eq!(compare_no_case("a", "B"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_no_case(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|b| b.to_ascii_lowercase());
    let b = b.bytes().map(|b| b.to_ascii_lowercase());
    a.cmp(b)
}

/// Equality under [`compare_no_case`].
#[inline]
#[must_use]
pub fn eq_no_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// The lookup key a name is stored under.
#[inline]
pub(crate) fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Splits `line` at the first character of `delimiters`.
///
/// The key is trimmed of whitespace and delimiters; the value is the rest of
/// the line with surrounding whitespace removed. Without a delimiter the whole line is
/// the key and the value is empty.
///
/// # Examples
///
/// ```rust
/// use datafile::text::split_key_value;
///
/// assert_eq!(split_key_value("Name = Joe User", "="), ("Name", "Joe User"));
/// assert_eq!(split_key_value("url=a=b", "="), ("url", "a=b"));
/// assert_eq!(split_key_value("flag", "="), ("flag", ""));
/// ```
#[must_use]
pub fn split_key_value<'a>(line: &'a str, delimiters: &str) -> (&'a str, &'a str) {
    match line.find(|c: char| delimiters.contains(c)) {
        Some(pos) => {
            let delimiter_len = line[pos..].chars().next().map_or(1, char::len_utf8);
            let key = trim_with(&line[..pos], delimiters);
            let value = line[pos + delimiter_len..].trim();
            (key, value)
        }
        None => (trim_with(line, delimiters), ""),
    }
}
