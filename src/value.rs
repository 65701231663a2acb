//! Conversions between stored strings and Rust primitives.
//!
//! Every value in a document is a string. [`FromValue`] and [`ToValue`] are
//! the two directions used by the typed accessors (`get_int`, `set_bool`,
//! the generic [`Document::get`](crate::Document::get) and
//! [`Document::set`](crate::Document::set)).
//!
//! ## Booleans
//!
//! A stored value is `true` when it starts with `1` or equals `true` or `yes`
//! (ignoring ASCII case). Everything else is `false`; reading a boolean never
//! fails once the key exists. Booleans are written as `True` / `False`.
//!
//! ```rust
//! use datafile::value::parse_bool;
//!
//! assert!(parse_bool("1"));
//! assert!(parse_bool("10"));
//! assert!(parse_bool("YES"));
//! assert!(!parse_bool("on"));
//! assert!(!parse_bool(""));
//! ```
//!
//! ## Numbers
//!
//! Numbers are parsed with Rust's `FromStr` after trimming surrounding
//! whitespace; `" 42 "` is `42` but `"42px"` is a parse error.

use crate::text::eq_no_case;

/// Interprets a stored string as `Self`.
pub trait FromValue: Sized {
    /// Name used in [`Error::ValueParse`](crate::Error::ValueParse).
    const EXPECTED: &'static str;

    fn from_value(raw: &str) -> Option<Self>;
}

/// Renders `self` as a string to store.
pub trait ToValue {
    fn to_value(&self) -> String;
}

/// Boolean interpretation of a stored string.
#[must_use]
pub fn parse_bool(raw: &str) -> bool {
    raw.starts_with('1') || eq_no_case(raw, "true") || eq_no_case(raw, "yes")
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(raw: &str) -> Option<Self> {
        Some(parse_bool(raw))
    }
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }

            impl ToValue for $ty {
                fn to_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> String {
        if *self { "True" } else { "False" }.to_string()
    }
}

impl ToValue for str {
    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl ToValue for String {
    fn to_value(&self) -> String {
        self.clone()
    }
}

impl ToValue for char {
    fn to_value(&self) -> String {
        self.to_string()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> String {
        (**self).to_value()
    }
}
