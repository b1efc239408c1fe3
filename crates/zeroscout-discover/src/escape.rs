//! Decoder for the escape scheme used by parsable resolver output.
//!
//! `avahi-browse --parsable` (and `dns-sd` in its zone-file output) escape
//! structurally significant characters in instance names: `\DDD` with three
//! decimal digits stands for the character with that code point, and a
//! backslash before any other character stands for that character itself.
//!
//! Decoding is total and never fails, but it is not idempotent: running it
//! twice over text containing literal backslashes decodes them again.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Static regex for escape sequences, compiled once.
static ESCAPE_REGEX: OnceLock<Regex> = OnceLock::new();

fn escape_regex() -> &'static Regex {
    ESCAPE_REGEX.get_or_init(|| {
        Regex::new(r"\\([0-9]{3}|.)").expect("escape pattern is a compile-time constant")
    })
}

/// Decode resolver escape sequences into literal text.
///
/// A lone backslash at the end of the input has no character to escape and
/// is kept as a literal backslash.
///
/// # Examples
///
/// ```
/// use zeroscout_discover::decode;
///
/// assert_eq!(decode("abc"), "abc");
/// assert_eq!(decode(r"a\.c"), "a.c");
/// assert_eq!(decode(r"a\\c"), r"a\c");
/// assert_eq!(decode(r"a\032c"), "a c");
/// ```
pub fn decode(text: &str) -> String {
    escape_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            if body.len() == 3 && body.bytes().all(|b| b.is_ascii_digit()) {
                let code: u32 = body.parse().expect("three ascii digits");
                char::from_u32(code).map(String::from).unwrap_or_default()
            } else {
                body.to_string()
            }
        })
        .into_owned()
}
