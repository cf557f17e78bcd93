//! String and byte helpers: merging, joining, splitting and scalar parsing.

use crate::value::Value;

/// Concatenate `parts` in order.
///
/// ```
/// use stew::strings::merge_strings;
/// assert_eq!(merge_strings(&["callback", "(", "jsonString", ")"]), "callback(jsonString)");
/// ```
#[must_use]
pub fn merge_strings<S: AsRef<str>>(parts: &[S]) -> String {
    let mut merged = String::with_capacity(parts.iter().map(|p| p.as_ref().len()).sum());
    for part in parts {
        merged.push_str(part.as_ref());
    }
    merged
}

/// Concatenate `parts` last to first.
#[must_use]
pub fn merge_strings_reversed<S: AsRef<str>>(parts: &[S]) -> String {
    let mut merged = String::with_capacity(parts.iter().map(|p| p.as_ref().len()).sum());
    for part in parts.iter().rev() {
        merged.push_str(part.as_ref());
    }
    merged
}

/// Join `parts` in order, with `separator` between each pair.
///
/// ```
/// use stew::strings::join_strings;
/// assert_eq!(join_strings("/", &["projects", "centivus"]), "projects/centivus");
/// ```
#[must_use]
pub fn join_strings<S: AsRef<str>>(separator: &str, parts: &[S]) -> String {
    let mut joined = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(part.as_ref());
    }
    joined
}

/// Join `parts` last to first, with `separator` between each pair.
#[must_use]
pub fn join_strings_reversed<S: AsRef<str>>(separator: &str, parts: &[S]) -> String {
    let mut joined = String::new();
    for (i, part) in parts.iter().rev().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(part.as_ref());
    }
    joined
}

/// Concatenate byte slices in order.
#[must_use]
pub fn merge_bytes<B: AsRef<[u8]>>(parts: &[B]) -> Vec<u8> {
    let mut merged = Vec::with_capacity(parts.iter().map(|p| p.as_ref().len()).sum());
    for part in parts {
        merged.extend_from_slice(part.as_ref());
    }
    merged
}

/// Join byte slices in order, with `separator` between each pair.
#[must_use]
pub fn join_bytes<B: AsRef<[u8]>>(separator: &[u8], parts: &[B]) -> Vec<u8> {
    let mut joined = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            joined.extend_from_slice(separator);
        }
        joined.extend_from_slice(part.as_ref());
    }
    joined
}

/// Split `s` before every character matching `predicate`.
///
/// A match on the first character does not produce an empty leading segment.
pub fn split_by(s: &str, mut predicate: impl FnMut(char) -> bool) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if i > start && predicate(c) {
            segments.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        segments.push(&s[start..]);
    }
    segments
}

/// Split `s` before every uppercase character.
///
/// ```
/// use stew::strings::split_by_camel_case;
/// assert_eq!(split_by_camel_case("SplitByCase"), vec!["Split", "By", "Case"]);
/// ```
#[must_use]
pub fn split_by_camel_case(s: &str) -> Vec<&str> {
    split_by(s, char::is_uppercase)
}

fn unquote(s: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        s.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// Interpret text as the scalar it spells.
///
/// - `""` and `"null"` are [`Value::Null`]
/// - `true`/`false` in any case are booleans
/// - integers that fit an `i64` are [`Value::Int`], other finite numbers are
///   [`Value::Float`]. Integers beyond `i64`, such as `u64::MAX`, lose
///   precision to the nearest `f64`
/// - text wrapped in single or double quotes is the quoted text, verbatim
/// - anything else is returned as a string
#[must_use]
pub fn parse(s: &str) -> Value {
    if s.is_empty() || s == "null" {
        return Value::Null;
    }
    if s.len() >= 2
        && let Some(inner) = unquote(s)
    {
        return Value::Str(inner.to_string());
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = s.parse::<f64>()
        && f.is_finite()
    {
        return Value::Float(f);
    }
    Value::Str(s.to_string())
}
