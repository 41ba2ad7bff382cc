use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToPascalCase};

/// Derive a camelCase JavaScript identifier from an arbitrary string.
///
/// Non-ASCII text is transliterated first, so `"get /café/{id}"` becomes
/// `getCafeId`-style output instead of being stripped to nothing.
pub fn var_name(input: &str) -> String {
    let sanitized = sanitize_identifier(&deunicode::deunicode(input));
    guard_leading_digit(sanitized.to_lower_camel_case())
}

/// Derive a PascalCase type name from an arbitrary string.
pub fn type_name(input: &str) -> String {
    let sanitized = sanitize_identifier(&deunicode::deunicode(input));
    guard_leading_digit(sanitized.to_pascal_case())
}

/// Whether `s` can appear bare as a JavaScript identifier (and therefore as
/// an unquoted object key or dot-access member).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render `key` for use in an object literal: bare when it is a valid
/// identifier, double-quoted with escapes otherwise.
pub fn quote_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

/// Return `base` unchanged if unused, else the first of `base2`, `base3`, ...
/// not yet in `used`. The chosen name is recorded in `used`.
pub fn unique_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}{counter}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// Collapse runs of non-alphanumeric characters into single separators so
/// heck sees clean word boundaries.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

/// heck keeps leading digits, which JavaScript identifiers cannot start with.
fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}
