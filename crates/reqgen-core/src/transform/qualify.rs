use std::collections::HashSet;

/// Rewrite bare type names that match generated declarations into
/// namespaced references (`Pet` -> `Types.Pet`).
///
/// Works on rendered type expressions, so it must not touch quoted string
/// literals (enum unions), members already behind a dot, or object-literal
/// keys that happen to share a declaration's name.
pub fn qualify_type(expr: &str, names: &HashSet<String>, prefix: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;
    let mut in_string: Option<char> = None;
    let mut prev_significant: Option<char> = None;

    while i < chars.len() {
        let ch = chars[i];

        if let Some(quote) = in_string {
            out.push(ch);
            if ch == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if ch == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        if ch == '"' || ch == '\'' || ch == '`' {
            in_string = Some(ch);
            out.push(ch);
            prev_significant = Some(ch);
            i += 1;
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' || ch == '$' {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '$')
            {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            let after_dot = prev_significant == Some('.');
            if names.contains(&ident) && !after_dot && !is_key_position(&chars, i) {
                out.push_str(prefix);
            }
            out.push_str(&ident);
            prev_significant = Some('i');
            continue;
        }

        out.push(ch);
        if !ch.is_whitespace() {
            prev_significant = Some(ch);
        }
        i += 1;
    }

    out
}

/// An identifier directly followed by `:` (or `?:`) is an object-literal
/// key, not a type reference.
fn is_key_position(chars: &[char], mut i: usize) -> bool {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '?' {
        i += 1;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
    }
    i < chars.len() && chars[i] == ':'
}
