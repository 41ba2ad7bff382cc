use crate::naming::quote_key;

/// One entry of a JavaScript object literal.
///
/// Option bags passed to HTTP clients are built from these instead of raw
/// strings so transforms can rewrite keys (`query` -> `params`) or wrap
/// values (`JSON.stringify(body)`) without re-parsing rendered code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralField {
    /// `name` — shorthand property, key and value share one identifier.
    Shorthand(String),
    /// `key: value`.
    Pair { key: String, value: String },
    /// `...expr`.
    Spread(String),
}

impl LiteralField {
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        LiteralField::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key this field binds, when it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            LiteralField::Shorthand(name) => Some(name),
            LiteralField::Pair { key, .. } => Some(key),
            LiteralField::Spread(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            LiteralField::Shorthand(name) => name.clone(),
            LiteralField::Pair { key, value } => format!("{}: {value}", quote_key(key)),
            LiteralField::Spread(expr) => format!("...{expr}"),
        }
    }
}

/// Render fields as a single-line object literal: `{ a, b: c, ...rest }`.
pub fn render_object_literal(fields: &[LiteralField]) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let parts: Vec<String> = fields.iter().map(LiteralField::render).collect();
    format!("{{ {} }}", parts.join(", "))
}
