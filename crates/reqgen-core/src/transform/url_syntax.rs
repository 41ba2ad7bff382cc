use crate::naming::is_identifier;

/// One piece of the URL under construction: verbatim text or a JavaScript
/// expression to interpolate.
///
/// Keeping the URL structured until the final render is what lets the
/// syntax decision distinguish placeholders this pipeline injected from
/// `${`/backtick characters that were literally part of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlPart {
    Literal(String),
    Expr(String),
}

/// The URL expression being assembled for one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlDraft {
    pub parts: Vec<UrlPart>,
}

impl UrlDraft {
    /// Split a raw `/pet/{petId}` template into parts, substituting an
    /// option-bag access for each declared path parameter. Placeholders
    /// that name no declared parameter stay literal, so a sloppy document
    /// degrades visibly instead of producing a broken access.
    pub fn from_template(template: &str, path_slot: &str, path_params: &[String]) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    if path_params.iter().any(|p| p == name) {
                        if !literal.is_empty() {
                            parts.push(UrlPart::Literal(std::mem::take(&mut literal)));
                        }
                        parts.push(UrlPart::Expr(slot_access(path_slot, name)));
                    } else {
                        literal.push('{');
                        literal.push_str(name);
                        literal.push('}');
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(UrlPart::Literal(literal));
        }
        UrlDraft { parts }
    }

    /// Prepend the `baseURL` constant and drop the path's leading slash so
    /// the rendered URL never contains `//`.
    pub fn prefix_base_url(&mut self) {
        if let Some(UrlPart::Literal(first)) = self.parts.first_mut() {
            if let Some(stripped) = first.strip_prefix('/') {
                *first = stripped.to_string();
            }
            if first.is_empty() {
                self.parts.remove(0);
            }
        }
        self.parts.insert(0, UrlPart::Expr("baseURL".to_string()));
    }

    pub fn push_literal(&mut self, text: impl Into<String>) {
        self.parts.push(UrlPart::Literal(text.into()));
    }

    pub fn push_expr(&mut self, expr: impl Into<String>) {
        self.parts.push(UrlPart::Expr(expr.into()));
    }

    pub fn is_dynamic(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, UrlPart::Expr(_)))
    }
}

/// `paths.petId`, or `paths["pet-id"]` when the name cannot be a member
/// access.
fn slot_access(slot: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{slot}.{name}")
    } else {
        format!("{slot}[{}]", serde_json::Value::String(name.to_string()))
    }
}

/// Render the draft as a JavaScript expression: a plain string literal when
/// nothing is interpolated, a template literal when the literal text is
/// template-safe, and otherwise a `[...].filter(Boolean).join("/")` build
/// that quotes each static segment individually.
pub fn transform_url_syntax(draft: &UrlDraft) -> String {
    if !draft.is_dynamic() {
        let text: String = draft
            .parts
            .iter()
            .map(|p| match p {
                UrlPart::Literal(text) => text.as_str(),
                UrlPart::Expr(_) => unreachable!(),
            })
            .collect();
        return serde_json::Value::String(text).to_string();
    }

    let template_safe = draft.parts.iter().all(|p| match p {
        UrlPart::Literal(text) => {
            !text.contains('`') && !text.contains("${") && !text.contains('\\')
        }
        UrlPart::Expr(_) => true,
    });

    if template_safe {
        let mut out = String::from("`");
        for part in &draft.parts {
            match part {
                UrlPart::Literal(text) => out.push_str(text),
                UrlPart::Expr(expr) => {
                    out.push_str("${");
                    out.push_str(expr);
                    out.push('}');
                }
            }
        }
        out.push('`');
        return out;
    }

    let mut segments: Vec<String> = Vec::new();
    for part in &draft.parts {
        match part {
            UrlPart::Literal(text) => {
                for chunk in text.split('/').filter(|c| !c.is_empty()) {
                    segments.push(serde_json::Value::String(chunk.to_string()).to_string());
                }
            }
            UrlPart::Expr(expr) => segments.push(expr.clone()),
        }
    }
    format!("[{}].filter(Boolean).join(\"/\")", segments.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_path_renders_plain_string() {
        let draft = UrlDraft::from_template("/pets", "paths", &[]);
        assert_eq!(transform_url_syntax(&draft), "\"/pets\"");
    }

    #[test]
    fn test_dynamic_path_renders_template() {
        let params = vec!["id".to_string()];
        let mut draft = UrlDraft::from_template("/pets/{id}", "paths", &params);
        draft.prefix_base_url();
        assert_eq!(
            transform_url_syntax(&draft),
            "`${baseURL}pets/${paths.id}`"
        );
    }

    #[test]
    fn test_base_url_alone() {
        let mut draft = UrlDraft::from_template("/", "paths", &[]);
        draft.prefix_base_url();
        assert_eq!(transform_url_syntax(&draft), "`${baseURL}`");
    }

    #[test]
    fn test_non_identifier_param_uses_index_access() {
        let params = vec!["pet-id".to_string()];
        let draft = UrlDraft::from_template("/pets/{pet-id}", "paths", &params);
        assert_eq!(
            transform_url_syntax(&draft),
            "`/pets/${paths[\"pet-id\"]}`"
        );
    }

    #[test]
    fn test_undeclared_placeholder_stays_literal() {
        let draft = UrlDraft::from_template("/pets/{id}", "paths", &[]);
        assert_eq!(transform_url_syntax(&draft), "\"/pets/{id}\"");
    }

    #[test]
    fn test_backtick_in_path_takes_join_fallback() {
        let params = vec!["id".to_string()];
        let draft = UrlDraft::from_template("/pet`s/{id}", "paths", &params);
        assert_eq!(
            transform_url_syntax(&draft),
            "[\"pet`s\", paths.id].filter(Boolean).join(\"/\")"
        );
    }

    #[test]
    fn test_dollar_brace_in_path_takes_join_fallback() {
        let params = vec!["id".to_string()];
        let draft = UrlDraft::from_template("/v1/${env}/pets/{id}", "paths", &params);
        assert_eq!(
            transform_url_syntax(&draft),
            "[\"v1\", \"${env}\", \"pets\", paths.id].filter(Boolean).join(\"/\")"
        );
    }

    #[test]
    fn test_appended_query_suffix() {
        let mut draft = UrlDraft::from_template("/pets", "paths", &[]);
        draft.push_literal("?");
        draft.push_expr("new URLSearchParams(Object.entries(query || {}))");
        assert_eq!(
            transform_url_syntax(&draft),
            "`/pets?${new URLSearchParams(Object.entries(query || {}))}`"
        );
    }
}
