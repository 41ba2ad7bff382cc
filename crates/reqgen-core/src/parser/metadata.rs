use crate::config::ResponseType;
use crate::naming::var_name;
use crate::traverse::OperationContext;
use crate::typemap::parse_schema_type;

/// Per-operation facts that do not depend on parameter grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMetadata {
    /// camelCase operation name derived from method + path.
    pub name: String,
    /// Human-readable description lines for the doc comment.
    pub description: Vec<String>,
    pub method: String,
    /// The raw URL template with `{param}` placeholders.
    pub url_template: String,
    /// The narrowed response type from the success response schema.
    pub response_type: String,
    pub deprecated: bool,
}

/// Derive the operation name, description lines, URL template, and narrowed
/// response type for one operation.
///
/// Names come from `"{method} {path}"`, never from `operationId`: route
/// derivation is collision-free across documents that reuse ids and stays
/// stable when ids are edited.
pub fn parse_method_metadata(ctx: &OperationContext<'_>) -> MethodMetadata {
    let name = var_name(&format!("{} {}", ctx.method.as_str(), ctx.path));

    let mut description = Vec::new();
    if let Some(summary) = &ctx.operation.summary {
        let summary = summary.trim();
        if !summary.is_empty() {
            description.push(summary.to_string());
        }
    }
    if let Some(text) = &ctx.operation.description {
        for line in text.lines() {
            let line = line.trim();
            if !line.is_empty() {
                description.push(line.to_string());
            }
        }
    }

    let response_type = ctx
        .operation
        .success_response()
        .and_then(|response| response.body_schema())
        .map(parse_schema_type)
        .unwrap_or_else(|| "any".to_string());

    MethodMetadata {
        name,
        description,
        method: ctx.method.as_str().to_string(),
        url_template: ctx.path.to_string(),
        response_type,
        deprecated: ctx.operation.deprecated,
    }
}

/// Apply the preset wrapper and any config override to the narrowed type.
///
/// A configured fixed string wins outright. A configured generic replaces
/// the preset wrapper; `infer: false` substitutes `any` for the narrowed
/// type. In every case the narrowed type fills the wrapper's standalone `T`
/// placeholder.
pub fn wrap_response_type(
    preset_wrapper: &str,
    config: Option<&ResponseType>,
    narrowed: &str,
) -> String {
    match config {
        Some(ResponseType::Fixed(fixed)) => fixed.clone(),
        Some(ResponseType::Generic { generic, infer }) => {
            let wrapper = generic.as_deref().unwrap_or(preset_wrapper);
            let narrowed = if *infer == Some(false) { "any" } else { narrowed };
            substitute_generic(wrapper, narrowed)
        }
        None => substitute_generic(preset_wrapper, narrowed),
    }
}

/// Replace each standalone `T` token in `wrapper` with `narrowed`.
pub fn substitute_generic(wrapper: &str, narrowed: &str) -> String {
    let mut out = String::with_capacity(wrapper.len() + narrowed.len());
    let mut token = String::new();
    for ch in wrapper.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
            token.push(ch);
        } else {
            flush_token(&mut out, &mut token, narrowed);
            out.push(ch);
        }
    }
    flush_token(&mut out, &mut token, narrowed);
    out
}

fn flush_token(out: &mut String, token: &mut String, narrowed: &str) {
    if token == "T" {
        out.push_str(narrowed);
    } else {
        out.push_str(token);
    }
    token.clear();
}
