use crate::config::BaseUrl;
use crate::ir::Variable;
use crate::openapi::Swagger;

/// Resolve the exported `baseURL` constant for a run, if any.
///
/// An explicit config value wins; `baseURL: false` suppresses the constant
/// entirely and leaves generated URLs relative. Otherwise the value is
/// derived from the document's scheme + host + basePath, preferring https
/// when several schemes are declared. Normalized v3 documents carry full
/// URLs in `schemes`; an entry containing `://` is taken verbatim instead
/// of being recombined with host. The result always ends with exactly one
/// `/` so path templates can concatenate without doubling slashes.
pub fn transform_base_url(spec: &Swagger, config: Option<&BaseUrl>) -> Option<Variable> {
    let url = match config {
        Some(BaseUrl::Enabled(false)) => return None,
        Some(BaseUrl::Value(value)) => normalize_trailing_slash(value),
        Some(BaseUrl::Enabled(true)) | None => derive_from_spec(spec)?,
    };
    Some(Variable {
        name: "baseURL".to_string(),
        type_expr: None,
        value: serde_json::Value::String(url).to_string(),
        export: true,
    })
}

fn derive_from_spec(spec: &Swagger) -> Option<String> {
    let scheme = spec
        .schemes
        .iter()
        .find(|s| s.starts_with("https"))
        .or_else(|| spec.schemes.first())?;

    if scheme.contains("://") {
        return Some(normalize_trailing_slash(scheme));
    }

    let host = spec.host.as_deref()?;
    let base_path = spec.base_path.as_deref().unwrap_or("");
    Some(normalize_trailing_slash(&format!("{scheme}://{host}{base_path}")))
}

fn normalize_trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}
