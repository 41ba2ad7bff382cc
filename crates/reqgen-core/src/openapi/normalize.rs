use serde_json::Value;

/// Rewrite an OpenAPI v3 document into the v2 shape the rest of the
/// pipeline consumes. v2 documents pass through untouched.
///
/// The adaptation is deliberately lossy: only `servers[0]` feeds `host` and
/// `basePath` (both get the full URL, not its parts), and `schemes` receives
/// every server URL verbatim. The base-URL transform understands this
/// approximation and treats scheme entries containing `://` as full URLs.
/// Malformed documents are never rejected here; absent fields stay absent
/// and degrade downstream.
pub fn normalize(mut doc: Value) -> Value {
    let Some(root) = doc.as_object_mut() else {
        return doc;
    };

    let is_v3 = root
        .get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|v| v.starts_with('3'));
    if !is_v3 {
        return doc;
    }

    root.insert("swagger".to_string(), Value::String("2.0".to_string()));

    let server_urls: Vec<String> = root
        .get("servers")
        .and_then(Value::as_array)
        .map(|servers| {
            servers
                .iter()
                .filter_map(|s| s.get("url").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(first) = server_urls.first() {
        root.insert("host".to_string(), Value::String(first.clone()));
        root.insert("basePath".to_string(), Value::String(first.clone()));
    }
    if !server_urls.is_empty() {
        root.insert(
            "schemes".to_string(),
            Value::Array(server_urls.into_iter().map(Value::String).collect()),
        );
    }

    if let Some(schemas) = root
        .get_mut("components")
        .and_then(|c| c.as_object_mut())
        .and_then(|c| c.remove("schemas"))
    {
        root.insert("definitions".to_string(), schemas);
    }

    doc
}
