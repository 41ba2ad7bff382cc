use crate::naming::{quote_key, type_name};
use crate::openapi::{AdditionalProperties, Schema};

/// Map a schema node onto a TypeScript type expression.
///
/// This mapper has no error path: anything it cannot place degrades to
/// `any`, so a sloppy spec still yields compilable output.
pub fn parse_schema_type(schema: &Schema) -> String {
    if let Some(ref_path) = &schema.ref_path {
        return ref_type_name(ref_path);
    }

    if !schema.enum_values.is_empty() {
        return enum_union(&schema.enum_values);
    }

    match schema.schema_type.as_deref() {
        Some("string") => "string".to_string(),
        Some("integer") | Some("number") => "number".to_string(),
        Some("boolean") => "boolean".to_string(),
        Some("file") => "File".to_string(),
        Some("null") => "null".to_string(),
        Some("array") => {
            let item = match &schema.items {
                Some(items) => parse_schema_type(items),
                None => "any".to_string(),
            };
            if item.contains(" | ") {
                format!("({item})[]")
            } else {
                format!("{item}[]")
            }
        }
        Some("object") => object_type(schema),
        // Schemas often omit `type` on objects; properties are the tell.
        None if !schema.properties.is_empty() => object_type(schema),
        None if schema.additional_properties.is_some() => object_type(schema),
        _ => "any".to_string(),
    }
}

/// The generated type name a `$ref` resolves to: its last path segment,
/// normalized the same way definition names are.
pub fn ref_type_name(ref_path: &str) -> String {
    let last = ref_path.rsplit('/').next().unwrap_or(ref_path);
    type_name(last)
}

fn object_type(schema: &Schema) -> String {
    if !schema.properties.is_empty() {
        let fields: Vec<String> = schema
            .properties
            .iter()
            .map(|(name, prop)| {
                let marker = if schema.requires(name) { "" } else { "?" };
                format!("{}{marker}: {}", quote_key(name), parse_schema_type(prop))
            })
            .collect();
        return format!("{{ {} }}", fields.join("; "));
    }

    match &schema.additional_properties {
        Some(AdditionalProperties::Schema(value)) => {
            format!("Record<string, {}>", parse_schema_type(value))
        }
        _ => "Record<string, any>".to_string(),
    }
}

fn enum_union(values: &[serde_json::Value]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => {
                serde_json::Value::String(s.clone()).to_string()
            }
            other => other.to_string(),
        })
        .collect();
    parts.join(" | ")
}
