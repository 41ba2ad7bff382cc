use indexmap::IndexMap;

use crate::openapi::{HttpMethod, Location, Operation, Parameter, PathItem, RequestBody};

/// Everything the per-operation parsers need for one (path, method) pair.
#[derive(Debug)]
pub struct OperationContext<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    /// Merged path-level and operation-level parameters, request body
    /// already folded in as synthetic entries.
    pub parameters: Vec<Parameter>,
    pub operation: &'a Operation,
}

/// Walk every operation in document order and invoke `visitor` exactly once
/// per (path, method) pair.
///
/// Operation-level parameters override path-level parameters of the same
/// name. A v3 request body is folded into the parameter list: one synthetic
/// `body` parameter for JSON-ish content, or one `formData` parameter per
/// schema property for `multipart/form-data`.
pub fn traverse<F>(paths: &IndexMap<String, PathItem>, mut visitor: F)
where
    F: FnMut(OperationContext<'_>),
{
    for (path, item) in paths {
        for (method, operation) in item.operations() {
            let mut parameters: Vec<Parameter> = item
                .parameters
                .iter()
                .filter(|shared| {
                    !operation
                        .parameters
                        .iter()
                        .any(|own| own.name == shared.name)
                })
                .cloned()
                .collect();
            parameters.extend(operation.parameters.iter().cloned());

            if let Some(body) = &operation.request_body {
                fold_request_body(body, &mut parameters);
            }

            visitor(OperationContext {
                path,
                method,
                parameters,
                operation,
            });
        }
    }
}

fn fold_request_body(body: &RequestBody, parameters: &mut Vec<Parameter>) {
    if let Some(media) = body.content.get("multipart/form-data") {
        if !body.content.contains_key("application/json") {
            let Some(schema) = &media.schema else { return };
            for (name, prop) in &schema.properties {
                parameters.push(Parameter {
                    name: name.clone(),
                    location: Location::FormData,
                    description: prop.description.clone(),
                    required: schema.requires(name),
                    schema: Some(prop.clone()),
                    param_type: None,
                    format: None,
                    items: None,
                    enum_values: Vec::new(),
                });
            }
            return;
        }
    }

    let media = body
        .content
        .get("application/json")
        .or_else(|| body.content.first().map(|(_, m)| m));
    let Some(media) = media else { return };
    parameters.push(Parameter {
        name: "body".to_string(),
        location: Location::Body,
        description: body.description.clone(),
        required: body.required,
        schema: media.schema.clone(),
        param_type: None,
        format: None,
        items: None,
        enum_values: Vec::new(),
    });
}
