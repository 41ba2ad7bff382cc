use std::collections::HashSet;

use crate::compile::param_doc_line;
use crate::config::{import_specifier, Config, Syntax};
use crate::ir::{Function, Graphs, Import, Interface, Requiredness, Scope, StatementField, TypeAlias};
use crate::literal::{render_object_literal, LiteralField};
use crate::naming::{type_name, unique_name};
use crate::openapi::{HttpMethod, Swagger};
use crate::preset::{CallShape, Preset};
use crate::transform::{
    qualify_type, transform_base_url, transform_body_stringify, transform_header_options,
    transform_query_params, transform_url_syntax, UrlDraft,
};
use crate::traverse::traverse;
use crate::typemap::parse_schema_type;

use super::{parse_method_metadata, parse_method_parameters, wrap_response_type};

/// Build the per-scope node graphs for one document.
///
/// Nodes are appended in one pass over the document: file banner, imports,
/// the `baseURL` constant, every definition, then every operation in path
/// order. When the declarations file is disabled, type nodes land in the
/// main scope instead and references stay unqualified.
pub fn parse_document(spec: &Swagger, preset: &Preset, config: &Config) -> Graphs {
    let main_path = config.main_output();
    let type_path = config.type_output(&main_path);
    let syntax = config.resolved_syntax(&main_path);
    let type_scope = if type_path.is_some() {
        Scope::Type
    } else {
        Scope::Main
    };

    let mut graphs = Graphs::new();

    let mut banner = vec!["Generated by reqgen. Do not edit.".to_string()];
    if let Some(name) = spec.display_name() {
        banner.push(name);
    }
    graphs.main.comments = banner.clone();
    if type_path.is_some() {
        graphs.types.comments = banner.clone();
    }
    if preset.hooks {
        graphs.api.comments = banner;
    }

    if let Some(http) = &preset.http_import {
        let from = config
            .import
            .as_ref()
            .and_then(|i| i.http.clone())
            .unwrap_or_else(|| http.from.to_string());
        graphs.main.imports.push(Import {
            default_name: http.default_name.map(str::to_string),
            named: http.named.iter().map(|s| s.to_string()).collect(),
            type_named: http.type_named.iter().map(|s| s.to_string()).collect(),
            from,
            ..Import::default()
        });
    }

    // The specifier the main scope reaches its declarations through. The
    // namespace import only survives typescript output; javascript goes
    // through inline `import("...")` references instead.
    let type_specifier = type_path.as_deref().map(|path| {
        config
            .import
            .as_ref()
            .and_then(|i| i.types.clone())
            .unwrap_or_else(|| import_specifier(path))
    });
    let qualify_prefix = type_specifier.as_deref().map(|spec| match syntax {
        Syntax::Typescript => "Types.".to_string(),
        Syntax::Javascript => format!("import(\"{spec}\")."),
    });
    if let Some(spec) = &type_specifier {
        graphs.main.imports.push(Import {
            namespace: Some("Types".to_string()),
            type_only: true,
            from: spec.clone(),
            ..Import::default()
        });
    }

    let base_url = transform_base_url(spec, config.base_url.as_ref());
    let has_base_url = base_url.is_some();
    if let Some(variable) = base_url {
        graphs.main.variables.push(variable);
    }

    // Definitions claim their names first so `$ref` targets resolve exactly;
    // auxiliary interfaces are uniqued against them afterwards.
    let mut type_names: HashSet<String> = HashSet::new();
    for (name, schema) in &spec.definitions {
        let decl_name = unique_name(&type_name(name), &mut type_names);
        let doc = doc_lines(schema.description.as_deref());
        if schema.is_inline_object() {
            graphs.scope_mut(type_scope).interfaces.push(Interface {
                name: decl_name,
                doc,
                fields: schema
                    .properties
                    .iter()
                    .map(|(prop, prop_schema)| StatementField {
                        name: prop.clone(),
                        type_expr: Some(parse_schema_type(prop_schema)),
                        requiredness: Requiredness::from_required(schema.requires(prop)),
                        description: prop_schema.description.clone(),
                    })
                    .collect(),
                export: true,
            });
        } else {
            graphs.scope_mut(type_scope).typings.push(TypeAlias {
                name: decl_name,
                doc,
                value: parse_schema_type(schema),
                export: true,
            });
        }
    }

    let mut op_names: HashSet<String> = HashSet::new();
    let mut hook_imports: Vec<String> = Vec::new();

    traverse(&spec.paths, |ctx| {
        let metadata = parse_method_metadata(&ctx);
        let op_name = unique_name(&metadata.name, &mut op_names);
        let parsed = parse_method_parameters(
            &ctx,
            preset,
            &op_name,
            config.params_partial,
            &mut type_names,
        );
        graphs
            .scope_mut(type_scope)
            .interfaces
            .extend(parsed.interfaces);

        let mut options = parsed.options;
        let mut url = UrlDraft::from_template(
            &metadata.url_template,
            preset.slots.path,
            &parsed.path_params,
        );
        transform_query_params(
            &mut options,
            &mut url,
            &parsed.fields,
            preset.slots.query,
            preset.query,
        );
        transform_body_stringify(&mut options, &parsed.fields, preset.slots.body, preset.body);
        if preset.content_type_header {
            transform_header_options(&mut options, &parsed.fields, &preset.slots);
        }
        if has_base_url {
            url.prefix_base_url();
        }
        let url_expr = transform_url_syntax(&url);

        // Signature types now reference the declarations file.
        let mut fields = parsed.fields;
        let mut doc_fields = parsed.doc_fields;
        if let Some(prefix) = &qualify_prefix {
            for field in fields.iter_mut().chain(doc_fields.iter_mut()) {
                if let Some(ty) = &field.type_expr {
                    field.type_expr = Some(qualify_type(ty, &type_names, prefix));
                }
            }
        }
        let narrowed = match &qualify_prefix {
            Some(prefix) => qualify_type(&metadata.response_type, &type_names, prefix),
            None => metadata.response_type.clone(),
        };
        let return_type =
            wrap_response_type(preset.response_wrapper, config.response_type.as_ref(), &narrowed);

        let mut doc = metadata.description.clone();
        if metadata.deprecated {
            doc.push("@deprecated".to_string());
        }
        if syntax == Syntax::Javascript {
            for field in &doc_fields {
                doc.push(param_doc_line(field, true));
            }
            doc.push(format!("@returns {{{return_type}}}"));
        }

        let method_value = format!("\"{}\"", preset.method_format.render(ctx.method.as_str()));
        let body_line = match preset.call_shape {
            CallShape::OptionsOnly => {
                options.insert(0, LiteralField::pair("method", method_value));
                options.insert(1, LiteralField::pair("url", url_expr));
                format!("return {}({});", preset.callee, render_object_literal(&options))
            }
            CallShape::UrlAndOptions => {
                options.insert(0, LiteralField::pair("method", method_value));
                format!(
                    "return {}({url_expr}, {});",
                    preset.callee,
                    render_object_literal(&options)
                )
            }
        };

        if preset.hooks && ctx.method == HttpMethod::Get {
            let config_name = preset.config_param.map(|c| c.name);
            graphs
                .api
                .functions
                .push(build_hook(&op_name, ctx.path, &fields, config_name));
            hook_imports.push(op_name.clone());
        }

        graphs.main.functions.push(Function {
            name: op_name,
            doc,
            params: fields,
            return_type: Some(return_type),
            body: vec![body_line],
            export: true,
        });
    });

    if !hook_imports.is_empty() {
        graphs.api.imports.push(Import {
            default_name: Some("useSWR".to_string()),
            from: "swr".to_string(),
            ..Import::default()
        });
        graphs.api.imports.push(Import {
            named: hook_imports,
            from: import_specifier(&main_path),
            ..Import::default()
        });
        if let Some(spec) = type_specifier {
            graphs.api.imports.push(Import {
                namespace: Some("Types".to_string()),
                type_only: true,
                from: spec,
                ..Import::default()
            });
        }
    }

    graphs
}

/// A query hook delegating to the request function. Every data argument
/// keys the cache entry; the per-call config argument does not.
fn build_hook(
    op_name: &str,
    path: &str,
    fields: &[StatementField],
    config_param: Option<&str>,
) -> Function {
    let mut key_parts = vec![format!("\"get {path}\"")];
    key_parts.extend(
        fields
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| Some(*name) != config_param)
            .map(str::to_string),
    );
    let call_args: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    let body = format!(
        "return useSWR([{}], () => {op_name}({}));",
        key_parts.join(", "),
        call_args.join(", ")
    );
    Function {
        name: format!("use{}", type_name(op_name)),
        doc: Vec::new(),
        params: fields.to_vec(),
        return_type: None,
        body: vec![body],
        export: true,
    }
}

fn doc_lines(text: Option<&str>) -> Vec<String> {
    match text {
        Some(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}
