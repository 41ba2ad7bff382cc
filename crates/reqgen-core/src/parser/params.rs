use std::collections::HashSet;

use crate::ir::{Interface, Requiredness, StatementField};
use crate::literal::LiteralField;
use crate::naming::{quote_key, type_name, unique_name};
use crate::openapi::{Location, Parameter};
use crate::preset::Preset;
use crate::traverse::OperationContext;
use crate::typemap::parse_schema_type;

/// Grouped parameter output for one operation: the signature fields, the
/// call option-bag entries, and any auxiliary interfaces the grouping
/// created.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameters {
    /// Signature fields in call order: required slots, optional slots, then
    /// the preset's per-call config parameter.
    pub fields: Vec<StatementField>,
    /// `fields` plus dotted sub-entries for expanded form-data properties,
    /// used when types must be conveyed through doc comments.
    pub doc_fields: Vec<StatementField>,
    /// Option-bag entries for the slots that ride in the call options
    /// (query/body/headers; path parameters only feed the URL).
    pub options: Vec<LiteralField>,
    /// Interfaces backing grouped query/body slots, destined for the type
    /// scope.
    pub interfaces: Vec<Interface>,
    /// Path parameter names, for URL template substitution.
    pub path_params: Vec<String>,
    /// The body slot carries a `FormData` value.
    pub body_is_form_data: bool,
}

/// Group an operation's merged parameters into named option-bag slots.
///
/// `type_names` tracks every generated type name so auxiliary interfaces
/// never collide with definitions or with each other.
pub fn parse_method_parameters(
    ctx: &OperationContext<'_>,
    preset: &Preset,
    op_name: &str,
    params_partial: bool,
    type_names: &mut HashSet<String>,
) -> MethodParameters {
    let mut path_params: Vec<&Parameter> = Vec::new();
    let mut query_params: Vec<&Parameter> = Vec::new();
    let mut header_params: Vec<&Parameter> = Vec::new();
    let mut form_params: Vec<&Parameter> = Vec::new();
    let mut body_param: Option<&Parameter> = None;

    for param in &ctx.parameters {
        match param.location {
            Location::Path => path_params.push(param),
            Location::Query => query_params.push(param),
            Location::Header => header_params.push(param),
            Location::FormData => form_params.push(param),
            Location::Body => {
                if body_param.is_none() {
                    body_param = Some(param);
                }
            }
            // Cookie parameters have no slot; clients manage cookies.
            Location::Cookie => {}
        }
    }

    let mut slots: Vec<StatementField> = Vec::new();
    let mut interfaces: Vec<Interface> = Vec::new();
    let mut body_is_form_data = false;

    if !path_params.is_empty() {
        slots.push(StatementField {
            name: preset.slots.path.to_string(),
            type_expr: Some(inline_object_type(&path_params, true)),
            requiredness: Requiredness::Required,
            description: None,
        });
    }

    if !query_params.is_empty() {
        let iface_name = unique_name(
            &format!("{}{}", type_name(op_name), type_name(preset.slots.query)),
            type_names,
        );
        interfaces.push(Interface {
            name: iface_name.clone(),
            doc: Vec::new(),
            fields: query_params
                .iter()
                .map(|p| param_field(p, params_partial))
                .collect(),
            export: true,
        });
        let optional = params_partial || query_params.iter().all(|p| !p.required);
        slots.push(StatementField {
            name: preset.slots.query.to_string(),
            type_expr: Some(iface_name),
            requiredness: Requiredness::from_required(!optional),
            description: None,
        });
    }

    if let Some(body) = body_param {
        let type_expr = match &body.schema {
            Some(schema) if schema.is_inline_object() => {
                let iface_name = unique_name(
                    &format!("{}{}", type_name(op_name), type_name(preset.slots.body)),
                    type_names,
                );
                interfaces.push(Interface {
                    name: iface_name.clone(),
                    doc: Vec::new(),
                    fields: schema
                        .properties
                        .iter()
                        .map(|(name, prop)| StatementField {
                            name: name.clone(),
                            type_expr: Some(parse_schema_type(prop)),
                            requiredness: if params_partial {
                                Requiredness::Optional
                            } else {
                                Requiredness::from_required(schema.requires(name))
                            },
                            description: prop.description.clone(),
                        })
                        .collect(),
                    export: true,
                });
                iface_name
            }
            Some(schema) => parse_schema_type(schema),
            None => "any".to_string(),
        };
        slots.push(StatementField {
            name: preset.slots.body.to_string(),
            type_expr: Some(type_expr),
            requiredness: Requiredness::from_required(body.required),
            description: body.description.clone(),
        });
    } else if !form_params.is_empty() {
        body_is_form_data = true;
        let required = form_params.iter().any(|p| p.required);
        slots.push(StatementField {
            name: preset.slots.body.to_string(),
            type_expr: Some("FormData".to_string()),
            requiredness: Requiredness::from_required(required),
            description: None,
        });
    }

    if !header_params.is_empty() {
        let optional = header_params.iter().all(|p| !p.required);
        slots.push(StatementField {
            name: preset.slots.headers.to_string(),
            type_expr: Some(inline_object_type(&header_params, false)),
            requiredness: Requiredness::from_required(!optional),
            description: None,
        });
    }

    // Required slots precede optional ones so call sites never skip
    // positions; relative order within each group is preserved.
    let (required, optional): (Vec<_>, Vec<_>) = slots
        .into_iter()
        .partition(|f| f.requiredness == Requiredness::Required);
    let mut fields: Vec<StatementField> = required;
    fields.extend(optional);

    // Everything but path rides in the option bag, in slot order.
    let mut options: Vec<LiteralField> = Vec::new();
    for slot in [preset.slots.query, preset.slots.body, preset.slots.headers] {
        if fields.iter().any(|f| f.name == slot) {
            options.push(LiteralField::Shorthand(slot.to_string()));
        }
    }

    if let Some(config_param) = &preset.config_param {
        fields.push(
            StatementField::new(config_param.name, config_param.type_expr).optional(),
        );
        options.push(LiteralField::Spread(config_param.name.to_string()));
    }

    let mut doc_fields: Vec<StatementField> = Vec::new();
    for field in &fields {
        doc_fields.push(field.clone());
        if body_is_form_data && field.name == preset.slots.body {
            for param in &form_params {
                let mut sub = param_field(param, false);
                sub.name = format!("{}.{}", preset.slots.body, param.name);
                doc_fields.push(sub);
            }
        }
    }

    MethodParameters {
        fields,
        doc_fields,
        options,
        interfaces,
        path_params: path_params.iter().map(|p| p.name.clone()).collect(),
        body_is_form_data,
    }
}

fn param_field(param: &Parameter, params_partial: bool) -> StatementField {
    StatementField {
        name: param.name.clone(),
        type_expr: Some(parse_schema_type(&param.effective_schema())),
        requiredness: if params_partial {
            Requiredness::Optional
        } else {
            Requiredness::from_required(param.required)
        },
        description: param.description.clone(),
    }
}

/// `{ petId: number; verbose?: boolean }` for path and header groups.
fn inline_object_type(params: &[&Parameter], force_required: bool) -> String {
    let fields: Vec<String> = params
        .iter()
        .map(|p| {
            let marker = if force_required || p.required { "" } else { "?" };
            format!(
                "{}{marker}: {}",
                quote_key(&p.name),
                parse_schema_type(&p.effective_schema())
            )
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}
