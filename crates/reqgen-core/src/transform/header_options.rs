use crate::ir::{requiredness_of, Requiredness, StatementField};
use crate::literal::LiteralField;
use crate::preset::SlotNames;

/// Build the explicit `Content-Type` header for clients that do not set one
/// themselves (the fetch family).
///
/// Runs only when the operation carries a body: `multipart/form-data` when
/// the body slot holds a `FormData` value, `application/json` otherwise. An
/// explicit headers parameter is merged in via spread, which safely
/// collapses to nothing when the optional parameter is omitted at runtime.
pub fn transform_header_options(
    options: &mut Vec<LiteralField>,
    fields: &[StatementField],
    slots: &SlotNames,
) {
    if requiredness_of(fields, slots.body) == Requiredness::Absent {
        return;
    }

    let body_is_form_data = fields
        .iter()
        .find(|f| f.name == slots.body)
        .and_then(|f| f.type_expr.as_deref())
        == Some("FormData");
    let content_type = if body_is_form_data {
        "multipart/form-data"
    } else {
        "application/json"
    };

    let has_headers_param = requiredness_of(fields, slots.headers) != Requiredness::Absent;
    let value = if has_headers_param {
        format!("{{ \"Content-Type\": \"{content_type}\", ...{} }}", slots.headers)
    } else {
        format!("{{ \"Content-Type\": \"{content_type}\" }}")
    };
    let entry = LiteralField::pair(slots.headers, value);

    let existing = options
        .iter()
        .position(|f| matches!(f, LiteralField::Shorthand(name) if name == slots.headers));
    match existing {
        Some(idx) => options[idx] = entry,
        None => {
            // Keep the trailing spread last.
            let idx = options
                .iter()
                .position(|f| matches!(f, LiteralField::Spread(_)))
                .unwrap_or(options.len());
            options.insert(idx, entry);
        }
    }
}
