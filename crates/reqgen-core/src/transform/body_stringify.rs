use crate::ir::{requiredness_of, Requiredness, StatementField};
use crate::literal::LiteralField;
use crate::preset::BodyStrategy;

/// Adapt the grouped body parameter to the target client's body option.
///
/// `Stringify` wraps the value in `JSON.stringify(...)` for clients that
/// send raw bytes, with an `|| {}` fallback when the parameter is optional.
/// `Rename` re-keys it under the client's serializing option (`json` for
/// ky/got). A `FormData` body is always passed through untouched, and `any`
/// is never stringified. Absent slot: no-op.
pub fn transform_body_stringify(
    options: &mut [LiteralField],
    fields: &[StatementField],
    slot: &str,
    strategy: BodyStrategy,
) {
    let requiredness = requiredness_of(fields, slot);
    if requiredness == Requiredness::Absent {
        return;
    }

    let body_type = fields
        .iter()
        .find(|f| f.name == slot)
        .and_then(|f| f.type_expr.as_deref())
        .unwrap_or("any");
    if body_type == "FormData" {
        return;
    }

    let entry = options
        .iter_mut()
        .find(|f| matches!(f, LiteralField::Shorthand(name) if name == slot));
    let Some(entry) = entry else { return };

    match strategy {
        BodyStrategy::Options => {}
        BodyStrategy::Rename { key } => {
            *entry = LiteralField::pair(key, slot);
        }
        BodyStrategy::Stringify => {
            if body_type == "any" {
                return;
            }
            let value = if requiredness.is_optional() {
                format!("JSON.stringify({slot} || {{}})")
            } else {
                format!("JSON.stringify({slot})")
            };
            *entry = LiteralField::pair(slot, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_field(type_expr: &str, optional: bool) -> Vec<StatementField> {
        let field = StatementField::new("body", type_expr);
        vec![if optional { field.optional() } else { field }]
    }

    fn body_options() -> Vec<LiteralField> {
        vec![
            LiteralField::Shorthand("body".to_string()),
            LiteralField::Spread("init".to_string()),
        ]
    }

    #[test]
    fn test_absent_body_is_a_no_op() {
        let mut options = vec![LiteralField::Spread("init".to_string())];
        let before = options.clone();
        transform_body_stringify(&mut options, &[], "body", BodyStrategy::Stringify);
        assert_eq!(options, before);
    }

    #[test]
    fn test_stringify_wraps_body() {
        let mut options = body_options();
        transform_body_stringify(
            &mut options,
            &body_field("Pet", false),
            "body",
            BodyStrategy::Stringify,
        );
        assert_eq!(options[0], LiteralField::pair("body", "JSON.stringify(body)"));
    }

    #[test]
    fn test_stringify_optional_gets_fallback() {
        let mut options = body_options();
        transform_body_stringify(
            &mut options,
            &body_field("Pet", true),
            "body",
            BodyStrategy::Stringify,
        );
        assert_eq!(
            options[0],
            LiteralField::pair("body", "JSON.stringify(body || {})")
        );
    }

    #[test]
    fn test_form_data_is_never_wrapped() {
        let mut options = body_options();
        let before = options.clone();
        transform_body_stringify(
            &mut options,
            &body_field("FormData", false),
            "body",
            BodyStrategy::Stringify,
        );
        assert_eq!(options, before);

        transform_body_stringify(
            &mut options,
            &body_field("FormData", false),
            "body",
            BodyStrategy::Rename { key: "json" },
        );
        assert_eq!(options, before);
    }

    #[test]
    fn test_any_is_not_stringified() {
        let mut options = body_options();
        let before = options.clone();
        transform_body_stringify(
            &mut options,
            &body_field("any", false),
            "body",
            BodyStrategy::Stringify,
        );
        assert_eq!(options, before);
    }

    #[test]
    fn test_rename_rekeys_body() {
        let mut options = body_options();
        transform_body_stringify(
            &mut options,
            &body_field("Pet", true),
            "body",
            BodyStrategy::Rename { key: "json" },
        );
        assert_eq!(options[0], LiteralField::pair("json", "body"));
    }
}
