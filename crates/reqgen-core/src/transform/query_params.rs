use crate::ir::{requiredness_of, Requiredness, StatementField};
use crate::literal::LiteralField;
use crate::preset::QueryStrategy;

use super::url_syntax::UrlDraft;

/// Route the grouped query parameter to wherever the target client accepts
/// it.
///
/// `Options` leaves the shorthand entry alone (the client takes the object
/// under the slot name). `SearchParams` re-keys it wrapped in
/// `new URLSearchParams(...)`. `UrlSuffix` removes it from the options and
/// appends a search-string expression to the URL instead. When the slot is
/// absent this is a no-op.
pub fn transform_query_params(
    options: &mut Vec<LiteralField>,
    url: &mut UrlDraft,
    fields: &[StatementField],
    slot: &str,
    strategy: QueryStrategy,
) {
    let requiredness = requiredness_of(fields, slot);
    if requiredness == Requiredness::Absent {
        return;
    }

    let entries_expr = if requiredness.is_optional() {
        format!("new URLSearchParams(Object.entries({slot} || {{}}))")
    } else {
        format!("new URLSearchParams(Object.entries({slot}))")
    };

    match strategy {
        QueryStrategy::Options => {}
        QueryStrategy::SearchParams { key } => {
            if let Some(entry) = find_shorthand(options, slot) {
                *entry = LiteralField::pair(key, entries_expr);
            }
        }
        QueryStrategy::UrlSuffix => {
            options.retain(|f| !matches!(f, LiteralField::Shorthand(name) if name == slot));
            url.push_literal("?");
            url.push_expr(entries_expr);
        }
    }
}

fn find_shorthand<'a>(
    options: &'a mut [LiteralField],
    slot: &str,
) -> Option<&'a mut LiteralField> {
    options
        .iter_mut()
        .find(|f| matches!(f, LiteralField::Shorthand(name) if name == slot))
}
