//! ky: fetch semantics with `searchParams` and `json` options.

use reqgen_core::preset::{
    BodyStrategy, CallShape, ConfigParam, HttpImport, MethodFormat, Preset, QueryStrategy,
    SlotNames,
};

pub(crate) fn preset() -> Preset {
    Preset {
        name: "ky",
        http_import: Some(HttpImport {
            default_name: Some("ky"),
            named: &[],
            type_named: &["Options"],
            from: "ky",
        }),
        callee: "ky",
        call_shape: CallShape::UrlAndOptions,
        method_format: MethodFormat::Lower,
        slots: SlotNames::default(),
        query: QueryStrategy::SearchParams {
            key: "searchParams",
        },
        body: BodyStrategy::Rename { key: "json" },
        content_type_header: false,
        response_wrapper: "Promise<Response>",
        config_param: Some(ConfigParam {
            name: "options",
            type_expr: "Options",
        }),
        hooks: false,
    }
}
