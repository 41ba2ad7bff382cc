//! got: the Node HTTP client, `searchParams`/`json` options and a typed
//! `Response<T>`.

use reqgen_core::preset::{
    BodyStrategy, CallShape, ConfigParam, HttpImport, MethodFormat, Preset, QueryStrategy,
    SlotNames,
};

pub(crate) fn preset() -> Preset {
    Preset {
        name: "got",
        http_import: Some(HttpImport {
            default_name: Some("got"),
            named: &[],
            type_named: &["Response", "Options"],
            from: "got",
        }),
        callee: "got",
        call_shape: CallShape::UrlAndOptions,
        method_format: MethodFormat::Upper,
        slots: SlotNames::default(),
        query: QueryStrategy::SearchParams {
            key: "searchParams",
        },
        body: BodyStrategy::Rename { key: "json" },
        content_type_header: false,
        response_wrapper: "Promise<Response<T>>",
        config_param: Some(ConfigParam {
            name: "options",
            type_expr: "Options",
        }),
        hooks: false,
    }
}
