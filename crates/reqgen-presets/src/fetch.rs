//! Zero-dependency preset targeting the global `fetch`.
//!
//! fetch has no query or JSON options, so the query group rides the URL as
//! a search-string suffix, bodies are stringified, and an explicit
//! `Content-Type` header is attached whenever a body is sent.

use reqgen_core::preset::{
    BodyStrategy, CallShape, ConfigParam, MethodFormat, Preset, QueryStrategy, SlotNames,
};

pub(crate) fn preset() -> Preset {
    Preset {
        name: "fetch",
        http_import: None,
        callee: "fetch",
        call_shape: CallShape::UrlAndOptions,
        method_format: MethodFormat::Upper,
        slots: SlotNames::default(),
        query: QueryStrategy::UrlSuffix,
        body: BodyStrategy::Stringify,
        content_type_header: true,
        response_wrapper: "Promise<Response>",
        config_param: Some(ConfigParam {
            name: "init",
            type_expr: "RequestInit",
        }),
        hooks: false,
    }
}
