//! The default preset: `axios.request` with a single options object.
//!
//! axios carries URL, query (`params`), and body (`data`) inside the
//! options, so the slot names target its option keys directly and nothing
//! needs rewriting after grouping.

use reqgen_core::preset::{
    BodyStrategy, CallShape, ConfigParam, HttpImport, MethodFormat, Preset, QueryStrategy,
    SlotNames,
};

pub(crate) fn preset() -> Preset {
    Preset {
        name: "axios",
        http_import: Some(HttpImport {
            default_name: Some("axios"),
            named: &[],
            type_named: &["AxiosResponse", "AxiosRequestConfig"],
            from: "axios",
        }),
        callee: "axios.request",
        call_shape: CallShape::OptionsOnly,
        method_format: MethodFormat::Lower,
        slots: SlotNames {
            path: "paths",
            query: "params",
            body: "data",
            headers: "headers",
        },
        query: QueryStrategy::Options,
        body: BodyStrategy::Options,
        content_type_header: false,
        response_wrapper: "Promise<AxiosResponse<T>>",
        config_param: Some(ConfigParam {
            name: "config",
            type_expr: "AxiosRequestConfig",
        }),
        hooks: false,
    }
}
