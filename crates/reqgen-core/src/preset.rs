/// Option-bag slot names, one per parameter location.
///
/// The slot name doubles as the generated function's parameter name and as
/// the key the parser first writes into the call options, so presets that
/// pass straight through (axios `params`/`data`) override these and skip
/// any later rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotNames {
    pub path: &'static str,
    pub query: &'static str,
    pub body: &'static str,
    pub headers: &'static str,
}

impl Default for SlotNames {
    fn default() -> Self {
        SlotNames {
            path: "paths",
            query: "query",
            body: "body",
            headers: "headers",
        }
    }
}

/// How the client function is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `callee({ method, url, ... })` — the URL rides inside the options.
    OptionsOnly,
    /// `callee(url, { method, ... })`.
    UrlAndOptions,
}

/// Casing of the method value in the option bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFormat {
    Lower,
    Upper,
}

impl MethodFormat {
    pub fn render(self, method: &str) -> String {
        match self {
            MethodFormat::Lower => method.to_lowercase(),
            MethodFormat::Upper => method.to_uppercase(),
        }
    }
}

/// What to do with the grouped query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    /// The client accepts the object under the slot name as-is.
    Options,
    /// Re-key under `key`, wrapped in `new URLSearchParams(...)`.
    SearchParams { key: &'static str },
    /// The client has no query option; append a search-string expression
    /// to the URL instead.
    UrlSuffix,
}

/// What to do with the grouped body parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStrategy {
    /// The client serializes objects itself; pass under the slot name.
    Options,
    /// Re-key under `key` (ky/got style `json` option).
    Rename { key: &'static str },
    /// The client sends bytes; wrap in `JSON.stringify(...)`.
    Stringify,
}

/// The import statement pulling in the HTTP helper, absent for global
/// `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpImport {
    pub default_name: Option<&'static str>,
    pub named: &'static [&'static str],
    /// Named imports that are types (`import axios, { type AxiosResponse }`).
    pub type_named: &'static [&'static str],
    pub from: &'static str,
}

/// The trailing per-call options parameter spread into the option bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigParam {
    pub name: &'static str,
    pub type_expr: &'static str,
}

/// A named bundle of emission choices targeting one HTTP client style.
///
/// Presets are plain data: the pipeline stages read them, nothing mutates
/// them, and the registry hands out the same definitions for every run.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub http_import: Option<HttpImport>,
    /// The call target: `axios.request`, `fetch`, `ky`, ...
    pub callee: &'static str,
    pub call_shape: CallShape,
    pub method_format: MethodFormat,
    pub slots: SlotNames,
    pub query: QueryStrategy,
    pub body: BodyStrategy,
    /// Whether generated calls carry an explicit `Content-Type` header.
    pub content_type_header: bool,
    /// Response type wrapper; a standalone `T` marks where the narrowed
    /// response type is substituted.
    pub response_wrapper: &'static str,
    pub config_param: Option<ConfigParam>,
    /// Emit query hooks into the api scope (swr).
    pub hooks: bool,
}

/// A fetch-flavored preset for exercising the pipeline in unit tests.
#[cfg(test)]
pub(crate) fn test_preset() -> Preset {
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
