use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// One generation run's configuration, loaded from `.reqgen.yaml` or built
/// by a caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: Input,

    pub output: Option<Output>,

    /// Preset name resolved by the registry. Defaults to `axios`.
    pub pipeline: Option<String>,

    #[serde(rename = "baseURL")]
    pub base_url: Option<BaseUrl>,

    #[serde(rename = "responseType")]
    pub response_type: Option<ResponseType>,

    pub import: Option<ImportConfig>,

    /// Render every grouped parameter interface field as optional.
    #[serde(rename = "paramsPartial")]
    pub params_partial: bool,

    /// Output language. Defaults from the main output file extension.
    pub syntax: Option<Syntax>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: Input::Path("openapi.yaml".to_string()),
            output: None,
            pipeline: None,
            base_url: None,
            response_type: None,
            import: None,
            params_partial: false,
            syntax: None,
        }
    }
}

/// Where the raw spec document comes from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Input {
    /// `{ uri: ... }` — fetched over HTTP by a remote-capable fetcher.
    Uri { uri: String },
    /// `{ json: ... }` — an inline, already-parsed document.
    Json { json: serde_json::Value },
    /// A filesystem path.
    Path(String),
}

/// Where generated code lands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Output {
    Split {
        main: Option<String>,
        #[serde(rename = "type")]
        types: Option<TypeOutput>,
    },
    Path(String),
}

/// The type-declarations output: a path, or `false` to fold declarations
/// into the main file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeOutput {
    Path(String),
    Enabled(bool),
}

/// `baseURL`: an explicit value, or `false` to suppress the constant and
/// keep URLs relative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BaseUrl {
    Value(String),
    Enabled(bool),
}

/// Response-type override: a fixed type for every operation, or a generic
/// wrapper with a `T` placeholder for the narrowed type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseType {
    Fixed(String),
    Generic {
        generic: Option<String>,
        /// `false` substitutes `any` instead of the narrowed schema type.
        infer: Option<bool>,
    },
}

/// Module-specifier overrides for the generated imports.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportConfig {
    /// Replaces the HTTP client's module (e.g. a configured axios instance).
    pub http: Option<String>,
    /// Replaces the specifier the main file imports its types from.
    #[serde(rename = "type")]
    pub types: Option<String>,
}

/// Output language mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    Typescript,
    Javascript,
}

impl Config {
    pub const DEFAULT_MAIN_OUTPUT: &'static str = "api.ts";
    pub const DEFAULT_PRESET: &'static str = "axios";

    pub fn preset_name(&self) -> &str {
        self.pipeline.as_deref().unwrap_or(Self::DEFAULT_PRESET)
    }

    /// The main (request functions) output path.
    pub fn main_output(&self) -> String {
        match &self.output {
            Some(Output::Path(path)) => path.clone(),
            Some(Output::Split { main, .. }) => main
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_MAIN_OUTPUT.to_string()),
            None => Self::DEFAULT_MAIN_OUTPUT.to_string(),
        }
    }

    /// The type-declarations output path, `None` when disabled.
    pub fn type_output(&self, main: &str) -> Option<String> {
        match &self.output {
            Some(Output::Split {
                types: Some(TypeOutput::Enabled(false)),
                ..
            }) => None,
            Some(Output::Split {
                types: Some(TypeOutput::Path(path)),
                ..
            }) => Some(path.clone()),
            _ => Some(sibling_path(main, "type")),
        }
    }

    /// The hooks output path for hook-emitting presets.
    pub fn api_output(&self, main: &str) -> String {
        sibling_path(main, "api")
    }

    /// Explicit syntax wins; otherwise the main output extension decides.
    pub fn resolved_syntax(&self, main: &str) -> Syntax {
        if let Some(syntax) = self.syntax {
            return syntax;
        }
        match Path::new(main).extension().and_then(|e| e.to_str()) {
            Some("js") | Some("mjs") | Some("cjs") | Some("jsx") => Syntax::Javascript,
            _ => Syntax::Typescript,
        }
    }
}

/// `src/api.ts` + `type` -> `src/api.type.ts`.
fn sibling_path(main: &str, infix: &str) -> String {
    match main.rfind('.') {
        Some(idx) if !main[idx..].contains('/') => {
            format!("{}.{infix}{}", &main[..idx], &main[idx..])
        }
        _ => format!("{main}.{infix}"),
    }
}

/// The module specifier another generated file uses to import `path`,
/// relative to a sibling in the same directory.
pub fn import_specifier(path: &str) -> String {
    let file = Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(idx) => &file[..idx],
        None => file,
    };
    format!("./{stem}")
}

/// A config file holds one config or an array of per-server configs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfigFile {
    Many(Vec<Config>),
    One(Box<Config>),
}

impl ConfigFile {
    pub fn into_vec(self) -> Vec<Config> {
        match self {
            ConfigFile::Many(configs) => configs,
            ConfigFile::One(config) => vec![*config],
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".reqgen.yaml";

/// Load one or more configs from a YAML (or JSON) file.
pub fn load_config_file(path: &Path) -> Result<Vec<Config>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_yaml_ng::from_str(&content)?;
    Ok(file.into_vec())
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# reqgen configuration
input: openapi.yaml          # path | { uri: https://... } | { json: {...} }
output:
  main: src/api.ts
  # type: src/api.type.ts    # false folds declarations into the main file
pipeline: axios              # axios | fetch | ky | got | ofetch | swr

# baseURL: https://api.example.com   # false suppresses the exported constant
# responseType:
#   generic: AxiosResponse<T>
#   infer: true
# import:
#   http: ./axios-instance   # custom module for the HTTP client import
#   type: ./api.type         # custom module for the type import
# paramsPartial: false       # render grouped parameter fields as optional
# syntax: typescript         # typescript | javascript (defaults from extension)

# An array of these documents generates several clients concurrently:
# - input: petstore.yaml
#   output: src/petstore.ts
# - input: { uri: https://example.com/openapi.json }
#   output: src/example.ts
"#
}
