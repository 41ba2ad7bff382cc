use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is neither an OpenAPI v3 nor a Swagger v2 object")]
    NotAnOpenApiDocument,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read spec file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("fetched document is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("fetched document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to fetch spec from {uri}: {message}")]
    Http { uri: String, message: String },

    #[error("remote fetching is not available in this context (input uri: {0})")]
    RemoteUnsupported(String),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

/// A single failed run inside a multi-server invocation.
#[derive(Debug)]
pub struct RunFailure {
    /// Index of the config in the original array.
    pub index: usize,
    /// The server name, when the config carried one.
    pub server_name: Option<String>,
    pub error: PipelineError,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.server_name {
            Some(name) => write!(f, "run {} ({}): {}", self.index, name, self.error),
            None => write!(f, "run {}: {}", self.index, self.error),
        }
    }
}

/// All failures from a multi-server invocation. Successful runs have already
/// written their output by the time this is returned.
#[derive(Debug, Error)]
pub struct AggregateError {
    pub total: usize,
    pub failures: Vec<RunFailure>,
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} of {} generation runs failed:",
            self.failures.len(),
            self.total
        )?;
        for failure in &self.failures {
            writeln!(f, "  {failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_error_lists_each_failure() {
        let err = AggregateError {
            total: 3,
            failures: vec![
                RunFailure {
                    index: 1,
                    server_name: Some("petstore".to_string()),
                    error: PipelineError::Parse(ParseError::NotAnOpenApiDocument),
                },
                RunFailure {
                    index: 2,
                    server_name: None,
                    error: PipelineError::Config(ConfigError::UnknownPreset("grpc".to_string())),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 of 3 generation runs failed"));
        assert!(text.contains("run 1 (petstore)"));
        assert!(text.contains("run 2: config error"));
        assert!(text.contains("unknown preset: grpc"));
    }
}
