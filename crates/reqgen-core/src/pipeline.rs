//! The generation pipeline.
//!
//! Five transitions carry one run from configuration to files on disk:
//! fetch, parse, compile, generate, destine. Each stage consumes the
//! previous stage's state by value, so a run's data is exclusively owned
//! end to end and concurrent runs share nothing. No stage retries; an
//! error surfaces immediately as that run's failure.

use std::path::{Path, PathBuf};

use crate::compile::{print_blocks, Compiler};
use crate::config::{import_specifier, Config, Input};
use crate::error::{AggregateError, FetchError, PipelineError, RunFailure, WriteError};
use crate::ir::{Graphs, Scope};
use crate::openapi;
use crate::parser::parse_document;
use crate::preset::Preset;

/// Supplies the raw document for a configured input.
pub trait Fetcher {
    fn fetch(&self, input: &Input) -> Result<serde_json::Value, FetchError>;
}

/// Reads local files and passes inline documents through. Remote inputs
/// are rejected; a remote-capable fetcher wraps this one where HTTP access
/// exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetcher for FileFetcher {
    fn fetch(&self, input: &Input) -> Result<serde_json::Value, FetchError> {
        match input {
            Input::Json { json } => Ok(json.clone()),
            Input::Uri { uri } => Err(FetchError::RemoteUnsupported(uri.clone())),
            Input::Path(path) => read_document(Path::new(path)),
        }
    }
}

/// Read and parse a spec file: `.json` strictly, anything else as YAML.
pub fn read_document(path: &Path) -> Result<serde_json::Value, FetchError> {
    let text = std::fs::read_to_string(path).map_err(|source| FetchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json = path.extension().and_then(|e| e.to_str()) == Some("json");
    parse_document_text(&text, json)
}

/// Parse raw document text into a JSON value. YAML is a superset of JSON,
/// so the lenient path handles both.
pub fn parse_document_text(text: &str, json: bool) -> Result<serde_json::Value, FetchError> {
    if json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml_ng::from_str(text)?)
    }
}

/// Receives generated files. The default writer hits the filesystem; tests
/// substitute collectors.
pub trait OutputWriter {
    fn write(&self, file: &OutputFile) -> Result<(), WriteError>;
}

/// Writes outputs to disk, creating parent directories and overwriting any
/// previous generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl OutputWriter for FsWriter {
    fn write(&self, file: &OutputFile) -> Result<(), WriteError> {
        if let Some(parent) = file.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        std::fs::write(&file.path, &file.code).map_err(|source| WriteError::Write {
            path: file.path.clone(),
            source,
        })
    }
}

/// Which logical output a generated file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Request functions.
    Request,
    /// Type declarations.
    Typings,
    /// Query hooks.
    Api,
}

/// One generated file: where it goes, how sibling outputs import it, and
/// its code.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub kind: OutputKind,
    pub path: PathBuf,
    /// The module specifier siblings use to import this file.
    pub import: String,
    pub code: String,
}

/// Entry state: a configuration paired with its resolved preset.
#[derive(Debug, Clone)]
pub struct Run {
    pub config: Config,
    pub preset: Preset,
}

impl Run {
    pub fn new(config: Config, preset: Preset) -> Self {
        Run { config, preset }
    }

    /// Label for failure reports: the main output path.
    pub fn label(&self) -> String {
        self.config.main_output()
    }
}

/// The raw document exactly as fetched, before any interpretation.
#[derive(Debug, Clone)]
pub struct Original {
    pub run: Run,
    pub document: serde_json::Value,
}

/// The node graphs parsed out of the document.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub run: Run,
    pub graphs: Graphs,
}

/// Rendered code per emitted scope.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub run: Run,
    pub codes: Vec<(Scope, String)>,
}

/// Output descriptors carrying destination paths and import specifiers.
#[derive(Debug, Clone)]
pub struct Generated {
    pub run: Run,
    pub files: Vec<OutputFile>,
}

/// Terminal state: every output written.
#[derive(Debug, Clone)]
pub struct Destined {
    pub files: Vec<OutputFile>,
}

/// Resolve the configured input into a raw document.
pub fn fetch(run: Run, fetcher: &impl Fetcher) -> Result<Original, PipelineError> {
    let document = fetcher.fetch(&run.config.input)?;
    Ok(Original { run, document })
}

/// Deserialize the document and parse it into per-scope node graphs.
pub fn parse(original: Original) -> Result<Parsed, PipelineError> {
    let Original { run, document } = original;
    let spec = openapi::from_value(document)?;
    if let Some(name) = spec.display_name() {
        log::info!("parsed {name}");
    }
    let graphs = parse_document(&spec, &run.preset, &run.config);
    Ok(Parsed { run, graphs })
}

/// Render each emitted scope's graph into code. The request scope always
/// emits; declarations emit unless disabled; hooks emit only when the
/// preset produced any.
pub fn compile(parsed: Parsed) -> Compiled {
    let Parsed { run, graphs } = parsed;
    let main_path = run.config.main_output();
    let syntax = run.config.resolved_syntax(&main_path);
    let compiler = Compiler::new();

    let mut codes = vec![(
        Scope::Main,
        print_blocks(&compiler.compile(&graphs.main, syntax)),
    )];
    if run.config.type_output(&main_path).is_some() {
        codes.push((
            Scope::Type,
            print_blocks(&compiler.compile(&graphs.types, syntax)),
        ));
    }
    if run.preset.hooks && !graphs.api.functions.is_empty() {
        codes.push((
            Scope::Api,
            print_blocks(&compiler.compile(&graphs.api, syntax)),
        ));
    }
    Compiled { run, codes }
}

/// Attach destination paths and import specifiers to the rendered code.
pub fn generate(compiled: Compiled) -> Generated {
    let Compiled { run, codes } = compiled;
    let main_path = run.config.main_output();
    let mut files = Vec::with_capacity(codes.len());
    for (scope, code) in codes {
        let (kind, path) = match scope {
            Scope::Main => (OutputKind::Request, main_path.clone()),
            Scope::Type => {
                let Some(path) = run.config.type_output(&main_path) else {
                    continue;
                };
                (OutputKind::Typings, path)
            }
            Scope::Api => (OutputKind::Api, run.config.api_output(&main_path)),
        };
        files.push(OutputFile {
            kind,
            import: import_specifier(&path),
            path: PathBuf::from(path),
            code,
        });
    }
    Generated { run, files }
}

/// Write every output through the writer.
pub fn destine(
    generated: Generated,
    writer: &impl OutputWriter,
) -> Result<Destined, PipelineError> {
    for file in &generated.files {
        writer.write(file)?;
        log::info!("wrote {}", file.path.display());
    }
    Ok(Destined {
        files: generated.files,
    })
}

/// Run the whole pipeline for one configuration.
pub fn run(
    run: Run,
    fetcher: &impl Fetcher,
    writer: &impl OutputWriter,
) -> Result<Destined, PipelineError> {
    let original = fetch(run, fetcher)?;
    let parsed = parse(original)?;
    let compiled = compile(parsed);
    let generated = generate(compiled);
    destine(generated, writer)
}

/// Run every configuration concurrently, one scoped thread per run.
///
/// Every run is attempted regardless of the others; failed runs aggregate
/// into one error while successful runs keep their written output.
pub fn run_all<F, W>(
    runs: Vec<Run>,
    fetcher: &F,
    writer: &W,
) -> Result<Vec<Destined>, AggregateError>
where
    F: Fetcher + Sync,
    W: OutputWriter + Sync,
{
    let total = runs.len();
    let results: Vec<(String, Result<Destined, PipelineError>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = runs
            .into_iter()
            .map(|one| {
                let label = one.label();
                (label, scope.spawn(move || run(one, fetcher, writer)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(label, handle)| {
                let result = match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                };
                (label, result)
            })
            .collect()
    });

    let mut completed = Vec::new();
    let mut failures = Vec::new();
    for (index, (label, result)) in results.into_iter().enumerate() {
        match result {
            Ok(destined) => completed.push(destined),
            Err(error) => failures.push(RunFailure {
                index,
                server_name: Some(label),
                error,
            }),
        }
    }
    if failures.is_empty() {
        Ok(completed)
    } else {
        Err(AggregateError { total, failures })
    }
}
