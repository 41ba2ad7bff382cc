use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use reqgen_core::config::{self, Config, Input, CONFIG_FILE_NAME};
use reqgen_core::error::FetchError;
use reqgen_core::openapi::{self, Swagger};
use reqgen_core::parser::parse_method_metadata;
use reqgen_core::pipeline::{self, Fetcher, FileFetcher, FsWriter};
use reqgen_core::traverse::traverse;
use reqgen_presets::generate_all_with;

#[derive(Parser)]
#[command(
    name = "reqgen",
    about = "Configuration-driven OpenAPI client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate clients for every configured run
    Generate {
        /// Path to the config file (defaults to .reqgen.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Spec file overriding the configured input(s)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pipeline overriding the configured pipeline(s)
        #[arg(short, long)]
        pipeline: Option<String>,
    },

    /// Inspect the normalized form of an OpenAPI document
    Inspect {
        /// Path to the spec file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new reqgen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            input,
            pipeline,
        } => cmd_generate(config, input, pipeline),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "reqgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Fetcher with HTTP support layered over the file fetcher.
#[derive(Default)]
struct HttpFetcher {
    files: FileFetcher,
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, input: &Input) -> std::result::Result<serde_json::Value, FetchError> {
        match input {
            Input::Uri { uri } => {
                let text = reqwest::blocking::get(uri.as_str())
                    .and_then(|response| response.error_for_status())
                    .and_then(|response| response.text())
                    .map_err(|e| FetchError::Http {
                        uri: uri.clone(),
                        message: e.to_string(),
                    })?;
                pipeline::parse_document_text(&text, uri.ends_with(".json"))
            }
            other => self.files.fetch(other),
        }
    }
}

/// Load the run configurations from an explicit file, the default project
/// config, or fall back to a single default run.
fn load_configs(path: Option<PathBuf>) -> Result<Vec<Config>> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            if !default.exists() {
                return Ok(vec![Config::default()]);
            }
            default
        }
    };
    config::load_config_file(&path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn load_spec(path: &Path) -> Result<Swagger> {
    let document = pipeline::read_document(path)?;
    let spec = openapi::from_value(document)?;
    Ok(spec)
}

fn cmd_generate(
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    pipeline: Option<String>,
) -> Result<()> {
    let mut configs = load_configs(config)?;
    if configs.is_empty() {
        eprintln!("No runs configured. Run `reqgen init` to create {CONFIG_FILE_NAME}.");
        return Ok(());
    }
    if let Some(input) = input {
        let path = input.to_string_lossy().into_owned();
        for config in &mut configs {
            config.input = Input::Path(path.clone());
        }
    }
    if let Some(pipeline) = pipeline {
        for config in &mut configs {
            config.pipeline = Some(pipeline.clone());
        }
    }
    log::debug!("loaded {} generation configs", configs.len());

    for config in &configs {
        eprintln!(
            "Generating {} → {}",
            config.preset_name(),
            config.main_output()
        );
    }

    let completed = generate_all_with(configs, &HttpFetcher::default(), &FsWriter)?;

    let mut written = 0;
    for destined in &completed {
        for file in &destined.files {
            eprintln!("  wrote {}", file.path.display());
            written += 1;
        }
    }
    eprintln!("Generated {written} files.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;
    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &Swagger) -> serde_json::Value {
    let mut operations = Vec::new();
    traverse(&spec.paths, |ctx| {
        let metadata = parse_method_metadata(&ctx);
        operations.push(serde_json::json!({
            "name": metadata.name,
            "method": metadata.method,
            "path": metadata.url_template,
            "response": metadata.response_type,
            "deprecated": metadata.deprecated,
        }));
    });

    let definitions: Vec<&String> = spec.definitions.keys().collect();

    serde_json::json!({
        "info": {
            "title": spec.info.as_ref().and_then(|i| i.title.clone()),
            "version": spec.info.as_ref().and_then(|i| i.version.clone()),
        },
        "operations": operations,
        "definitions": definitions,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
