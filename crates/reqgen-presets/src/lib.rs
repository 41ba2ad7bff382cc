//! The built-in client presets and the convenience entry points that pair
//! them with the core pipeline.
//!
//! A preset is plain data describing one HTTP client's calling convention;
//! the registry hands out the same definitions for every run. `generate`
//! and `generate_all` resolve each configuration's preset and drive the
//! pipeline with the default local fetcher and filesystem writer;
//! callers with their own transports use the `_with` variants.

use reqgen_core::config::Config;
use reqgen_core::error::{AggregateError, ConfigError, PipelineError, RunFailure};
use reqgen_core::pipeline::{
    self, Destined, Fetcher, FileFetcher, FsWriter, OutputWriter, Run,
};
use reqgen_core::preset::Preset;

mod axios;
mod fetch;
mod got;
mod ky;
mod ofetch;
mod swr;

#[cfg(test)]
pub(crate) mod support;

/// Every registered preset name, in registry order.
pub const PRESET_NAMES: [&str; 6] = ["axios", "fetch", "ky", "got", "ofetch", "swr"];

/// Look up a preset definition by its configured name.
pub fn resolve(name: &str) -> Result<Preset, ConfigError> {
    match name {
        "axios" => Ok(axios::preset()),
        "fetch" => Ok(fetch::preset()),
        "ky" => Ok(ky::preset()),
        "got" => Ok(got::preset()),
        "ofetch" => Ok(ofetch::preset()),
        "swr" => Ok(swr::preset()),
        other => Err(ConfigError::UnknownPreset(other.to_string())),
    }
}

/// Generate one configuration using local inputs and the filesystem.
pub fn generate(config: Config) -> Result<Destined, PipelineError> {
    generate_with(config, &FileFetcher, &FsWriter)
}

/// Generate one configuration with a caller-supplied fetcher and writer.
pub fn generate_with<F, W>(
    config: Config,
    fetcher: &F,
    writer: &W,
) -> Result<Destined, PipelineError>
where
    F: Fetcher,
    W: OutputWriter,
{
    let preset = resolve(config.preset_name())?;
    pipeline::run(Run::new(config, preset), fetcher, writer)
}

/// Generate every configuration concurrently using local inputs and the
/// filesystem.
pub fn generate_all(configs: Vec<Config>) -> Result<Vec<Destined>, AggregateError> {
    generate_all_with(configs, &FileFetcher, &FsWriter)
}

/// Generate every configuration concurrently with a caller-supplied fetcher
/// and writer.
///
/// A configuration whose preset does not resolve fails without blocking the
/// others; its failure joins the aggregate alongside any pipeline failures,
/// indexed by original position.
pub fn generate_all_with<F, W>(
    configs: Vec<Config>,
    fetcher: &F,
    writer: &W,
) -> Result<Vec<Destined>, AggregateError>
where
    F: Fetcher + Sync,
    W: OutputWriter + Sync,
{
    let total = configs.len();
    log::info!("running {total} generation configs");

    let mut failures: Vec<RunFailure> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();
    let mut runs: Vec<Run> = Vec::new();
    for (index, config) in configs.into_iter().enumerate() {
        let label = config.main_output();
        match resolve(config.preset_name()) {
            Ok(preset) => {
                indices.push(index);
                runs.push(Run::new(config, preset));
            }
            Err(error) => failures.push(RunFailure {
                index,
                server_name: Some(label),
                error: error.into(),
            }),
        }
    }

    let completed = match pipeline::run_all(runs, fetcher, writer) {
        Ok(completed) => completed,
        Err(aggregate) => {
            for mut failure in aggregate.failures {
                failure.index = indices[failure.index];
                failures.push(failure);
            }
            Vec::new()
        }
    };

    if failures.is_empty() {
        Ok(completed)
    } else {
        failures.sort_by_key(|f| f.index);
        Err(AggregateError { total, failures })
    }
}
