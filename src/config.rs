use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::collector::CollectOptions;
use crate::report::{FormatOptions, OutputFormat};

pub const CONFIG_DIR: &str = ".pkg-license-audit";
pub const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure, deserialized from `.pkg-license-audit/config.toml`.
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub collect: CollectConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectConfig {
    pub dev: Option<bool>,
    pub include_private: Option<bool>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub max_depth: Option<usize>,
    pub absolute_license_paths: Option<bool>,
}

/// Rendering and exit-code defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub include_root: Option<bool>,
    pub all: Option<bool>,
    pub output_force: Option<bool>,
    pub return_error: Option<bool>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.pkg-license-audit/config.toml`
/// 3. `~/.config/pkg-license-audit/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(CONFIG_DIR).join(CONFIG_FILE);
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("pkg-license-audit")
            .join(CONFIG_FILE);
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Effective settings for one run, merged once from CLI flags and config.
#[derive(Debug, Clone)]
pub struct Settings {
    pub collect: CollectOptions,
    pub format: OutputFormat,
    pub format_options: FormatOptions,
    pub output: Option<PathBuf>,
    pub output_force: bool,
    pub quiet: bool,
    pub return_error: bool,
}

impl Settings {
    /// Boolean flags are enabled by either source; `exclude`, `max_depth` and
    /// `format` given on the command line replace the configured values.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let exclude_names: BTreeSet<String> = if cli.exclude.is_empty() {
            config.collect.exclude.iter().cloned().collect()
        } else {
            cli.exclude.iter().cloned().collect()
        };
        let exclude_names = exclude_names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let either = |flag: bool, configured: Option<bool>| flag || configured.unwrap_or(false);

        Settings {
            collect: CollectOptions {
                include_dev_dependencies: either(cli.dev, config.collect.dev),
                include_private: either(cli.include_private, config.collect.include_private),
                exclude_names,
                max_depth: cli.max_depth.or(config.collect.max_depth),
                absolute_license_file_paths: either(
                    cli.absolute_license_paths,
                    config.collect.absolute_license_paths,
                ),
            },
            format: cli.format.or(config.output.format).unwrap_or_default(),
            format_options: FormatOptions {
                include_root: either(cli.include_root, config.output.include_root),
                all: either(cli.all, config.output.all),
            },
            output: cli.output.clone(),
            output_force: either(cli.output_force, config.output.output_force),
            quiet: cli.quiet,
            return_error: either(cli.return_error, config.output.return_error),
        }
    }
}
