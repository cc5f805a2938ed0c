//! Renderers for a collected [`Package`] tree and its diagnostics.
//!
//! - [`list`] — indented `+ name` / `- name` listing with per-package metadata.
//! - [`json`] — the tree (or only its dependency lists) as pretty JSON.
//! - [`csv`] — one row per package.
//! - [`terminal`] — colored diagnostics and a summary table.

pub mod csv;
pub mod json;
pub mod list;
pub mod terminal;

use anyhow::Result;
use serde::Deserialize;

use crate::models::Package;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    List,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Render the root package itself, not only its dependencies.
    pub include_root: bool,
    /// List every package, not only those needing attribution.
    pub all: bool,
}

/// Render `root` in the requested format.
pub fn render(root: &Package, format: OutputFormat, options: &FormatOptions) -> Result<String> {
    match format {
        OutputFormat::List => Ok(list::render(root, options)),
        OutputFormat::Json => json::render(root, options),
        OutputFormat::Csv => self::csv::render(root, options),
    }
}
