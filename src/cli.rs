use std::path::PathBuf;

use clap::Parser;

use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "pkg-license-audit",
    about = "Collect installed dependencies and audit their licenses",
    version
)]
pub struct Cli {
    /// Project directory containing package.json
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Also traverse the project's devDependencies
    #[arg(long)]
    pub dev: bool,

    /// Keep packages marked `"private": true`
    #[arg(long)]
    pub include_private: bool,

    /// Package names to omit anywhere in the tree (comma-separated, repeatable)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Deepest dependency level to expand; direct dependencies are level 1
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Output format [default: list]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Include the project itself in the output
    #[arg(long)]
    pub include_root: bool,

    /// List every package, not only those that need attribution
    #[arg(long)]
    pub all: bool,

    /// Report license files with absolute paths
    #[arg(long)]
    pub absolute_license_paths: bool,

    /// Write output to FILE (relative to the project directory) instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the output file even when there is nothing to list
    #[arg(long)]
    pub output_force: bool,

    /// Do not echo diagnostics or output to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with code 1 when any error diagnostic was produced
    #[arg(long)]
    pub return_error: bool,

    /// Config file [default: ./.pkg-license-audit/config.toml, fallback ~/.config/pkg-license-audit/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
