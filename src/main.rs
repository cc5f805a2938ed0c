//! Command-line entry point.
//!
//! Exits `1` when the project manifest cannot be read, or when `--return-error`
//! is set and at least one error diagnostic was produced.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pkg_license_audit::cli::Cli;
use pkg_license_audit::config::{load_config, Settings};
use pkg_license_audit::logging::LoggingLevel;
use pkg_license_audit::report::{self, terminal};
use pkg_license_audit::{classify, collect, Diagnostic};

fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingLevel::new(cli.verbose).setup_logging();

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config);
    tracing::debug!(?settings, "effective settings");

    let collection = match collect(&path, &settings.collect) {
        Ok(collection) => collection,
        Err(err) => {
            if !settings.quiet {
                eprintln!("\n{} {}", "err ::".red().bold(), err);
            }
            std::process::exit(1);
        }
    };
    let root = collection.root;

    let mut diagnostics = collection.diagnostics;
    diagnostics.extend(classify(&root));

    if !settings.quiet {
        terminal::print_diagnostics(&diagnostics);
        terminal::render_summary(&diagnostics, root.descendant_count());
    }

    let output = report::render(&root, settings.format, &settings.format_options)?;
    match &settings.output {
        Some(file) => {
            if output.is_empty() && !settings.output_force {
                tracing::info!(file = %file.display(), "nothing to write");
            } else {
                let dest = path.join(file);
                std::fs::write(&dest, &output)
                    .with_context(|| format!("failed to write {}", dest.display()))?;
            }
        }
        None => {
            if !settings.quiet {
                println!("\n{}", output);
            }
        }
    }

    if settings.return_error && diagnostics.iter().any(Diagnostic::is_error) {
        std::process::exit(1);
    }

    Ok(())
}
