//! Logging setup for the command-line tool.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Log level selected by the number of `-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingLevel {
    /// warn for all components
    Default,
    /// info for all components
    Verbose,
    /// debug for this crate, info elsewhere
    Debug,
}

impl LoggingLevel {
    pub fn new(num_verbose: u8) -> Self {
        match num_verbose {
            0 => Self::Default,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Self::Default => "warn",
            Self::Verbose => "info",
            Self::Debug => "info,pkg_license_audit=debug",
        }
    }

    /// Install a stderr subscriber. `RUST_LOG`, when set, wins over `-v`.
    pub fn setup_logging(self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive()));

        let logger = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        // keep any subscriber that is already installed
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(logger)
            .try_init();
    }
}
