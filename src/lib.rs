//! `pkg-license-audit` — collect a project's installed dependency tree and
//! audit the licenses it declares.
//!
//! # Flow
//! 1. Read the project manifest and resolve every declared dependency in the
//!    nested `node_modules` installation ([`collector::collect`]).
//! 2. Classify each package's licenses against the compliance rules
//!    ([`license::classifier::classify`]).
//! 3. Render the tree as a list, JSON or CSV ([`report::render`]).

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod license;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod report;
pub mod resolver;

pub use collector::{collect, CollectOptions, Collection};
pub use error::{AuditError, AuditResult};
pub use license::classifier::classify;
pub use models::{Diagnostic, DiagnosticKind, Package, Severity};
pub use report::{render, FormatOptions, OutputFormat};
