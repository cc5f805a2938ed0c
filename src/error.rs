use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading manifests and resolving dependencies.
///
/// Only a failure on the root manifest aborts a run; the collector turns every
/// other variant into a [`Diagnostic`](crate::models::Diagnostic).
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("no package.json found in {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("malformed manifest {}: {source}", .path.display())]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dependency `{name}` not found (searched {} locations)", .searched.len())]
    DependencyNotFound { name: String, searched: Vec<PathBuf> },
}

pub type AuditResult<T> = Result<T, AuditError>;
