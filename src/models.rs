use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One node of the collected dependency tree.
///
/// Children are owned by their parent: a package reached through two different
/// direct dependencies appears once under each of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_file: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub private: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Package>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<Package>,
    /// Directory the manifest was read from; used to resolve children.
    #[serde(skip)]
    pub path: PathBuf,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Package {
    /// `name@version`, as used in diagnostic messages.
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Number of packages below this one, dev dependencies included.
    pub fn descendant_count(&self) -> usize {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .map(|p| 1 + p.descendant_count())
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What a [`Diagnostic`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticKind {
    DependencyNotFound,
    MalformedManifest,
    DepthLimit,
    UnknownLicense,
    NeedsAcknowledgment,
    ComplexLicense,
    UnsupportedLicense,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::DependencyNotFound => write!(f, "Dependency not found"),
            DiagnosticKind::MalformedManifest => write!(f, "Malformed manifest"),
            DiagnosticKind::DepthLimit => write!(f, "Depth limit"),
            DiagnosticKind::UnknownLicense => write!(f, "Unknown license"),
            DiagnosticKind::NeedsAcknowledgment => write!(f, "Needs acknowledgment"),
            DiagnosticKind::ComplexLicense => write!(f, "Complex license"),
            DiagnosticKind::UnsupportedLicense => write!(f, "Unsupported license"),
        }
    }
}

/// A single collection or classification finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
