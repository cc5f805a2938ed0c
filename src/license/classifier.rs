use crate::license::rules::{evaluate, Verdict};
use crate::models::{Diagnostic, DiagnosticKind, Package};

/// Classify every dependency and dev-dependency below `root`.
///
/// The root is the project being audited and is never classified itself.
/// Each non-compliant license string yields one error diagnostic; a package
/// without any license yields exactly one.
pub fn classify(root: &Package) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    classify_children(root, &mut diagnostics);
    diagnostics
}

fn classify_children(parent: &Package, diagnostics: &mut Vec<Diagnostic>) {
    for child in &parent.dependencies {
        classify_package(parent, child, false, diagnostics);
    }
    for child in &parent.dev_dependencies {
        classify_package(parent, child, true, diagnostics);
    }
}

fn classify_package(parent: &Package, pkg: &Package, is_dev: bool, diagnostics: &mut Vec<Diagnostic>) {
    let target = format!(
        "\n  {}: {}\n  {} {}: {}",
        parent.id(),
        parent.licenses.join(","),
        if is_dev { "-" } else { "+" },
        pkg.id(),
        pkg.licenses.join(",")
    );

    if pkg.licenses.is_empty() {
        diagnostics.extend(diagnostic(Verdict::Unknown, &target));
    }
    for license in &pkg.licenses {
        diagnostics.extend(diagnostic(evaluate(license), &target));
    }

    classify_children(pkg, diagnostics);
}

/// Error diagnostic for a non-compliant verdict; `None` for compliant ones.
fn diagnostic(verdict: Verdict, target: &str) -> Option<Diagnostic> {
    let (kind, headline) = match verdict {
        Verdict::Compliant => return None,
        Verdict::NeedsAcknowledgment => (
            DiagnosticKind::NeedsAcknowledgment,
            "use license that needs acknowledgments",
        ),
        Verdict::Complex => (DiagnosticKind::ComplexLicense, "use complex license"),
        Verdict::Unsupported => (DiagnosticKind::UnsupportedLicense, "use not supported license"),
        Verdict::Unknown => (
            DiagnosticKind::UnknownLicense,
            "use unknown or not extracted license",
        ),
    };
    Some(Diagnostic::error(kind, format!("\n# {}{}", headline, target)))
}
