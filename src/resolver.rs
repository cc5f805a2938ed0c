//! Locates an installed dependency the way nested `node_modules` resolution
//! does: the closest installation wins, outer installations are fallbacks.

use std::path::{Path, PathBuf};

use crate::error::{AuditError, AuditResult};
use crate::manifest::MANIFEST_FILE;

pub const INSTALL_DIR: &str = "node_modules";

/// Find the installed package directory for `name`, starting at `from_dir`.
///
/// Checks `<from_dir>/node_modules/<name>`, then repeats from the part of the
/// search directory preceding its last `node_modules` component until the
/// package is found or the search directory stops changing.
pub fn resolve(name: &str, from_dir: &Path) -> AuditResult<PathBuf> {
    let mut searched = Vec::new();
    let mut cursor = from_dir.to_path_buf();

    loop {
        let candidate = cursor.join(INSTALL_DIR).join(name);
        let manifest = candidate.join(MANIFEST_FILE);
        tracing::trace!(path = %manifest.display(), "probing");
        searched.push(manifest.clone());
        if manifest.is_file() {
            return Ok(candidate);
        }

        match outer_search_dir(&cursor) {
            Some(outer) if outer != cursor => cursor = outer,
            _ => break,
        }
    }

    Err(AuditError::DependencyNotFound {
        name: name.to_string(),
        searched,
    })
}

/// The directory that owns the innermost `node_modules` segment of `dir`.
fn outer_search_dir(dir: &Path) -> Option<PathBuf> {
    let components: Vec<_> = dir.components().collect();
    let idx = components
        .iter()
        .rposition(|c| c.as_os_str() == INSTALL_DIR)?;
    Some(components[..idx].iter().collect())
}
