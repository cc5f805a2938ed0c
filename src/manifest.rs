//! Reads a single `package.json` and normalizes it into a [`Package`] record
//! plus the declared (unresolved) dependency maps.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{AuditError, AuditResult};
use crate::models::Package;

pub const MANIFEST_FILE: &str = "package.json";

static LICENSE_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(license|licence|copying|ofl|patents)").expect("license file pattern")
});

// NAME <EMAIL> (URL), every part optional.
static AUTHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^<(]+?)?\s*(?:<([^>(]+?)>)?\s*(?:\(([^)]+?)\)|$)").expect("author pattern")
});

/// A parsed manifest: the package itself (without children) and the
/// dependency name → version range maps in declaration order.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub package: Package,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

/// Publisher fields extracted from an `author` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
}

/// Read `<dir>/package.json`.
///
/// License-file paths are reported absolute when `absolute_paths` is set, and
/// relative to `root_dir` otherwise.
pub fn read_manifest(dir: &Path, root_dir: &Path, absolute_paths: bool) -> AuditResult<Manifest> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(AuditError::ManifestNotFound {
            path: dir.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(&manifest_path).map_err(|source| AuditError::Io {
        path: manifest_path.clone(),
        source,
    })?;
    let json: Map<String, Value> =
        serde_json::from_str(&content).map_err(|source| AuditError::MalformedManifest {
            path: manifest_path.clone(),
            source,
        })?;

    let mut package = Package {
        name: str_field(&json, "name").unwrap_or_default(),
        version: str_field(&json, "version").unwrap_or_default(),
        private: json.get("private").and_then(Value::as_bool).unwrap_or(false),
        path: dir.to_path_buf(),
        ..Default::default()
    };

    // license / license files
    let mut license_files: Vec<String> = find_license_files(dir)
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let declared = ["license", "licence", "licenses", "licences"]
        .iter()
        .filter_map(|key| json.get(*key))
        .find(|v| is_truthy(v));
    if let Some(declared) = declared {
        read_license_value(declared, &mut package.licenses, &mut license_files);
    }
    if !license_files.is_empty() {
        package.license_file = Some(
            license_files
                .into_iter()
                .map(|f| display_path(&f, root_dir, absolute_paths))
                .collect(),
        );
    }

    // repository
    package.repository = match json.get("repository") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(repo)) => str_field(repo, "url"),
        _ => None,
    };

    // author
    let author = match json.get("author") {
        Some(Value::String(s)) => parse_author(s),
        Some(Value::Object(obj)) => Author {
            name: str_field(obj, "name").filter(|s| !s.is_empty()),
            email: str_field(obj, "email").filter(|s| !s.is_empty()),
            url: str_field(obj, "url").filter(|s| !s.is_empty()),
        },
        _ => Author::default(),
    };
    package.publisher = author.name;
    package.email = author.email;
    package.url = author.url;

    Ok(Manifest {
        package,
        dependencies: dependency_map(&json, "dependencies"),
        dev_dependencies: dependency_map(&json, "devDependencies"),
    })
}

/// Parse a free-text author of the form `NAME <EMAIL> (URL)`.
pub fn parse_author(raw: &str) -> Author {
    let Some(caps) = AUTHOR_RE.captures(raw.trim()) else {
        return Author::default();
    };
    let part = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };
    Author {
        name: part(1),
        email: part(2),
        url: part(3),
    }
}

/// List license-like files in `dir`. A matching directory contributes the
/// entries directly inside it.
pub fn find_license_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| LICENSE_FILE_RE.is_match(name))
        .collect();
    names.sort();

    let mut found = Vec::new();
    for name in names {
        let path = dir.join(&name);
        if path.is_dir() {
            if let Ok(inner) = std::fs::read_dir(&path) {
                let mut children: Vec<PathBuf> =
                    inner.filter_map(|e| e.ok()).map(|e| e.path()).collect();
                children.sort();
                found.extend(children);
            }
            continue;
        }
        found.push(path);
    }
    found
}

/// Flatten the string / list / `{type, url|path}` forms of a license
/// declaration.
fn read_license_value(value: &Value, licenses: &mut Vec<String>, license_files: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            if !s.is_empty() {
                licenses.push(s.clone());
            }
        }
        Value::Array(items) => {
            for item in items {
                read_license_value(item, licenses, license_files);
            }
        }
        Value::Object(obj) => {
            if let Some(kind) = str_field(obj, "type").filter(|s| !s.is_empty()) {
                licenses.push(kind);
            }
            if license_files.is_empty() {
                let reference = ["path", "url"]
                    .iter()
                    .filter_map(|key| obj.get(*key))
                    .find(|v| is_truthy(v));
                if let Some(reference) = reference {
                    license_files.push(value_to_string(reference));
                }
            }
        }
        _ => {}
    }
}

fn dependency_map(json: &Map<String, Value>, key: &str) -> IndexMap<String, String> {
    json.get(key)
        .and_then(Value::as_object)
        .map(|deps| {
            deps.iter()
                .map(|(name, range)| (name.clone(), range.as_str().unwrap_or_default().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn display_path(file: &str, root_dir: &Path, absolute: bool) -> String {
    if absolute {
        return file.to_string();
    }
    match Path::new(file).strip_prefix(root_dir) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => file.to_string(),
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, json: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), json).unwrap();
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let err = read_manifest(tmp.path(), tmp.path(), false).unwrap_err();
        assert!(matches!(err, AuditError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_malformed_manifest() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "{ \"name\": ");
        let err = read_manifest(tmp.path(), tmp.path(), false).unwrap_err();
        assert!(matches!(err, AuditError::MalformedManifest { .. }));
    }

    #[test]
    fn test_basic_fields_and_dependency_order() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            r#"{
  "name": "my-app",
  "version": "1.0.0",
  "license": "MIT",
  "private": true,
  "repository": { "type": "git", "url": "https://example.com/my-app.git" },
  "dependencies": { "zeta": "^1.0.0", "alpha": "~2.0.0", "mid": "3" },
  "devDependencies": { "jest": "^29.0.0" }
}"#,
        );
        let manifest = read_manifest(tmp.path(), tmp.path(), false).unwrap();
        let pkg = &manifest.package;
        assert_eq!(pkg.name, "my-app");
        assert_eq!(pkg.version, "1.0.0");
        assert_eq!(pkg.licenses, vec!["MIT"]);
        assert!(pkg.private);
        assert_eq!(pkg.repository.as_deref(), Some("https://example.com/my-app.git"));
        let names: Vec<&str> = manifest.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(manifest.dependencies["alpha"], "~2.0.0");
        assert_eq!(manifest.dev_dependencies.len(), 1);
    }

    #[test]
    fn test_license_object_list_forms() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            r#"{
  "name": "legacy",
  "licenses": [
    { "type": "MIT", "url": "https://example.com/mit" },
    { "type": "Apache-2.0", "url": "https://example.com/apache" },
    ""
  ]
}"#,
        );
        let pkg = read_manifest(tmp.path(), tmp.path(), false).unwrap().package;
        assert_eq!(pkg.licenses, vec!["MIT", "Apache-2.0"]);
        // only the first reference is kept when no file exists on disk
        assert_eq!(pkg.license_file, Some(vec!["https://example.com/mit".to_string()]));
    }

    #[test]
    fn test_license_file_on_disk_wins_over_reference() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("node_modules").join("pkg");
        write_manifest(
            &dir,
            r#"{ "name": "pkg", "license": { "type": "ISC", "path": "docs/terms.txt" } }"#,
        );
        std::fs::write(dir.join("LICENSE.md"), "ISC").unwrap();

        let rel = read_manifest(&dir, tmp.path(), false).unwrap().package;
        assert_eq!(rel.licenses, vec!["ISC"]);
        let expected = Path::new("node_modules").join("pkg").join("LICENSE.md");
        assert_eq!(rel.license_file, Some(vec![expected.to_string_lossy().into_owned()]));

        let abs = read_manifest(&dir, tmp.path(), true).unwrap().package;
        assert_eq!(
            abs.license_file,
            Some(vec![dir.join("LICENSE.md").to_string_lossy().into_owned()])
        );
    }

    #[test]
    fn test_find_license_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("LICENSE"), "").unwrap();
        std::fs::write(tmp.path().join("copying.txt"), "").unwrap();
        std::fs::write(tmp.path().join("README.md"), "").unwrap();
        std::fs::write(tmp.path().join("my-license"), "").unwrap();
        std::fs::create_dir(tmp.path().join("licenses")).unwrap();
        std::fs::write(tmp.path().join("licenses").join("OFL.txt"), "").unwrap();

        let found = find_license_files(tmp.path());
        assert_eq!(
            found,
            vec![
                tmp.path().join("LICENSE"),
                tmp.path().join("copying.txt"),
                tmp.path().join("licenses").join("OFL.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_author_full() {
        let author = parse_author("Barney Rubble <b@rubble.com> (http://barnyrubble.tumblr.com/)");
        assert_eq!(author.name.as_deref(), Some("Barney Rubble"));
        assert_eq!(author.email.as_deref(), Some("b@rubble.com"));
        assert_eq!(author.url.as_deref(), Some("http://barnyrubble.tumblr.com/"));
    }

    #[test]
    fn test_parse_author_partial() {
        assert_eq!(
            parse_author("Barney Rubble"),
            Author {
                name: Some("Barney Rubble".to_string()),
                ..Default::default()
            }
        );
        let email_only = parse_author("<b@rubble.com>");
        assert_eq!(email_only.name, None);
        assert_eq!(email_only.email.as_deref(), Some("b@rubble.com"));
        let url_only = parse_author("Barney (http://example.com)");
        assert_eq!(url_only.name.as_deref(), Some("Barney"));
        assert_eq!(url_only.email, None);
        assert_eq!(url_only.url.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_author_object() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            r#"{ "name": "a", "author": { "name": "Fred", "email": "fred@example.com" } }"#,
        );
        let pkg = read_manifest(tmp.path(), tmp.path(), false).unwrap().package;
        assert_eq!(pkg.publisher.as_deref(), Some("Fred"));
        assert_eq!(pkg.email.as_deref(), Some("fred@example.com"));
        assert_eq!(pkg.url, None);
    }
}
