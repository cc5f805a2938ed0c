use anyhow::Result;
use serde::Serialize;

use crate::models::Package;
use crate::report::FormatOptions;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DependencyLists<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    dependencies: &'a [Package],
    #[serde(skip_serializing_if = "is_empty")]
    dev_dependencies: &'a [Package],
}

fn is_empty(list: &&[Package]) -> bool {
    list.is_empty()
}

/// Pretty JSON of the whole tree, or of the root's dependency lists only.
pub fn render(root: &Package, options: &FormatOptions) -> Result<String> {
    if options.include_root {
        return Ok(serde_json::to_string_pretty(root)?);
    }
    Ok(serde_json::to_string_pretty(&DependencyLists {
        dependencies: &root.dependencies,
        dev_dependencies: &root.dev_dependencies,
    })?)
}
