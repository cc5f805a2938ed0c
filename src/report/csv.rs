use anyhow::Result;
use ::csv::{Writer, WriterBuilder};

use crate::models::Package;
use crate::report::FormatOptions;

const HEADER: [&str; 10] = [
    "parent",
    "name",
    "version",
    "dev",
    "licenses",
    "licenseFile",
    "publisher",
    "email",
    "url",
    "repository",
];

/// One CSV row per package, parents before their children. The root row is
/// written only with `include_root`. Every package is listed regardless of
/// `options.all`.
pub fn render(root: &Package, options: &FormatOptions) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(HEADER)?;
    if options.include_root {
        write_row(&mut writer, None, root, false)?;
    }
    write_children(&mut writer, root)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn write_children(writer: &mut Writer<Vec<u8>>, parent: &Package) -> Result<()> {
    for child in &parent.dependencies {
        write_row(writer, Some(parent), child, false)?;
        write_children(writer, child)?;
    }
    for child in &parent.dev_dependencies {
        write_row(writer, Some(parent), child, true)?;
        write_children(writer, child)?;
    }
    Ok(())
}

fn write_row(
    writer: &mut Writer<Vec<u8>>,
    parent: Option<&Package>,
    pkg: &Package,
    dev: bool,
) -> Result<()> {
    let parent = parent.map(Package::id).unwrap_or_default();
    let license_file = pkg.license_file.as_deref().unwrap_or_default().join(",");
    writer.write_record([
        parent.as_str(),
        pkg.name.as_str(),
        pkg.version.as_str(),
        if dev { "true" } else { "false" },
        pkg.licenses.join(",").as_str(),
        license_file.as_str(),
        pkg.publisher.as_deref().unwrap_or_default(),
        pkg.email.as_deref().unwrap_or_default(),
        pkg.url.as_deref().unwrap_or_default(),
        pkg.repository.as_deref().unwrap_or_default(),
    ])?;
    Ok(())
}
