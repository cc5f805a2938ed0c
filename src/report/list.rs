use crate::license::rules::requires_attribution;
use crate::models::Package;
use crate::report::FormatOptions;

const INDENT: &str = "|   ";

/// Render the tree as an indented list.
///
/// Unless `options.all` is set, a package is listed only when its license
/// requires attribution or one of its descendants is listed.
pub fn render(root: &Package, options: &FormatOptions) -> String {
    write_package(root, 0, false, options)
}

fn write_package(pkg: &Package, nest: usize, dev: bool, options: &FormatOptions) -> String {
    let mut children = String::new();
    for child in &pkg.dependencies {
        children.push_str(&write_package(child, nest + 1, false, options));
    }
    for child in &pkg.dev_dependencies {
        children.push_str(&write_package(child, nest + 1, true, options));
    }

    if children.is_empty() && !requires_attribution(&pkg.licenses) && !options.all {
        return String::new();
    }

    let mut out = String::new();
    if nest > 0 || options.include_root {
        let skip = if options.include_root { 0 } else { 1 };
        let indent = INDENT.repeat(nest.saturating_sub(skip));
        let mut line = |text: String| {
            out.push_str(&indent);
            out.push_str(&text);
            out.push('\n');
        };

        line(format!("{} {}", if dev { "-" } else { "+" }, pkg.name));
        line(format!("{}version: {}", INDENT, pkg.version));
        line(format!("{}license: {}", INDENT, pkg.licenses.join(",")));
        if let Some(files) = pkg.license_file.as_ref().filter(|f| !f.is_empty()) {
            line(format!("{}licenseFile: {}", INDENT, files.join(",")));
        }
        if let Some(publisher) = &pkg.publisher {
            line(format!("{}publisher: {}", INDENT, publisher));
        }
        if let Some(email) = &pkg.email {
            line(format!("{}email: {}", INDENT, email));
        }
        if let Some(url) = &pkg.url {
            line(format!("{}url: {}", INDENT, url));
        }
        if let Some(repository) = &pkg.repository {
            line(format!("{}repository: {}", INDENT, repository));
        }
    }

    out.push_str(&children);
    out
}
