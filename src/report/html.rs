use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::Result;

use super::Report;
use crate::license::catalog::LicenseCatalog;
use crate::license::text::LicenseTexts;
use crate::models::{License, Project};

const DOCTYPE: &str = "<!DOCTYPE html>";
const META: &str = r#"<meta http-equiv="content-type" content="text/html; charset=utf-8">"#;
const CSS_STYLE: &str = "body { font-family: sans-serif; background-color: #ffffff; color: #000000; } \
a { color: #0000EE; } \
pre { background-color: #eeeeee; padding: 1em; white-space: pre-wrap; word-break: break-word; display: inline-block; } \
@media (prefers-color-scheme: dark) { \
body { background-color: #121212; color: #E0E0E0; } \
a { color: #BB86FC; } \
pre { background-color: #333333; color: #E0E0E0; } }";
const OPEN_SOURCE_LIBRARIES: &str = "Open source licenses";
const NO_LIBRARIES: &str = "None";
const NO_LICENSE: &str = "No license found";
const NOTICE_LIBRARIES: &str = "Notice for packages:";
const DEFAULT_AUTHOR: &str = "The original author or authors";
const DEFAULT_YEAR: &str = "20xx";

/// Notice page listing every project, grouped by the set of licenses it
/// declares, with the matching license text printed once per group.
pub struct HtmlReport<'a> {
    projects: &'a [Project],
    catalog: &'a LicenseCatalog,
    texts: &'a LicenseTexts,
    show_versions: bool,
}

impl<'a> HtmlReport<'a> {
    pub fn new(
        projects: &'a [Project],
        catalog: &'a LicenseCatalog,
        texts: &'a LicenseTexts,
        show_versions: bool,
    ) -> Self {
        Self {
            projects,
            catalog,
            texts,
            show_versions,
        }
    }

    /// Projects keyed by their sorted license keys; groups and their members
    /// ordered case-insensitively. Projects without licenses share the empty key.
    fn grouped(&self) -> Vec<(String, Vec<&'a Project>)> {
        let mut groups: HashMap<String, Vec<&'a Project>> = HashMap::new();
        for project in self.projects {
            let mut keys: Vec<String> = project
                .licenses()
                .iter()
                .map(|l| self.catalog.license_key(l))
                .collect();
            keys.sort_by_key(|k| k.to_lowercase());
            let key = if keys.is_empty() {
                String::new()
            } else {
                format!("[{}]", keys.join(", "))
            };
            groups.entry(key).or_default().push(project);
        }

        let mut sorted: Vec<(String, Vec<&Project>)> = groups.into_iter().collect();
        for (_, members) in &mut sorted {
            members.sort_by_key(|p| p.name().to_lowercase());
        }
        sorted.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()).then(a.0.cmp(&b.0)));
        sorted
    }

    fn write_head(&self, out: &mut String) {
        out.push_str(DOCTYPE);
        out.push('\n');
        let _ = write!(
            out,
            "<html lang=\"en\"><head>{}<style>{}</style><title>{}</title></head>",
            META, CSS_STYLE, OPEN_SOURCE_LIBRARIES
        );
    }

    fn write_project(&self, out: &mut String, project: &Project, anchor: &str) {
        let mut label = escape_html(project.name());
        if self.show_versions {
            let _ = write!(label, " ({})", escape_html(project.version()));
        }
        let _ = write!(out, "<li><a href=\"#{}\">{}</a><dl>", anchor, label);

        let year = if project.year().is_empty() {
            DEFAULT_YEAR
        } else {
            project.year()
        };
        if project.developers().is_empty() {
            write_copyright(out, year, DEFAULT_AUTHOR);
        } else {
            for developer in project.developers() {
                write_copyright(out, year, developer.name());
            }
        }
        out.push_str("</dl></li>");
    }

    fn write_licenses(&self, out: &mut String, licenses: &[License]) {
        if licenses.is_empty() {
            let _ = write!(out, "<pre>{}</pre>", NO_LICENSE);
            return;
        }

        let mut keyed: Vec<(String, &License)> = licenses
            .iter()
            .map(|l| (self.catalog.license_key(l), l))
            .collect();
        keyed.sort_by_key(|(key, _)| key.to_lowercase());

        for (key, license) in keyed {
            if !key.is_empty() && self.catalog.contains_id(&key) {
                let _ = write!(out, "<pre>{}</pre>", escape_html(&self.texts.text(&key)));
            } else {
                out.push_str(&unresolved_license(license));
            }
            out.push_str("<br>");
        }
    }
}

impl Report for HtmlReport<'_> {
    fn name(&self) -> &'static str {
        "HTML"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn full_report(&self) -> Result<String> {
        let mut out = String::new();
        self.write_head(&mut out);
        let _ = write!(out, "<body><h3>{}</h3>", NOTICE_LIBRARIES);

        for (index, (_, members)) in self.grouped().into_iter().enumerate() {
            let anchor = format!("license-{}", index);
            out.push_str("<ul>");
            for project in &members {
                self.write_project(&mut out, project, &anchor);
            }
            out.push_str("</ul>");
            let _ = write!(out, "<a id=\"{}\"></a>", anchor);

            // Every member of a group resolves to the same keys; the last one
            // supplies the license entries.
            let licenses = members.last().map(|p| p.licenses()).unwrap_or_default();
            self.write_licenses(&mut out, licenses);
            out.push_str("<hr>");
        }

        out.push_str("</body></html>");
        Ok(out)
    }

    fn empty_report(&self) -> String {
        let mut out = String::new();
        self.write_head(&mut out);
        let _ = write!(out, "<body><h3>{}</h3></body></html>", NO_LIBRARIES);
        out
    }
}

fn write_copyright(out: &mut String, year: &str, holder: &str) {
    let _ = write!(
        out,
        "<dt>Copyright &copy; {} {}</dt><dd></dd>",
        escape_html(year),
        escape_html(holder)
    );
}

/// Fallback for licenses outside the catalog: whatever name and URL the
/// manifest gave.
fn unresolved_license(license: &License) -> String {
    let name = escape_html(license.name().trim());
    let url = escape_html(license.url().trim());
    match (name.is_empty(), url.is_empty()) {
        (false, false) => format!("<pre>{}\n<a href=\"{}\">{}</a></pre>", name, url, url),
        (true, false) => format!("<pre><a href=\"{}\">{}</a></pre>", url, url),
        (false, true) => format!("<pre>{}\n</pre>", name),
        (true, true) => format!("<pre>{}</pre>", NO_LICENSE),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Developer;

    const APACHE_URL: &str = "http://www.apache.org/licenses/LICENSE-2.0.txt";

    fn render(projects: &[Project], show_versions: bool) -> String {
        let texts = LicenseTexts::default();
        HtmlReport::new(projects, LicenseCatalog::global(), &texts, show_versions)
            .report()
            .unwrap()
    }

    #[test]
    fn test_empty() {
        let out = render(&[], false);
        assert!(out.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(out.contains("<title>Open source licenses</title>"));
        assert!(out.contains("<h3>None</h3>"));
    }

    #[test]
    fn test_groups_same_license_once() {
        let projects = vec![
            Project::builder()
                .name("okio")
                .licenses(vec![License::new("Apache 2.0", APACHE_URL)])
                .build(),
            Project::builder()
                .name("Gson")
                .year("2008")
                .licenses(vec![License::new("The Apache Software License", "")])
                .developers(vec![Developer::new("Inderjeet Singh")])
                .build(),
        ];

        let out = render(&projects, false);
        assert_eq!(out.matches("<ul>").count(), 1);
        assert_eq!(
            out.matches("Missing standard license text for: apache-2.0.txt").count(),
            1
        );
        let gson = out.find(">Gson<").unwrap();
        let okio = out.find(">okio<").unwrap();
        assert!(gson < okio);
        assert!(out.contains("Copyright &copy; 2008 Inderjeet Singh"));
        assert!(out.contains("Copyright &copy; 20xx The original author or authors"));
    }

    #[test]
    fn test_unknown_and_missing_licenses() {
        let projects = vec![
            Project::builder()
                .name("bcprov")
                .licenses(vec![License::new(
                    "Bouncy Castle Licence",
                    "https://www.bouncycastle.org/licence.html",
                )])
                .build(),
            Project::builder().name("nolicense").build(),
        ];

        let out = render(&projects, false);
        assert!(out.contains(
            "<pre>Bouncy Castle Licence\n<a href=\"https://www.bouncycastle.org/licence.html\">https://www.bouncycastle.org/licence.html</a></pre>"
        ));
        assert!(out.contains("<pre>No license found</pre>"));
        // no-license group sorts first
        assert!(out.find(">nolicense<").unwrap() < out.find(">bcprov<").unwrap());
    }

    #[test]
    fn test_show_versions_and_escaping() {
        let projects = vec![Project::builder()
            .name("<script>")
            .version("1.0")
            .licenses(vec![License::new("MIT License", "")])
            .build()];

        let out = render(&projects, true);
        assert!(out.contains("&lt;script&gt; (1.0)"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_embeds_loaded_text() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("mit.txt"), "MIT License\n\nPermission is hereby granted").unwrap();
        let texts = LicenseTexts::load(dir.path(), LicenseCatalog::global()).unwrap();

        let projects = vec![Project::builder()
            .name("slf4j")
            .licenses(vec![License::new("MIT License", "https://opensource.org/licenses/MIT")])
            .build()];
        let out = HtmlReport::new(&projects, LicenseCatalog::global(), &texts, false)
            .report()
            .unwrap();
        assert!(out.contains("<pre>MIT License\n\nPermission is hereby granted</pre>"));
    }
}
