use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::license::catalog::LicenseCatalog;
use crate::models::Project;

/// How well a project's licenses are covered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every declared license maps to a known license text.
    Resolved,
    /// At least one declared license is not in the catalog.
    Unresolved,
    /// The manifest declares no license at all.
    Missing,
}

pub fn coverage(project: &Project, catalog: &LicenseCatalog) -> Coverage {
    if project.licenses().is_empty() {
        return Coverage::Missing;
    }
    let all_known = project
        .licenses()
        .iter()
        .all(|l| catalog.contains_id(&catalog.license_key(l)));
    if all_known {
        Coverage::Resolved
    } else {
        Coverage::Unresolved
    }
}

/// Render a colored summary of the generated report.
pub fn render(projects: &[Project], catalog: &LicenseCatalog, path: &Path, verbose: bool, quiet: bool) {
    let total = projects.len();
    let count = |c: Coverage| projects.iter().filter(|p| coverage(p, catalog) == c).count();
    let resolved = count(Coverage::Resolved);
    let unresolved = count(Coverage::Unresolved);
    let missing = count(Coverage::Missing);

    if quiet {
        println!(
            "Total: {}  Resolved: {}  Unresolved: {}  No license: {}",
            total,
            resolved.to_string().green(),
            unresolved.to_string().yellow(),
            missing.to_string().red(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "license-reportr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Manifests: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total dependencies : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Resolved        : {:>4}", "✓".green(), resolved)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unresolved      : {:>4}", "⚠".yellow(), unresolved)
    );
    println!(
        " │  {:<48} │",
        format!("{}  No license      : {:>4}", "✗".red(), missing)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    let shown: Vec<&Project> = projects
        .iter()
        .filter(|p| verbose || coverage(p, catalog) != Coverage::Resolved)
        .collect();
    if !shown.is_empty() {
        render_table(&shown, catalog);
        println!();
    }
}

fn render_table(projects: &[&Project], catalog: &LicenseCatalog) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Licenses").add_attribute(Attribute::Bold),
            Cell::new("License text").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for project in projects {
        let names: Vec<&str> = project.licenses().iter().map(|l| l.name()).collect();
        let texts: Vec<&str> = project
            .licenses()
            .iter()
            .map(|l| {
                catalog
                    .resolve(l.url())
                    .or_else(|| catalog.resolve(l.name()))
                    .unwrap_or("unresolved")
            })
            .collect();

        let (status, color) = match coverage(project, catalog) {
            Coverage::Resolved => ("✓ resolved", Color::Green),
            Coverage::Unresolved => ("⚠ unresolved", Color::Yellow),
            Coverage::Missing => ("✗ missing", Color::Red),
        };

        table.add_row(vec![
            Cell::new(project.name()),
            Cell::new(project.version()),
            Cell::new(names.join("\n")),
            Cell::new(texts.join("\n")),
            Cell::new(status).fg(color).set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// Print every catalog key with the license text it maps to.
pub fn render_catalog(catalog: &LicenseCatalog) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name or URL").add_attribute(Attribute::Bold),
            Cell::new("License text").add_attribute(Attribute::Bold),
        ]);
    for (key, id) in catalog.iter() {
        table.add_row(vec![Cell::new(key), Cell::new(id).fg(Color::Cyan)]);
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::License;

    #[test]
    fn test_coverage() {
        let catalog = LicenseCatalog::global();
        let resolved = Project::builder()
            .licenses(vec![License::new("MIT License", "")])
            .build();
        let unresolved = Project::builder()
            .licenses(vec![
                License::new("MIT License", ""),
                License::new("Custom", "https://example.com/LICENSE"),
            ])
            .build();
        let missing = Project::builder().build();

        assert_eq!(coverage(&resolved, catalog), Coverage::Resolved);
        assert_eq!(coverage(&unresolved, catalog), Coverage::Unresolved);
        assert_eq!(coverage(&missing, catalog), Coverage::Missing);
    }
}
