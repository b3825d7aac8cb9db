use anyhow::Result;

use super::{value_or_none, Report};
use crate::models::Project;

const COLUMNS: &str = "project,description,version,developers,url,year,licenses,license urls,dependency";

pub struct CsvReport<'a> {
    projects: &'a [Project],
}

impl<'a> CsvReport<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self { projects }
    }
}

impl Report for CsvReport<'_> {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn full_report(&self) -> Result<String> {
        let mut lines = vec![COLUMNS.to_string()];

        for p in self.projects {
            let developers: Vec<&str> = p.developers().iter().map(|d| d.name()).collect();
            let names: Vec<&str> = p.licenses().iter().map(|l| l.name()).collect();
            let urls: Vec<&str> = p.licenses().iter().map(|l| l.url()).collect();

            let row = [
                csv_field(p.name()),
                csv_field(p.description()),
                csv_field(p.version()),
                csv_list(&developers),
                csv_field(p.url()),
                csv_field(p.year()),
                csv_list(&names),
                csv_list(&urls),
                csv_field(p.gav()),
            ];
            lines.push(row.join(","));
        }

        Ok(lines.join("\n"))
    }

    fn empty_report(&self) -> String {
        String::new()
    }
}

/// Quote a value when it contains a separator, newline, quote or backslash.
/// Embedded double quotes are doubled.
fn csv_field(value: &str) -> String {
    let Some(value) = value_or_none(value) else {
        return String::new();
    };
    let escaped = value.replace('"', "\"\"");
    if escaped.contains([',', '\n', '\'', '\\', '"']) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

fn csv_list(values: &[&str]) -> String {
    if values.is_empty() {
        return String::new();
    }
    csv_field(&values.join(","))
}
