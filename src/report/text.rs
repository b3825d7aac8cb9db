use anyhow::Result;

use super::Report;
use crate::models::Project;

const HEADER: &str = "Notice for packages";

pub struct TextReport<'a> {
    projects: &'a [Project],
}

impl<'a> TextReport<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self { projects }
    }
}

impl Report for TextReport<'_> {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn full_report(&self) -> Result<String> {
        let mut blocks = vec![HEADER.to_string(), "\n".to_string()];
        blocks.extend(self.projects.iter().filter_map(project_block));
        Ok(blocks.join("\n"))
    }

    fn empty_report(&self) -> String {
        String::new()
    }
}

/// `Name (version) - License, License` followed by description and url, one
/// per line. Projects without a name are left out.
fn project_block(project: &Project) -> Option<String> {
    if project.name().is_empty() {
        return None;
    }

    let license_names: Vec<&str> = project.licenses().iter().map(|l| l.name()).collect();
    let mut first = project.name().to_string();
    if !project.version().is_empty() {
        first.push_str(&format!(" ({})", project.version()));
    }
    if !license_names.is_empty() {
        first.push_str(&format!(" - {}", license_names.join(",")));
    }

    let mut block = first;
    for line in [project.description(), project.url()] {
        if !line.is_empty() {
            block.push('\n');
            block.push_str(line);
        }
    }
    block.push('\n');
    Some(block)
}
