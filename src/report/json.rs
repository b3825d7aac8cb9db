use anyhow::Result;
use serde::Serialize;

use super::{value_or_none, Report};
use crate::models::Project;

const EMPTY_JSON: &str = "[]";

#[derive(Serialize)]
struct JsonProject<'a> {
    project: Option<&'a str>,
    description: Option<&'a str>,
    version: Option<&'a str>,
    developers: Vec<&'a str>,
    url: Option<&'a str>,
    year: Option<&'a str>,
    licenses: Vec<JsonLicense<'a>>,
    dependency: &'a str,
}

#[derive(Serialize)]
struct JsonLicense<'a> {
    license: &'a str,
    license_url: &'a str,
}

pub struct JsonReport<'a> {
    projects: &'a [Project],
}

impl<'a> JsonReport<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self { projects }
    }
}

impl Report for JsonReport<'_> {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn full_report(&self) -> Result<String> {
        let rows: Vec<JsonProject> = self
            .projects
            .iter()
            .map(|p| JsonProject {
                project: value_or_none(p.name()),
                description: value_or_none(p.description()),
                version: value_or_none(p.version()),
                developers: p.developers().iter().map(|d| d.name()).collect(),
                url: value_or_none(p.url()),
                year: value_or_none(p.year()),
                licenses: p
                    .licenses()
                    .iter()
                    .map(|l| JsonLicense {
                        license: l.name(),
                        license_url: l.url(),
                    })
                    .collect(),
                dependency: p.gav(),
            })
            .collect();

        Ok(serde_json::to_string(&rows)?)
    }

    fn empty_report(&self) -> String {
        EMPTY_JSON.to_string()
    }
}
