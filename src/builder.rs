use crate::models::{Developer, License, ManifestRecord, Project};

/// Turn one manifest record into a [`Project`].
///
/// Scalar fields are copied as-is, missing ones become empty strings.
/// Licenses keep their raw name and URL whether or not the catalog knows
/// them; duplicates by URL are dropped (see [`dedup_licenses`]). Developers
/// are copied in order.
pub fn build(record: &ManifestRecord) -> Project {
    let licenses = record
        .licenses
        .iter()
        .map(|decl| {
            License::new(
                decl.name.clone().unwrap_or_default(),
                decl.url.clone().unwrap_or_default(),
            )
        })
        .collect();

    let developers = record
        .developers
        .iter()
        .map(|name| Developer::new(name.as_str()))
        .collect();

    Project::builder()
        .name(field(&record.name))
        .description(field(&record.description))
        .version(field(&record.version))
        .url(field(&record.url))
        .year(field(&record.year))
        .gav(field(&record.gav))
        .licenses(dedup_licenses(licenses))
        .developers(developers)
        .build()
}

/// Build every record, drop projects whose gav contains an ignored pattern,
/// and order the rest by case-insensitive name.
pub fn build_all(records: &[ManifestRecord], ignored_patterns: &[String]) -> Vec<Project> {
    let mut projects: Vec<Project> = records
        .iter()
        .map(build)
        .filter(|project| {
            let ignored = ignored_patterns
                .iter()
                .any(|pattern| !pattern.is_empty() && project.gav().contains(pattern.as_str()));
            if ignored {
                log::debug!("ignoring {}", project.gav());
            }
            !ignored
        })
        .collect();

    projects.sort_by_key(|p| p.name().to_lowercase());
    projects
}

/// Keep the first license for each distinct non-empty URL, preserving order.
///
/// Uses [`License::same_license`], which ignores names: a later "Apache 2.0"
/// with the same URL as an earlier "Apache License 2.0" is dropped. Licenses
/// without a URL are always kept.
pub fn dedup_licenses(licenses: Vec<License>) -> Vec<License> {
    let mut kept: Vec<License> = Vec::with_capacity(licenses.len());
    for license in licenses {
        if !kept.iter().any(|k| k.same_license(&license)) {
            kept.push(license);
        }
    }
    kept
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
