use serde::Deserialize;

/// A single `(name, url)` license declaration as found in a manifest.
/// Either element may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LicenseDeclaration {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl LicenseDeclaration {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }
}

/// Raw per-dependency metadata handed over by a manifest reader.
///
/// Every field is optional; the builder maps absent values to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManifestRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub year: Option<String>,
    /// `group:artifact:version` coordinate.
    pub gav: Option<String>,
    pub licenses: Vec<LicenseDeclaration>,
    pub developers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct License {
    name: String,
    url: String,
}

impl License {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Logical license identity: two licenses are the same iff both carry the
    /// same non-empty URL. `name` is not compared, so "MIT License" and
    /// "The MIT License" collapse when they link to the same text. A license
    /// without a URL is never the same as any other license, itself included.
    pub fn same_license(&self, other: &License) -> bool {
        !self.url.is_empty() && !other.url.is_empty() && self.url == other.url
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Developer {
    name: String,
}

impl Developer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Report-ready dependency entry. Immutable once built; see [`ProjectBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    name: String,
    description: String,
    version: String,
    url: String,
    year: String,
    gav: String,
    licenses: Vec<License>,
    developers: Vec<Developer>,
}

impl Project {
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Copyright (inception) year.
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn gav(&self) -> &str {
        &self.gav
    }

    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }
}

/// One-shot builder for [`Project`]. Consumed by [`ProjectBuilder::build`].
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.project.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.project.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.project.version = version.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.project.url = url.into();
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.project.year = year.into();
        self
    }

    pub fn gav(mut self, gav: impl Into<String>) -> Self {
        self.project.gav = gav.into();
        self
    }

    pub fn licenses(mut self, licenses: Vec<License>) -> Self {
        self.project.licenses = licenses;
        self
    }

    pub fn developers(mut self, developers: Vec<Developer>) -> Self {
        self.project.developers = developers;
        self
    }

    pub fn build(self) -> Project {
        self.project
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_license_by_url() {
        let a = License::new("MIT License", "https://opensource.org/licenses/MIT");
        let b = License::new("The MIT License", "https://opensource.org/licenses/MIT");
        assert!(a.same_license(&b));
        assert!(b.same_license(&a));
    }

    #[test]
    fn test_different_urls_are_different_licenses() {
        let a = License::new("MIT License", "http://opensource.org/licenses/MIT");
        let b = License::new("MIT License", "https://opensource.org/licenses/MIT");
        assert!(!a.same_license(&b));
    }

    #[test]
    fn test_empty_url_never_same() {
        let a = License::new("MIT License", "");
        let b = License::new("MIT License", "");
        assert!(!a.same_license(&b));
        assert!(!a.same_license(&a));

        let c = License::new("MIT License", "https://opensource.org/licenses/MIT");
        assert!(!a.same_license(&c));
        assert!(!c.same_license(&a));
    }

    #[test]
    fn test_structural_equality_still_compares_names() {
        let a = License::new("MIT License", "https://opensource.org/licenses/MIT");
        let b = License::new("The MIT License", "https://opensource.org/licenses/MIT");
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_project_builder() {
        let project = Project::builder()
            .name("Guava")
            .version("31.1-jre")
            .gav("com.google.guava:guava:31.1-jre")
            .developers(vec![Developer::new("Kevin")])
            .build();
        assert_eq!(project.name(), "Guava");
        assert_eq!(project.version(), "31.1-jre");
        assert_eq!(project.gav(), "com.google.guava:guava:31.1-jre");
        assert_eq!(project.description(), "");
        assert!(project.licenses().is_empty());
        assert_eq!(project.developers()[0].name(), "Kevin");
    }

    #[test]
    fn test_deserialize_record_with_missing_fields() {
        let record: ManifestRecord = serde_json::from_str(
            r#"{"name": "okio", "licenses": [{"url": "https://www.apache.org/licenses/LICENSE-2.0.txt"}]}"#,
        )
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("okio"));
        assert!(record.version.is_none());
        assert!(record.developers.is_empty());
        assert_eq!(record.licenses.len(), 1);
        assert!(record.licenses[0].name.is_none());
    }
}
