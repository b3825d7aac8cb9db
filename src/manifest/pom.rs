use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use quick_xml::events::Event;
use quick_xml::Reader;
use walkdir::WalkDir;

use crate::error::ManifestError;
use crate::models::{LicenseDeclaration, ManifestRecord};

const ANDROID_SUPPORT_GROUP_ID: &str = "com.android.support";
const APACHE_LICENSE_NAME: &str = "The Apache Software License";
const APACHE_LICENSE_URL: &str = "http://www.apache.org/licenses/LICENSE-2.0.txt";

/// Reader for Maven POM files.
///
/// Accepts a single POM or a directory, which is searched recursively for
/// `pom.xml` and `*.pom`. POMs found together can act as each other's
/// parents: a POM declaring no license inherits the licenses of its parent
/// when that parent is among the scanned files.
pub struct PomReader {
    show_progress: bool,
}

impl PomReader {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }
}

impl super::ManifestReader for PomReader {
    fn read(&self, path: &Path) -> Result<Vec<ManifestRecord>> {
        let files = if path.is_dir() {
            let mut files = collect_pom_files(path)
                .map_err(|e| ManifestError::Io(e.into(), path.to_path_buf()))?;
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let pb = if self.show_progress && files.len() > 1 {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut models = Vec::with_capacity(files.len());
        for file in &files {
            match parse_pom_file(file) {
                Ok(model) => models.push(model),
                // A broken POM never reaches the builder; the rest still do.
                Err(e) => log::warn!("skipping {}", e),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        Ok(to_records(&models))
    }
}

/// Symlinks are not followed, so a link back into the tree is never re-entered.
fn collect_pom_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && is_pom_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_pom_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == "pom.xml")
        || path.extension().is_some_and(|ext| ext == "pom")
}

#[derive(Debug, Default)]
struct ParentRef {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl ParentRef {
    fn coordinate(&self) -> Option<String> {
        if self.group_id.is_empty() || self.artifact_id.is_empty() || self.version.is_empty() {
            return None;
        }
        Some(format!("{}:{}:{}", self.group_id, self.artifact_id, self.version))
    }
}

/// Fields of a POM that feed the license report.
#[derive(Debug, Default)]
struct PomModel {
    name: String,
    description: String,
    version: String,
    url: String,
    inception_year: String,
    group_id: String,
    artifact_id: String,
    parent: ParentRef,
    licenses: Vec<LicenseDeclaration>,
    developers: Vec<String>,
}

impl PomModel {
    fn group_id(&self) -> &str {
        if self.group_id.is_empty() {
            &self.parent.group_id
        } else {
            &self.group_id
        }
    }

    fn version(&self) -> &str {
        if self.version.is_empty() {
            &self.parent.version
        } else {
            &self.version
        }
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.artifact_id
        } else {
            &self.name
        }
    }

    fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group_id(), self.artifact_id, self.version())
    }
}

fn parse_pom_file(path: &Path) -> Result<PomModel, ManifestError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::Io(e, path.to_path_buf()))?;
    log::debug!("parsing {}", path.display());
    parse_pom_str(&content).map_err(|e| ManifestError::Parse(e, path.to_path_buf()))
}

/// Parse a POM document with the quick-xml event API.
///
/// Only direct children of `<project>`, `<project><parent>`, `<licenses>` and
/// `<developers>` are read; `<dependencies>`, `<build>` and friends carry
/// their own `groupId`/`version` elements which must not leak into the
/// project's coordinate.
fn parse_pom_str(xml: &str) -> Result<PomModel, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut model = PomModel::default();
    let mut stack: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                stack.push(tag);
                open_element(&mut model, &stack);
            }
            Event::Empty(ref e) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                stack.push(tag);
                open_element(&mut model, &stack);
                stack.pop();
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                set_text(&mut model, &stack, &text);
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e).into_owned();
                set_text(&mut model, &stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    trim_model(&mut model);
    Ok(model)
}

fn open_element(model: &mut PomModel, stack: &[String]) {
    let path: Vec<&str> = stack.iter().map(String::as_str).collect();
    match path.as_slice() {
        ["project", "licenses", "license"] => model.licenses.push(LicenseDeclaration::default()),
        ["project", "developers", "developer"] => model.developers.push(String::new()),
        _ => {}
    }
}

fn set_text(model: &mut PomModel, stack: &[String], text: &str) {
    let path: Vec<&str> = stack.iter().map(String::as_str).collect();
    let target = match path.as_slice() {
        ["project", "name"] => &mut model.name,
        ["project", "description"] => &mut model.description,
        ["project", "version"] => &mut model.version,
        ["project", "url"] => &mut model.url,
        ["project", "inceptionYear"] => &mut model.inception_year,
        ["project", "groupId"] => &mut model.group_id,
        ["project", "artifactId"] => &mut model.artifact_id,
        ["project", "parent", "groupId"] => &mut model.parent.group_id,
        ["project", "parent", "artifactId"] => &mut model.parent.artifact_id,
        ["project", "parent", "version"] => &mut model.parent.version,
        ["project", "licenses", "license", field @ ("name" | "url")] => {
            let Some(license) = model.licenses.last_mut() else {
                return;
            };
            let slot = if *field == "name" {
                &mut license.name
            } else {
                &mut license.url
            };
            slot.get_or_insert_with(String::new).push_str(text);
            return;
        }
        ["project", "developers", "developer", "name"] => match model.developers.last_mut() {
            Some(dev) => dev,
            None => return,
        },
        _ => return,
    };
    target.push_str(text);
}

fn trim_model(model: &mut PomModel) {
    for field in [
        &mut model.name,
        &mut model.description,
        &mut model.version,
        &mut model.url,
        &mut model.inception_year,
        &mut model.group_id,
        &mut model.artifact_id,
        &mut model.parent.group_id,
        &mut model.parent.artifact_id,
        &mut model.parent.version,
    ] {
        *field = field.trim().to_string();
    }
    for license in &mut model.licenses {
        license.name = Some(license.name.as_deref().unwrap_or_default().trim().to_string());
        license.url = Some(license.url.as_deref().unwrap_or_default().trim().to_string());
    }
    for dev in &mut model.developers {
        *dev = dev.trim().to_string();
    }
}

fn to_records(models: &[PomModel]) -> Vec<ManifestRecord> {
    let mut by_coordinate: HashMap<String, &PomModel> = HashMap::new();
    for model in models {
        by_coordinate.entry(model.coordinate()).or_insert(model);
    }

    let mut seen: HashSet<String> = HashSet::new();
    models
        .iter()
        .filter(|model| {
            let coordinate = model.coordinate();
            if seen.insert(coordinate.clone()) {
                true
            } else {
                log::debug!("skipping duplicate POM for {}", coordinate);
                false
            }
        })
        .map(|model| {
            let licenses = find_licenses(model, &by_coordinate);
            if licenses.is_empty() {
                log::warn!("{} dependency does not have a license.", model.display_name());
            }
            ManifestRecord {
                name: Some(model.display_name().to_string()),
                description: Some(model.description.clone()),
                version: Some(model.version().to_string()),
                url: Some(model.url.clone()),
                year: Some(model.inception_year.clone()),
                gav: Some(model.coordinate()),
                licenses,
                developers: model.developers.clone(),
            }
        })
        .collect()
}

/// Licenses declared by the POM, else by the nearest scanned ancestor.
fn find_licenses(
    model: &PomModel,
    by_coordinate: &HashMap<String, &PomModel>,
) -> Vec<LicenseDeclaration> {
    if model.group_id() == ANDROID_SUPPORT_GROUP_ID {
        return vec![LicenseDeclaration::new(APACHE_LICENSE_NAME, APACHE_LICENSE_URL)];
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut current = model;
    loop {
        if !current.licenses.is_empty() {
            return current.licenses.clone();
        }
        let Some(parent) = current.parent.coordinate() else {
            return Vec::new();
        };
        if !visited.insert(parent.clone()) {
            return Vec::new();
        }
        match by_coordinate.get(&parent) {
            Some(next) => {
                log::debug!("{} inherits licenses from {}", model.coordinate(), parent);
                current = next;
            }
            None => return Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestReader;
    use tempfile::TempDir;

    const GUAVA_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.google.guava</groupId>
    <artifactId>guava-parent</artifactId>
    <version>31.1-jre</version>
  </parent>
  <artifactId>guava</artifactId>
  <name>Guava: Google Core Libraries for Java</name>
  <description>Guava is a suite of core and expanded libraries.</description>
  <url>https://github.com/google/guava</url>
  <inceptionYear>2010</inceptionYear>
  <developers>
    <developer>
      <id>kevinb9n</id>
      <name> Kevin Bourrillion </name>
    </developer>
    <developer>
      <id>anonymous</id>
    </developer>
  </developers>
  <dependencies>
    <dependency>
      <groupId>com.google.guava</groupId>
      <artifactId>failureaccess</artifactId>
      <version>1.0.1</version>
    </dependency>
  </dependencies>
</project>"#;

    const GUAVA_PARENT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <groupId>com.google.guava</groupId>
  <artifactId>guava-parent</artifactId>
  <version>31.1-jre</version>
  <licenses>
    <license>
      <name>Apache License, Version 2.0</name>
      <url>http://www.apache.org/licenses/LICENSE-2.0.txt</url>
    </license>
  </licenses>
</project>"#;

    #[test]
    fn test_parse_project_fields() {
        let model = parse_pom_str(GUAVA_POM).unwrap();
        assert_eq!(model.name, "Guava: Google Core Libraries for Java");
        assert_eq!(model.artifact_id, "guava");
        assert_eq!(model.group_id(), "com.google.guava");
        assert_eq!(model.version(), "31.1-jre");
        assert_eq!(model.inception_year, "2010");
        assert_eq!(model.url, "https://github.com/google/guava");
        assert_eq!(model.developers, vec!["Kevin Bourrillion".to_string(), String::new()]);
        assert!(model.licenses.is_empty());
        assert_eq!(model.coordinate(), "com.google.guava:guava:31.1-jre");
    }

    #[test]
    fn test_dependency_coordinates_do_not_leak() {
        let model = parse_pom_str(GUAVA_POM).unwrap();
        assert_eq!(model.group_id, "");
        assert_eq!(model.version, "");
    }

    #[test]
    fn test_parse_licenses() {
        let xml = r#"<project>
  <groupId>org.example</groupId>
  <artifactId>lib</artifactId>
  <version>1.0</version>
  <licenses>
    <license>
      <name>MIT License</name>
      <url>https://opensource.org/licenses/MIT</url>
    </license>
    <license>
      <name><![CDATA[Eclipse Public License 2.0]]></name>
    </license>
    <license/>
  </licenses>
</project>"#;
        let model = parse_pom_str(xml).unwrap();
        assert_eq!(model.licenses.len(), 3);
        assert_eq!(
            model.licenses[0],
            LicenseDeclaration::new("MIT License", "https://opensource.org/licenses/MIT")
        );
        assert_eq!(
            model.licenses[1],
            LicenseDeclaration::new("Eclipse Public License 2.0", "")
        );
        assert_eq!(model.licenses[2], LicenseDeclaration::new("", ""));
        assert_eq!(model.display_name(), "lib");
    }

    #[test]
    fn test_malformed_pom() {
        let result = parse_pom_str("<project><name>broken</project>");
        assert!(result.is_err());
    }

    #[test]
    fn test_parent_license_inheritance() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("guava")).unwrap();
        std::fs::write(dir.path().join("guava/guava-31.1-jre.pom"), GUAVA_POM).unwrap();
        std::fs::write(dir.path().join("guava-parent-31.1-jre.pom"), GUAVA_PARENT_POM).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let records = PomReader::new(false).read(dir.path()).unwrap();
        assert_eq!(records.len(), 2);

        let guava = records
            .iter()
            .find(|r| r.gav.as_deref() == Some("com.google.guava:guava:31.1-jre"))
            .unwrap();
        assert_eq!(guava.name.as_deref(), Some("Guava: Google Core Libraries for Java"));
        assert_eq!(guava.year.as_deref(), Some("2010"));
        assert_eq!(
            guava.licenses,
            vec![LicenseDeclaration::new(
                "Apache License, Version 2.0",
                "http://www.apache.org/licenses/LICENSE-2.0.txt"
            )]
        );
    }

    #[test]
    fn test_missing_parent_leaves_no_license() {
        let dir = TempDir::new().unwrap();
        let pom = dir.path().join("pom.xml");
        std::fs::write(&pom, GUAVA_POM).unwrap();

        let records = PomReader::new(false).read(&pom).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].licenses.is_empty());
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let a = r#"<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version>
<parent><groupId>g</groupId><artifactId>b</artifactId><version>1</version></parent></project>"#;
        let b = r#"<project><groupId>g</groupId><artifactId>b</artifactId><version>1</version>
<parent><groupId>g</groupId><artifactId>a</artifactId><version>1</version></parent></project>"#;
        let models = vec![parse_pom_str(a).unwrap(), parse_pom_str(b).unwrap()];

        let records = to_records(&models);
        assert!(records.iter().all(|r| r.licenses.is_empty()));
    }

    #[test]
    fn test_android_support_gets_apache() {
        let xml = r#"<project>
  <groupId>com.android.support</groupId>
  <artifactId>appcompat-v7</artifactId>
  <version>28.0.0</version>
</project>"#;
        let records = to_records(&[parse_pom_str(xml).unwrap()]);
        assert_eq!(
            records[0].licenses,
            vec![LicenseDeclaration::new(APACHE_LICENSE_NAME, APACHE_LICENSE_URL)]
        );
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("good.pom"), GUAVA_PARENT_POM).unwrap();
        std::fs::write(dir.path().join("bad.pom"), "<project><name>x</version></project>").unwrap();

        let records = PomReader::new(false).read(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gav.as_deref(), Some("com.google.guava:guava-parent:31.1-jre"));
    }

    #[test]
    fn test_duplicate_coordinates_keep_first() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a-1.pom"), GUAVA_PARENT_POM).unwrap();
        std::fs::create_dir_all(dir.path().join("copy")).unwrap();
        std::fs::write(dir.path().join("copy/pom.xml"), GUAVA_PARENT_POM).unwrap();

        let records = PomReader::new(false).read(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gav.as_deref(), Some("com.google.guava:guava-parent:31.1-jre"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_not_followed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pom.xml"),
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version></project>",
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let records = PomReader::new(false).read(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gav.as_deref(), Some("g:a:1"));
    }
}
