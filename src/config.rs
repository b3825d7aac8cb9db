use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Root configuration structure, deserialized from `.license-reportr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Which reports to produce and where to copy them.
    #[serde(default)]
    pub reports: ReportConfig,
}

/// Report toggles. These decide which renderers run; they never change how
/// licenses are resolved or how projects are built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub html: bool,
    pub copy_html_to_assets: bool,
    pub json: bool,
    pub copy_json_to_assets: bool,
    pub csv: bool,
    pub copy_csv_to_assets: bool,
    pub text: bool,
    pub copy_text_to_assets: bool,
    /// Append `(version)` to project names in the HTML report.
    pub show_versions: bool,
    /// Dependencies whose `group:artifact:version` contains any of these are left out.
    pub ignored_patterns: Vec<String>,
    /// Directory holding license bodies named by canonical id (`mit.txt`, ...).
    pub license_texts_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            html: true,
            copy_html_to_assets: true,
            json: true,
            copy_json_to_assets: false,
            csv: false,
            copy_csv_to_assets: false,
            text: false,
            copy_text_to_assets: false,
            show_versions: false,
            ignored_patterns: Vec::new(),
            license_texts_dir: None,
        }
    }
}

impl ReportConfig {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.no_html {
            self.html = false;
        }
        if cli.no_json {
            self.json = false;
        }
        if cli.csv {
            self.csv = true;
        }
        if cli.text {
            self.text = true;
        }
        if cli.show_versions {
            self.show_versions = true;
        }
        self.ignored_patterns.extend(cli.ignore.iter().cloned());
        if let Some(dir) = &cli.license_texts {
            self.license_texts_dir = Some(dir.clone());
        }
    }
}

/// Load the report configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.license-reportr/config.toml`
/// 3. `~/.config/license-reportr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-reportr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-reportr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
