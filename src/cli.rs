use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-reportr",
    about = "Generate open source license reports from dependency manifests",
    version
)]
pub struct Cli {
    /// POM file or directory of POM files to read
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read pre-resolved dependency records from a JSON file instead of POMs
    #[arg(long, value_name = "FILE")]
    pub records: Option<PathBuf>,

    /// Config file [default: ./.license-reportr/config.toml, fallback ~/.config/license-reportr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(long, value_name = "DIR", default_value = "build/reports/licenses")]
    pub output_dir: PathBuf,

    /// Base file name of the reports
    #[arg(long, default_value = "licenseReport")]
    pub name: String,

    /// Asset directory to copy reports into (repeatable)
    #[arg(long = "assets-dir", value_name = "DIR")]
    pub assets_dirs: Vec<PathBuf>,

    /// Directory with license texts named by canonical id (mit.txt, ...)
    #[arg(long, value_name = "DIR")]
    pub license_texts: Option<PathBuf>,

    /// Skip dependencies whose group:artifact:version contains PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Do not generate the HTML report
    #[arg(long)]
    pub no_html: bool,

    /// Do not generate the JSON report
    #[arg(long)]
    pub no_json: bool,

    /// Generate the CSV report
    #[arg(long)]
    pub csv: bool,

    /// Generate the plain text report
    #[arg(long)]
    pub text: bool,

    /// Show dependency versions in the HTML report
    #[arg(long)]
    pub show_versions: bool,

    /// Print the known license names and URLs with their license text and exit
    #[arg(long)]
    pub list_licenses: bool,

    /// Show every dependency in the summary and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and the summary line
    #[arg(short, long)]
    pub quiet: bool,
}
