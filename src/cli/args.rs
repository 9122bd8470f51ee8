//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Inno Setup installer packager
#[derive(Parser, Debug)]
#[command(
    name = "innopack",
    version,
    about = "Packages a Windows executable and a bundled runtime into an Inno Setup installer",
    long_about = "Packages a Windows executable and a bundled runtime (such as a JRE) into a
single Inno Setup installer.

Downloads the latest Inno Setup release on first use and caches it per
version tag, stages the inputs into a fresh build workspace, generates the
build script, and runs the compiler against it.

Usage:
  innopack --input build/libs/demo.exe --name \"Demo App\" --jre build/jre
  innopack -i demo.exe -n Demo --jre ./jre --icon demo.ico --auto-start

Exit code 0 = installer exists at the output path."
)]
pub struct Args {
    /// Application executable to package
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Human-readable application name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Runtime directory bundled next to the executable (installed as `jre`)
    #[arg(long, value_name = "DIR")]
    pub jre: PathBuf,

    /// Version recorded in the installer metadata
    #[arg(long, value_name = "VERSION", default_value = "1.0")]
    pub app_version: String,

    /// Icon for the installer and shortcuts
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Output path of the installer
    ///
    /// Defaults to `<input dir>/<name>-installer.exe` with the name
    /// lowercased and spaces replaced by dashes.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Parameter passed to the application when launched after install
    #[arg(long = "parameter", value_name = "PARAM")]
    pub parameters: Vec<String>,

    /// Create a Startup shortcut that launches the application at login
    #[arg(long)]
    pub auto_start: bool,

    /// Parameter passed to the application when launched from Startup
    #[arg(long = "auto-start-parameter", value_name = "PARAM")]
    pub auto_start_parameters: Vec<String>,

    /// Fail the build when the compiler exits with a non-zero status
    #[arg(long)]
    pub strict: bool,

    /// Directory for the build workspace
    #[arg(long, value_name = "DIR", default_value = "build")]
    pub build_dir: PathBuf,

    /// Cache directory for downloaded toolsets
    ///
    /// Defaults to `innopack` under the per-user cache directory.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log the compiler output and other debug detail
    #[arg(short, long)]
    pub verbose: bool,
}
