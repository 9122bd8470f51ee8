//! Packaging settings for installer builds.

use super::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Immutable packaging parameters for one installer build.
///
/// Central configuration for the bundler, constructed via
/// [`SettingsBuilder`] and owned by the build orchestration for the
/// duration of a build.
///
/// # Examples
///
/// ```no_run
/// use innopack::bundler::SettingsBuilder;
///
/// # fn example() -> innopack::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .name("Demo App")
///     .version("2.0")
///     .input_file("build/libs/demo.exe")
///     .jre_dir("build/jre")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Application display name.
    name: String,

    /// Display name with spaces replaced, safe for paths and identifiers.
    safe_name: String,

    /// Version recorded in the installer metadata.
    version: String,

    /// Executable to package.
    input_file: PathBuf,

    /// Destination of the produced installer.
    output_file: PathBuf,

    /// Optional icon for the installer and shortcuts.
    icon_file: Option<PathBuf>,

    /// Runtime directory bundled next to the executable.
    jre_dir: PathBuf,

    /// Parameters passed to the application when launched after install.
    run_parameters: Option<Vec<String>>,

    /// Parameters passed to the application when launched from Startup.
    auto_start_parameters: Option<Vec<String>>,

    /// Whether to create a Startup shortcut.
    auto_start: bool,

    /// Whether to forward compiler output to the log.
    verbose: bool,

    /// Whether a non-zero compiler exit fails the build.
    strict: bool,

    /// Root directory for the build workspace.
    build_root: PathBuf,

    /// Root directory of the toolset cache.
    cache_root: PathBuf,
}

impl Settings {
    /// Returns the application display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display name with spaces replaced by dashes.
    pub fn safe_name(&self) -> &str {
        &self.safe_name
    }

    /// Returns the version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the executable to package.
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    /// Returns the destination of the produced installer.
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Returns the optional icon file.
    pub fn icon_file(&self) -> Option<&Path> {
        self.icon_file.as_deref()
    }

    /// Returns the runtime directory to bundle.
    pub fn jre_dir(&self) -> &Path {
        &self.jre_dir
    }

    /// Returns the post-install launch parameters, if any.
    pub fn run_parameters(&self) -> Option<&[String]> {
        self.run_parameters.as_deref()
    }

    /// Returns the Startup launch parameters, if any.
    pub fn auto_start_parameters(&self) -> Option<&[String]> {
        self.auto_start_parameters.as_deref()
    }

    /// Whether a Startup shortcut is created.
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// Whether compiler output is forwarded to the log.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether a non-zero compiler exit fails the build.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Returns the toolset cache root.
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Build-scoped workspace, recreated for every build.
    pub fn workspace_dir(&self) -> PathBuf {
        self.build_root.join("inno")
    }

    /// Staging directory for the executable, runtime, and icon.
    pub fn source_dir(&self) -> PathBuf {
        self.workspace_dir().join("source")
    }

    /// Path of the generated compiler script.
    pub fn script_path(&self) -> PathBuf {
        self.workspace_dir().join("build.iss")
    }

    /// Directory the compiler writes its artifact into.
    pub fn compiler_output_dir(&self) -> PathBuf {
        self.workspace_dir().join("output")
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    name: Option<String>,
    version: Option<String>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    icon_file: Option<PathBuf>,
    jre_dir: Option<PathBuf>,
    run_parameters: Option<Vec<String>>,
    auto_start_parameters: Option<Vec<String>>,
    auto_start: bool,
    verbose: bool,
    strict: bool,
    build_root: Option<PathBuf>,
    cache_root: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the version recorded in the installer metadata.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the executable to package.
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    /// Sets the destination of the produced installer.
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Sets an icon for the installer and shortcuts.
    pub fn icon_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_file = Some(path.into());
        self
    }

    /// Sets the runtime directory to bundle.
    pub fn jre_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.jre_dir = Some(path.into());
        self
    }

    /// Sets the parameters passed when launching the app after install.
    pub fn run_parameters(mut self, parameters: Vec<String>) -> Self {
        self.run_parameters = Some(parameters);
        self
    }

    /// Sets the parameters passed when launching from the Startup shortcut.
    pub fn auto_start_parameters(mut self, parameters: Vec<String>) -> Self {
        self.auto_start_parameters = Some(parameters);
        self
    }

    /// Enables or disables the Startup shortcut.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Enables or disables forwarding compiler output to the log.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables or disables failing the build on a non-zero compiler exit.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the root directory for the build workspace.
    pub fn build_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_root = Some(path.into());
        self
    }

    /// Sets the root directory of the toolset cache.
    pub fn cache_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(path.into());
        self
    }

    /// Validates the collected parameters and builds the [`Settings`].
    pub fn build(self) -> Result<Settings> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidSettings("`name` is required".into()))?;
        let input_file = self
            .input_file
            .ok_or_else(|| Error::InvalidSettings("`input_file` is required".into()))?;
        let jre_dir = self
            .jre_dir
            .ok_or_else(|| Error::InvalidSettings("`jre_dir` is required".into()))?;

        let safe_name = name.replace(' ', "-");
        let output_file = self.output_file.unwrap_or_else(|| {
            let file_name = format!("{}-installer.exe", name.to_lowercase().replace(' ', "-"));
            match input_file.parent() {
                Some(parent) => parent.join(&file_name),
                None => PathBuf::from(file_name),
            }
        });
        let cache_root = self
            .cache_root
            .or_else(default_cache_root)
            .ok_or_else(|| Error::InvalidSettings("no cache directory available".into()))?;

        Ok(Settings {
            name,
            safe_name,
            version: self.version.unwrap_or_else(|| "1.0".to_string()),
            input_file,
            output_file,
            icon_file: self.icon_file,
            jre_dir,
            run_parameters: self.run_parameters,
            auto_start_parameters: self.auto_start_parameters,
            auto_start: self.auto_start,
            verbose: self.verbose,
            strict: self.strict,
            build_root: self.build_root.unwrap_or_else(|| PathBuf::from("build")),
            cache_root,
        })
    }
}

/// Default per-user cache root for downloaded toolsets.
pub fn default_cache_root() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("innopack"))
}
