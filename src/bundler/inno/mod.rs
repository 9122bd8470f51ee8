//! Windows installer creation via Inno Setup.
//!
//! Drives the full build: toolset acquisition, source staging, script
//! generation, compiler invocation, and artifact relocation.
//!
//! # Module Organization
//!
//! - `toolset` - Inno Setup release download and caching
//! - `template` - build script template constant
//! - `script` - build script generation from settings
//! - `build` - compiler execution and artifact relocation

mod build;
mod script;
mod template;
pub mod toolset;

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;
use std::path::PathBuf;
use toolset::{GitHubReleases, RELEASES_URL, ReleaseSource, ToolsetFetcher};

/// Builds an installer for the given settings.
///
/// Resolves the latest Inno Setup release through the GitHub releases API,
/// then stages, compiles, and relocates the installer.
///
/// # Process
///
/// 1. Acquire the Inno Setup toolset (cached per release tag)
/// 2. Recreate the build workspace and stage the input files
/// 3. Generate the build script
/// 4. Compile the script, draining the compiler's output
/// 5. Move the produced installer to the requested output path
///
/// # Returns
///
/// Path of the installer named by the settings' output file.
pub async fn build_installer(settings: &Settings) -> Result<PathBuf> {
    let source = GitHubReleases::new(RELEASES_URL)?;
    build_installer_with(settings, source).await
}

/// Builds an installer resolving the toolset through a custom release source.
pub async fn build_installer_with<S>(settings: &Settings, source: S) -> Result<PathBuf>
where
    S: ReleaseSource,
{
    log::info!("Building Inno Setup installer for {}", settings.name());

    let fetcher = ToolsetFetcher::new(source, settings.cache_root());
    let Some(tool_dir) = fetcher.fetch_latest().await else {
        return Err(Error::ToolsetUnavailable);
    };

    stage_sources(settings).await?;
    let script_path = script::write_script(settings).await?;

    let exit_code = build::run_compiler(&tool_dir, &script_path, settings).await?;
    if exit_code != 0 {
        log::warn!("Inno Setup compiler exited with status {exit_code}");
        if settings.strict() {
            return Err(Error::CompilerFailed(exit_code));
        }
    }

    let installer = build::collect_artifact(settings).await?;
    log::debug!("Process finished with exit code: {exit_code}");
    log::info!("✓ Created installer: {}", installer.display());
    Ok(installer)
}

/// Recreates the build workspace and stages the executable, runtime, and
/// optional icon under `source/`.
async fn stage_sources(settings: &Settings) -> Result<()> {
    fs::create_dir_all(&settings.workspace_dir(), true).await?;
    let source_dir = settings.source_dir();
    fs::create_dir_all(&source_dir, false).await?;

    let input_file = settings.input_file();
    let input_name = input_file
        .file_name()
        .ok_or_else(|| Error::InvalidSettings(format!("{input_file:?} has no usable file name")))?;
    fs::copy_file(input_file, &source_dir.join(input_name)).await?;
    fs::copy_dir(settings.jre_dir(), &source_dir.join("jre")).await?;
    if let Some(icon_file) = settings.icon_file() {
        let icon_name = icon_file.file_name().ok_or_else(|| {
            Error::InvalidSettings(format!("{icon_file:?} has no usable file name"))
        })?;
        fs::copy_file(icon_file, &source_dir.join(icon_name)).await?;
    }
    Ok(())
}
