//! Inno Setup compiler execution.
//!
//! Spawns the compiler against the generated script, drains its output,
//! and relocates the produced installer to the requested output path.

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::Settings;
use crate::bundler::utils::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Compiler executable inside an extracted toolset.
pub const COMPILER_EXE: &str = "ISCC.exe";

/// Runs the compiler against the build script and returns its exit code.
///
/// Standard output and standard error are drained line by line on dedicated
/// tasks, so the compiler never stalls on pipe back-pressure while the
/// orchestrator waits for it to exit. Lines are forwarded to the log only
/// in verbose mode. The wait has no timeout.
pub async fn run_compiler(tool_dir: &Path, script_path: &Path, settings: &Settings) -> Result<i32> {
    let compiler = tool_dir.join(COMPILER_EXE);
    let mut command = compiler_command(&compiler, script_path);
    command
        .current_dir(settings.workspace_dir())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|error| Error::CommandFailed {
        command: compiler.display().to_string(),
        error,
    })?;

    let verbose = settings.verbose();
    let stdout_task = child
        .stdout
        .take()
        .map(|stream| tokio::spawn(forward_lines(stream, verbose)));
    let stderr_task = child
        .stderr
        .take()
        .map(|stream| tokio::spawn(forward_lines(stream, verbose)));

    let status = child.wait().await.map_err(|error| Error::CommandFailed {
        command: compiler.display().to_string(),
        error,
    })?;
    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    Ok(status.code().unwrap_or(-1))
}

/// Forwards process output to the log, one line of buffering at a time.
async fn forward_lines<R>(stream: R, verbose: bool)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if verbose {
            log::debug!("{line}");
        }
    }
}

/// The compiler is invoked through `cmd.exe` on Windows.
#[cfg(windows)]
fn compiler_command(compiler: &Path, script_path: &Path) -> Command {
    let mut command = Command::new("cmd.exe");
    command.arg("/C").arg(compiler).arg(script_path);
    command
}

#[cfg(not(windows))]
fn compiler_command(compiler: &Path, script_path: &Path) -> Command {
    let mut command = Command::new(compiler);
    command.arg(script_path);
    command
}

/// Moves the compiler's artifact to the requested output path.
///
/// The compiler writes into its fixed `output` subdirectory; the artifact's
/// presence there is the only success signal this boundary offers.
pub async fn collect_artifact(settings: &Settings) -> Result<PathBuf> {
    let output_file = settings.output_file();
    let file_name = output_file
        .file_name()
        .ok_or_else(|| Error::InvalidSettings(format!("{output_file:?} has no usable file name")))?;
    let produced = settings.compiler_output_dir().join(file_name);
    if !produced.is_file() {
        return Err(Error::ArtifactMissing(produced));
    }

    fs::remove_file(output_file).await?;
    if let Some(parent) = output_file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    if tokio::fs::rename(&produced, output_file).await.is_err() {
        // Rename fails across filesystems; fall back to copy and remove.
        tokio::fs::copy(&produced, output_file)
            .await
            .fs_context("moving installer to", output_file)?;
        let _ = tokio::fs::remove_file(&produced).await;
    }
    Ok(output_file.to_path_buf())
}
