//! End-to-end installer build tests.
//!
//! Use a fake release source and a fake compiler planted in the toolset
//! cache, so no network and no real Inno Setup are involved.

#![cfg(unix)]

use innopack::bundler::error::Error;
use innopack::bundler::inno;
use innopack::bundler::inno::toolset::{Release, ReleaseSource};
use innopack::bundler::{Result, Settings, SettingsBuilder};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const TAG: &str = "is-6.2.0";

/// Fake compiler that copies the staged executable into `output/`.
const OK_COMPILER: &str = "#!/bin/sh
mkdir -p output
cp source/demo.exe output/demo-app-installer.exe
";

/// Fake compiler that exits without producing anything.
const SILENT_COMPILER: &str = "#!/bin/sh
exit 0
";

/// Fake compiler that produces the artifact but reports a failure.
const GRUMPY_COMPILER: &str = "#!/bin/sh
echo 'compiler error: something minor' >&2
mkdir -p output
cp source/demo.exe output/demo-app-installer.exe
exit 2
";

/// Release source that serves a fixed tag without touching the network.
///
/// Downloads are rejected: these tests plant the toolset in the cache, so
/// every fetch must take the cached fast path.
struct FakeSource {
    api_calls: AtomicUsize,
    download_calls: AtomicUsize,
    fail_api: bool,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            api_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            fail_api: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_api: true,
            ..Self::new()
        }
    }
}

impl ReleaseSource for &FakeSource {
    async fn latest_release(&self) -> Result<Release> {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_api {
            return Err(Error::GenericError("HTTP 404 from releases API".into()));
        }
        Ok(Release {
            tag_name: TAG.into(),
            zipball_url: "https://example.invalid/inno.zip".into(),
        })
    }

    async fn download_archive(&self, _url: &str, _dest: &Path) -> Result<()> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::GenericError(
            "tests must hit the cache fast path".into(),
        ))
    }
}

/// Plants an executable fake compiler as a completed cache entry.
fn plant_fake_compiler(cache_root: &Path, script: &str) {
    let tool_dir = cache_root.join("inno").join(TAG);
    std::fs::create_dir_all(&tool_dir).unwrap();
    let compiler = tool_dir.join("ISCC.exe");
    std::fs::write(&compiler, script).unwrap();
    std::fs::set_permissions(&compiler, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Writes the input executable and a small runtime tree.
fn stage_inputs(root: &Path) -> (PathBuf, PathBuf) {
    let input = root.join("demo.exe");
    std::fs::write(&input, b"exe bytes").unwrap();
    let jre = root.join("jre");
    std::fs::create_dir_all(jre.join("bin")).unwrap();
    std::fs::create_dir_all(jre.join("lib")).unwrap();
    std::fs::write(jre.join("bin").join("java"), b"java").unwrap();
    std::fs::write(jre.join("lib").join("rt.jar"), b"rt").unwrap();
    std::fs::write(jre.join("release"), b"JAVA_VERSION=17").unwrap();
    (input, jre)
}

fn demo_settings(root: &Path, input: &Path, jre: &Path, strict: bool) -> Settings {
    SettingsBuilder::new()
        .name("Demo App")
        .version("2.0")
        .input_file(input)
        .jre_dir(jre)
        .output_file(root.join("dist").join("demo-app-installer.exe"))
        .build_root(root.join("build"))
        .cache_root(root.join("cache"))
        .strict(strict)
        .build()
        .unwrap()
}

#[tokio::test]
async fn builds_installer_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let (input, jre) = stage_inputs(root);
    plant_fake_compiler(&root.join("cache"), OK_COMPILER);
    // A stale file at the output path is replaced.
    std::fs::create_dir_all(root.join("dist")).unwrap();
    std::fs::write(root.join("dist").join("demo-app-installer.exe"), b"stale").unwrap();

    let source = FakeSource::new();
    let settings = demo_settings(root, &input, &jre, false);
    let installer = inno::build_installer_with(&settings, &source).await.unwrap();

    assert_eq!(installer, root.join("dist").join("demo-app-installer.exe"));
    assert_eq!(std::fs::read(&installer).unwrap(), b"exe bytes");

    let script = std::fs::read_to_string(settings.script_path()).unwrap();
    assert!(script.contains("AppName=Demo App"));
    assert!(script.contains("AppVersion=2.0"));
    assert!(
        script.contains("Source: \"source\\jre\\*\"; DestDir: \"{app}\\jre\"; Flags: recursesubdirs")
    );

    // The runtime tree was staged into the workspace.
    assert!(settings.source_dir().join("jre").join("bin").join("java").is_file());
    assert!(settings.source_dir().join("demo.exe").is_file());

    // The cached toolset was used without downloading.
    assert_eq!(source.api_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.download_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn api_failure_aborts_before_workspace_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let (input, jre) = stage_inputs(root);

    let source = FakeSource::failing();
    let settings = demo_settings(root, &input, &jre, false);
    let result = inno::build_installer_with(&settings, &source).await;

    assert!(matches!(result, Err(Error::ToolsetUnavailable)));
    assert!(
        !settings.workspace_dir().exists(),
        "no workspace is created when the toolset is unavailable"
    );
}

#[tokio::test]
async fn missing_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let (input, jre) = stage_inputs(root);
    plant_fake_compiler(&root.join("cache"), SILENT_COMPILER);

    let source = FakeSource::new();
    let settings = demo_settings(root, &input, &jre, false);
    let result = inno::build_installer_with(&settings, &source).await;

    assert!(matches!(result, Err(Error::ArtifactMissing(_))));
}

#[tokio::test]
async fn nonzero_exit_is_lax_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let (input, jre) = stage_inputs(root);
    plant_fake_compiler(&root.join("cache"), GRUMPY_COMPILER);

    let source = FakeSource::new();
    let settings = demo_settings(root, &input, &jre, false);
    let installer = inno::build_installer_with(&settings, &source).await.unwrap();

    assert!(installer.is_file());
}

#[tokio::test]
async fn strict_mode_fails_on_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let (input, jre) = stage_inputs(root);
    plant_fake_compiler(&root.join("cache"), GRUMPY_COMPILER);

    let source = FakeSource::new();
    let settings = demo_settings(root, &input, &jre, true);
    let result = inno::build_installer_with(&settings, &source).await;

    assert!(matches!(result, Err(Error::CompilerFailed(2))));
    assert!(
        !root.join("dist").join("demo-app-installer.exe").exists(),
        "strict mode fails before the artifact is moved"
    );
}
