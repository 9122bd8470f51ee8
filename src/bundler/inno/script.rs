//! Inno Setup build script generation.
//!
//! Renders the `.iss` script from packaging settings. Rendering is a pure
//! function of the settings, and every interpolated value passes through a
//! single escape function registered on the template engine.

use super::template::ISS_TEMPLATE;
use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::settings::Settings;
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Renders the build script for the given settings.
///
/// Same settings in, byte-identical script out.
pub fn render(settings: &Settings) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(escape_value);
    handlebars
        .register_template_string("build.iss", ISS_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register script template: {e}")))?;

    let safe_name = settings.safe_name();
    let mut data = BTreeMap::new();
    data.insert("app_name", settings.name().to_string());
    data.insert("app_version", settings.version().to_string());
    data.insert("install_dir", format!("{{pf}}\\{safe_name}"));
    data.insert("group_name", safe_name.to_string());
    data.insert("output_base", output_base(settings.output_file())?);
    data.insert(
        "source_exe",
        format!("source\\{}", file_name(settings.input_file())?),
    );
    data.insert("exe_target", format!("{{app}}\\{safe_name}.exe"));
    data.insert(
        "desktop_shortcut",
        format!("{{commondesktop}}\\{}", settings.name()),
    );
    if let Some(icon) = settings.icon_file() {
        data.insert("setup_icon", format!("source\\{}", file_name(icon)?));
    }
    if settings.auto_start() {
        data.insert(
            "startup_shortcut",
            format!("{{userstartup}}\\{}", settings.name()),
        );
        if let Some(parameters) = settings.auto_start_parameters() {
            data.insert("auto_start_parameters", parameters.join(" "));
        }
    }
    if let Some(parameters) = settings.run_parameters() {
        data.insert("run_parameters", parameters.join(" "));
    }

    handlebars
        .render("build.iss", &data)
        .map_err(|e| Error::GenericError(format!("failed to render script template: {e}")))
}

/// Renders the script and writes it into the build workspace.
pub async fn write_script(settings: &Settings) -> Result<PathBuf> {
    let script_path = settings.script_path();
    let content = render(settings)?;
    tokio::fs::write(&script_path, content)
        .await
        .fs_context("writing build script", &script_path)?;
    log::debug!("Inno Setup script created at: {}", script_path.display());
    Ok(script_path)
}

/// File name component of a path, as UTF-8.
fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidSettings(format!("{path:?} has no usable file name")))
}

/// Output base name: the output file name with its extension stripped.
fn output_base(output: &Path) -> Result<String> {
    output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidSettings(format!("{output:?} has no usable file name")))
}

/// Escapes a value for interpolation into the script.
///
/// Double quotes are doubled (the script format's quote escape) and line
/// breaks are dropped so a value cannot terminate a field or section early.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\"\""),
            '\r' | '\n' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn base() -> SettingsBuilder {
        SettingsBuilder::new()
            .name("Demo App")
            .input_file("/work/libs/demo.exe")
            .jre_dir("/work/jre")
            .output_file("/work/dist/demo-installer.exe")
            .build_root("/work/build")
            .cache_root("/work/cache")
    }

    #[test]
    fn render_is_deterministic() {
        let settings = base().build().unwrap();
        assert_eq!(render(&settings).unwrap(), render(&settings).unwrap());
    }

    #[test]
    fn renders_setup_files_and_run_sections() {
        let settings = base().version("2.0").build().unwrap();
        let script = render(&settings).unwrap();

        assert!(script.contains("AppName=Demo App\n"));
        assert!(script.contains("AppVersion=2.0\n"));
        assert!(script.contains("DefaultDirName={pf}\\Demo-App\n"));
        assert!(script.contains("DefaultGroupName=Demo-App\n"));
        assert!(script.contains("OutputDir=output\n"));
        assert!(script.contains("OutputBaseFilename=demo-installer\n"));
        assert!(script.contains("Compression=lzma\n"));
        assert!(script.contains("SolidCompression=yes\n"));
        assert!(
            script.contains("Source: \"source\\demo.exe\"; DestDir: \"{app}\"; Flags: ignoreversion")
        );
        assert!(
            script.contains("Source: \"source\\jre\\*\"; DestDir: \"{app}\\jre\"; Flags: recursesubdirs")
        );
        assert!(
            script.contains("Name: \"{commondesktop}\\Demo App\"; Filename: \"{app}\\Demo-App.exe\"")
        );
        assert!(script.contains(
            "Description: \"Launch Demo App\"; Flags: nowait postinstall skipifsilent"
        ));
    }

    #[test]
    fn icon_toggle_changes_only_the_icon_line() {
        let with_icon = render(&base().icon_file("/work/app.ico").build().unwrap()).unwrap();
        let without_icon = render(&base().build().unwrap()).unwrap();

        assert!(with_icon.contains("SetupIconFile=source\\app.ico\n"));
        assert!(!without_icon.contains("SetupIconFile"));
        let filtered: Vec<&str> = with_icon
            .lines()
            .filter(|line| !line.starts_with("SetupIconFile="))
            .collect();
        assert_eq!(filtered, without_icon.lines().collect::<Vec<&str>>());
    }

    #[test]
    fn absent_parameters_produce_no_parameters_clause() {
        let script = render(&base().build().unwrap()).unwrap();
        assert!(!script.contains("Parameters:"));
    }

    #[test]
    fn parameters_are_joined_by_single_spaces() {
        let settings = base()
            .run_parameters(vec!["--a".into(), "--b".into()])
            .build()
            .unwrap();
        let script = render(&settings).unwrap();
        assert!(script.contains("Parameters: \"--a --b\"; Description:"));
    }

    #[test]
    fn auto_start_adds_exactly_one_startup_entry() {
        let off = render(&base().build().unwrap()).unwrap();
        assert!(!off.contains("{userstartup}"));

        let on = render(&base().auto_start(true).build().unwrap()).unwrap();
        assert_eq!(on.matches("{userstartup}").count(), 1);
        assert!(
            on.contains("Name: \"{userstartup}\\Demo App\"; Filename: \"{app}\\Demo-App.exe\"\n")
        );
    }

    #[test]
    fn auto_start_parameters_only_affect_the_startup_entry() {
        let settings = base()
            .auto_start(true)
            .auto_start_parameters(vec!["--minimized".into()])
            .build()
            .unwrap();
        let script = render(&settings).unwrap();
        assert!(script.contains(
            "Name: \"{userstartup}\\Demo App\"; Filename: \"{app}\\Demo-App.exe\"; Parameters: \"--minimized\"\n"
        ));
        // The post-install run entry carries no parameters.
        assert!(!script.contains("Parameters: \"--minimized\"; Description:"));
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let settings = base().name("Demo \"Pro\" App").build().unwrap();
        let script = render(&settings).unwrap();
        assert!(script.contains("Name: \"{commondesktop}\\Demo \"\"Pro\"\" App\";"));
    }
}
