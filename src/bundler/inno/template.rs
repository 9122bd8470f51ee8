//! Inno Setup script template.

/// Handlebars template for the generated `.iss` build script.
///
/// Conditional blocks share a line with surrounding literal text so the
/// rendering does not depend on standalone-tag whitespace handling.
pub const ISS_TEMPLATE: &str = "\
[Setup]
AppName={{app_name}}
AppVersion={{app_version}}
DefaultDirName={{install_dir}}
DefaultGroupName={{group_name}}
OutputDir=output
OutputBaseFilename={{output_base}}
{{#if setup_icon}}SetupIconFile={{setup_icon}}
{{/if}}Compression=lzma
SolidCompression=yes

[Files]
; Add executable and JRE files
Source: \"{{source_exe}}\"; DestDir: \"{app}\"; Flags: ignoreversion
Source: \"source\\jre\\*\"; DestDir: \"{app}\\jre\"; Flags: recursesubdirs

[Icons]
; Create desktop shortcut
Name: \"{{desktop_shortcut}}\"; Filename: \"{{exe_target}}\"{{#if startup_shortcut}}
Name: \"{{startup_shortcut}}\"; Filename: \"{{exe_target}}\"{{#if auto_start_parameters}}; Parameters: \"{{auto_start_parameters}}\"{{/if}}{{/if}}

[Run]
; Run the application after installation
Filename: \"{{exe_target}}\"; {{#if run_parameters}}Parameters: \"{{run_parameters}}\"; {{/if}}Description: \"Launch {{app_name}}\"; Flags: nowait postinstall skipifsilent
";
