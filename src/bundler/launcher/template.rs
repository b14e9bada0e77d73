//! Launcher script templates.
//!
//! Handlebars sources rendered with [`super::LauncherTemplateData`]. The batch
//! template carries CRLF line endings.

/// POSIX shell launcher, also the marker of a previous build
pub const RUN_SH_TEMPLATE: &str = r#"#!/bin/sh
# Generated by kodegen_bundler_deploy. Runs {{binary_name}} in "{{run_mode}}" mode.
SCRIPTPATH=$(cd "$(dirname "$0")" && pwd)
exec "$SCRIPTPATH/{{binary_name}}" --import-path "{{import_path}}" --src-path "$SCRIPTPATH/src" --run-mode "{{run_mode}}" "$@"
"#;

/// Windows batch launcher
pub const RUN_BAT_TEMPLATE: &str = "@echo off\r\n\
rem Generated by kodegen_bundler_deploy. Runs {{binary_name}} in \"{{run_mode}}\" mode.\r\n\
\"%~dp0{{binary_name}}\" --import-path \"{{import_path}}\" --src-path \"%~dp0src\" --run-mode \"{{run_mode}}\" %*\r\n";
