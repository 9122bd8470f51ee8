//! Command line interface.
//!
//! Parses arguments, configures logging, and drives an installer build.

mod args;

pub use args::Args;

use crate::bundler::{self, SettingsBuilder};
use crate::error::{CliError, Result};
use clap::Parser;

/// Main CLI entry point.
///
/// Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = build_settings(&args)?;
    bundler::inno::build_installer(&settings).await?;

    Ok(0)
}

/// Configures the log filter; `--verbose` raises it to debug level.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Converts parsed arguments into packaging settings.
fn build_settings(args: &Args) -> Result<bundler::Settings> {
    if !args.input.is_file() {
        return Err(CliError::InvalidArguments {
            reason: format!("input file {:?} does not exist", args.input),
        }
        .into());
    }
    if !args.jre.is_dir() {
        return Err(CliError::InvalidArguments {
            reason: format!("runtime directory {:?} does not exist", args.jre),
        }
        .into());
    }

    let mut builder = SettingsBuilder::new()
        .name(args.name.clone())
        .version(args.app_version.clone())
        .input_file(&args.input)
        .jre_dir(&args.jre)
        .auto_start(args.auto_start)
        .verbose(args.verbose)
        .strict(args.strict)
        .build_root(&args.build_dir);
    if let Some(output) = &args.output {
        builder = builder.output_file(output);
    }
    if let Some(icon) = &args.icon {
        builder = builder.icon_file(icon);
    }
    if let Some(cache_dir) = &args.cache_dir {
        builder = builder.cache_root(cache_dir);
    }
    if !args.parameters.is_empty() {
        builder = builder.run_parameters(args.parameters.clone());
    }
    if !args.auto_start_parameters.is_empty() {
        builder = builder.auto_start_parameters(args.auto_start_parameters.clone());
    }

    Ok(builder.build()?)
}
