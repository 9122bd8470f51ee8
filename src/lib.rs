//! Inno Setup installer packaging for Windows executables.
//!
//! Packages an executable plus a bundled runtime into a single installer by
//! driving the Inno Setup compiler: the latest compiler release is resolved
//! through the GitHub releases API and cached per version tag, the inputs
//! are staged into a fresh build workspace, a build script is generated,
//! and the compiler is run against it.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{Settings, SettingsBuilder};
pub use error::{AppError, CliError, Result};
