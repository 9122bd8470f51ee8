//! Core bundling functionality.
//!
//! Covers toolset acquisition, source staging, build script generation,
//! and Inno Setup compiler execution.

pub mod error;
pub mod inno;
pub mod settings;
pub mod utils;

pub use error::{Error, ErrorExt, Result};
pub use settings::{Settings, SettingsBuilder};
