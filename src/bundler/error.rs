//! Error types for bundler operations.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while acquiring the toolset or building an installer.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors without further context
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO errors annotated with the failing action and path
    #[error("{action} {path:?}: {source}")]
    Fs {
        /// What was being attempted
        action: &'static str,
        /// Path the action was applied to
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// HTTP transport errors from the releases API or archive download
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the releases API or download endpoint
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// Status the server answered with
        status: reqwest::StatusCode,
    },

    /// Malformed release metadata
    #[error("malformed release metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// Corrupt or unreadable zip archive
    #[error("invalid archive {path:?}: {source}")]
    Archive {
        /// Archive file that failed to extract
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// Directory walk errors during recursive copies
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// The Inno Setup toolset could not be acquired
    #[error("Inno Setup toolset is unavailable")]
    ToolsetUnavailable,

    /// Failure to spawn the compiler process
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying IO error
        #[source]
        error: io::Error,
    },

    /// Non-zero compiler exit in strict mode
    #[error("Inno Setup compiler exited with status {0}")]
    CompilerFailed(i32),

    /// The compiler finished without producing the expected installer
    #[error("compiler did not produce expected artifact {0:?}")]
    ArtifactMissing(PathBuf),

    /// Invalid packaging settings
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Extension trait attaching filesystem context to `io::Error` results.
pub trait ErrorExt<T> {
    /// Maps an `io::Error` into [`Error::Fs`] with the given action and path.
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}
