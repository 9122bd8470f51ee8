//! Inno Setup toolset acquisition and caching.
//!
//! Resolves the latest Inno Setup release through the GitHub releases API
//! and keeps one extracted copy per version tag under the cache root. A
//! cache entry only appears at its final path once download and extraction
//! completed, so its presence alone marks it ready to use.

use crate::bundler::error::{Error, Result};
use crate::bundler::utils::{archive, fs, http};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Releases API endpoint for the Inno Setup distribution.
pub const RELEASES_URL: &str = "https://api.github.com/repos/intisy/InnoSetup/releases/latest";

/// Cache subdirectory holding extracted toolsets, one per version tag.
const TOOL_DIR: &str = "inno";

/// Name of the downloaded archive inside a staging directory.
const ARCHIVE_NAME: &str = "inno.zip";

/// Metadata of the latest toolset release.
#[derive(Clone, Debug, Deserialize)]
pub struct Release {
    /// Version tag, unique per release; names the cache entry.
    pub tag_name: String,
    /// URL of the release's zip archive.
    pub zipball_url: String,
}

/// Source of release metadata and archives.
///
/// The production implementation is [`GitHubReleases`]; tests substitute
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    /// Fetches metadata of the latest release.
    async fn latest_release(&self) -> Result<Release>;

    /// Downloads the release archive at `url` to `dest`.
    async fn download_archive(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Release source backed by the GitHub releases API.
pub struct GitHubReleases {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubReleases {
    /// Creates a source querying the given releases API URL.
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        // GitHub rejects requests without a User-Agent header.
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self) -> Result<Release> {
        let body = http::fetch_text(&self.client, &self.api_url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn download_archive(&self, url: &str, dest: &Path) -> Result<()> {
        http::download_to_file(&self.client, url, dest).await
    }
}

/// Downloads and caches the Inno Setup toolset, one entry per version tag.
pub struct ToolsetFetcher<S> {
    source: S,
    cache_root: PathBuf,
}

impl<S: ReleaseSource> ToolsetFetcher<S> {
    /// Creates a fetcher caching under `cache_root`.
    pub fn new(source: S, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_root: cache_root.into(),
        }
    }

    /// Resolves the latest toolset and returns its extracted directory.
    ///
    /// All failures are soft: they are logged and reported as `None` so the
    /// caller can abort the build without tearing anything down. Repeated
    /// calls for an already-cached version tag do no download or extraction
    /// work.
    pub async fn fetch_latest(&self) -> Option<PathBuf> {
        match self.try_fetch().await {
            Ok(path) => Some(path),
            Err(error @ Error::UnexpectedStatus { .. }) => {
                log::warn!("Failed to get the latest Inno Setup release: {error}");
                None
            }
            Err(error) => {
                log::error!("Failed to acquire the Inno Setup toolset: {error}");
                None
            }
        }
    }

    async fn try_fetch(&self) -> Result<PathBuf> {
        let release = self.source.latest_release().await?;
        let tool_dir = self.cache_root.join(TOOL_DIR).join(&release.tag_name);
        if tool_dir.exists() {
            // A directory at the final path means a completed extraction.
            log::debug!("Using cached Inno Setup at {}", tool_dir.display());
            return Ok(tool_dir);
        }

        log::debug!("Downloading Inno Setup from: {}", release.zipball_url);
        let staging = self
            .cache_root
            .join(TOOL_DIR)
            .join(format!(".{}.partial", release.tag_name));
        fs::create_dir_all(&staging, true).await?;
        let archive_path = staging.join(ARCHIVE_NAME);
        self.source
            .download_archive(&release.zipball_url, &archive_path)
            .await?;
        log::debug!("Download completed.");
        archive::extract_flattened(&archive_path, &staging).await?;
        log::debug!("Unzip completed to {}", staging.display());

        // Completed entries appear at the final path in one rename, so the
        // existence check above can never see a partial extraction. Losing
        // the rename race to a concurrent fetcher leaves the winner's entry
        // in place.
        if let Err(e) = tokio::fs::rename(&staging, &tool_dir).await {
            if tool_dir.exists() {
                fs::remove_dir_all(&staging).await?;
            } else {
                return Err(Error::Fs {
                    action: "publishing cache entry",
                    path: tool_dir,
                    source: e,
                });
            }
        }
        Ok(tool_dir)
    }
}
