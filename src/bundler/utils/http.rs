//! HTTP utilities for the releases API and archive downloads.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Performs a GET request and returns the response body as text.
///
/// Any non-success status is an error.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

/// Streams a GET response to a file, chunk by chunk.
///
/// Any non-success status aborts the download before the file is written.
pub async fn download_to_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    log::debug!("Downloading {url}");

    let mut response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            url: url.to_string(),
            status,
        });
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .fs_context("creating download file", dest)?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .fs_context("writing download file", dest)?;
    }
    file.flush().await.fs_context("flushing download file", dest)?;

    Ok(())
}
