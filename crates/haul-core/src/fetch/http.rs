//! Direct archive downloads.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Download the archive at `url` into a fresh temporary file.
pub(crate) fn download_archive(url: &str) -> Result<NamedTempFile> {
    tracing::info!(%url, "downloading archive");

    let runtime = tokio::runtime::Runtime::new()?;
    let bytes = runtime.block_on(fetch_bytes(url))?;

    let mut archive = tempfile::Builder::new()
        .prefix("haul-")
        .suffix(".zip")
        .tempfile()?;
    archive.write_all(&bytes)?;
    archive.flush()?;

    Ok(archive)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await.map_err(|e| Error::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(|e| Error::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(bytes.to_vec())
}
