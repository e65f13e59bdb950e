use futures_util::StreamExt;
use reqwest::{Client, StatusCode, Url};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File IO operation failed, error: '{0}'")]
    Io(#[from] tokio::io::Error),
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Download req did not yield a success status, instead: '{0}'")]
    BadStatus(StatusCode),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One numbered download attempt: a single GET streamed into a single file.
/// The index only exists to derive the destination filename, tasks carry no
/// other state and never retry.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub index: usize,
    pub url: Url,
    pub file_path: PathBuf,
    pub timeout: Duration,
    pub client: Client,
}

impl DownloadTask {
    pub fn new(
        index: usize,
        url: Url,
        file_path: PathBuf,
        timeout: Duration,
        client: Client,
    ) -> Self {
        DownloadTask {
            index,
            url,
            file_path,
            timeout,
            client,
        }
    }

    /// Runs the task to completion and returns the number of bytes written.
    /// The destination file is only created after the status check, a non-2xx
    /// response leaves the filesystem untouched.
    pub async fn run(&self) -> Result<u64> {
        let resp = self
            .client
            .get(self.url.as_ref())
            .timeout(self.timeout)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            log::warn!("Photo {} rejected by server: {}", self.index, status);
            return Err(Error::BadStatus(status));
        }
        let mut file_handler = File::create(&self.file_path).await?;
        let mut stream = resp.bytes_stream();
        let mut downloaded_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let item = chunk?;
            file_handler.write_all(&item).await?;
            downloaded_bytes += item.len() as u64;
        }
        file_handler.flush().await?;
        log::debug!(
            "Download completed: {} ({} bytes)",
            self.file_path.display(),
            downloaded_bytes
        );
        Ok(downloaded_bytes)
    }
}
