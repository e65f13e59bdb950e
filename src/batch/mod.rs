use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::download::{self, DownloadTask};
use crate::util::{mb, photo_dir_size, photo_filename};

/// Returns a random 1920x1080 photo on every request, no auth, no query
/// parameters.
pub const PHOTO_ENDPOINT: &str = "https://picsum.photos/1920/1080";

pub const DEFAULT_OUTPUT_DIR: &str = "test_photos";

/// Fixed pool width, tasks past this many wait for a free slot.
pub const WORKER_COUNT: usize = 10;

/// Per-request timeout, the only time bound applied. The batch as a whole
/// has none.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Output directory IO failed, error: '{0}'")]
    Io(#[from] tokio::io::Error),
}

/// Outcome of one task, kept until the pool drains so successes can be
/// counted.
#[derive(Debug)]
pub struct TaskReport {
    pub index: usize,
    pub result: download::Result<u64>,
}

impl TaskReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate outcome of one batch run.
#[derive(Debug)]
pub struct Summary {
    pub succeeded: usize,
    pub requested: usize,
    pub total_bytes: u64,
    pub output_dir: PathBuf,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Download complete!")?;
        writeln!(f, "  Downloaded: {}/{}", self.succeeded, self.requested)?;
        writeln!(f, "  Total size: {:.2} MB", mb(self.total_bytes))?;
        write!(f, "  Location: {}", self.output_dir.display())
    }
}

/// Downloads batches of random photos into one output directory over a
/// bounded pool of concurrent workers. Holds a single shared client; every
/// task writes to an index-unique filename, so concurrent writers never
/// collide.
#[derive(Debug, Clone)]
pub struct BatchFetcher {
    client: Client,
    endpoint: Url,
    output_dir: PathBuf,
}

impl BatchFetcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let endpoint = Url::parse(PHOTO_ENDPOINT).expect("Default endpoint must parse!");
        Self::with_endpoint(endpoint, output_dir)
    }

    /// Same fetcher pointed at an alternate endpoint, used by tests to
    /// target a local server.
    pub fn with_endpoint(endpoint: Url, output_dir: impl Into<PathBuf>) -> Self {
        BatchFetcher {
            client: Client::new(),
            endpoint,
            output_dir: output_dir.into(),
        }
    }

    /// Dispatches `count` downloads across the worker pool and returns once
    /// every task has completed, successfully or not. Individual failures
    /// never abort siblings or the run; only an unusable output directory
    /// errors out.
    pub async fn fetch(&self, count: usize) -> Result<Summary> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        log::info!(
            "Dispatching {} downloads across {} workers",
            count,
            WORKER_COUNT
        );
        let reports: Vec<TaskReport> = stream::iter((1..=count).map(|index| self.task(index)))
            .map(|task| async move {
                let result = task.run().await;
                match &result {
                    Ok(bytes) => println!(
                        "Downloaded: {} ({:.2} MB)",
                        task.file_path.display(),
                        mb(*bytes)
                    ),
                    Err(e) => println!("Failed to download photo {}: {}", task.index, e),
                }
                TaskReport {
                    index: task.index,
                    result,
                }
            })
            .buffer_unordered(WORKER_COUNT)
            .collect()
            .await;

        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        // The total is rescanned from disk rather than summed from reports,
        // so leftovers from earlier runs into the same directory count too.
        let total_bytes = photo_dir_size(&self.output_dir).await?;
        Ok(Summary {
            succeeded,
            requested: count,
            total_bytes,
            output_dir: absolute(&self.output_dir),
        })
    }

    fn task(&self, index: usize) -> DownloadTask {
        DownloadTask::new(
            index,
            self.endpoint.clone(),
            self.output_dir.join(photo_filename(index)),
            REQUEST_TIMEOUT,
            self.client.clone(),
        )
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
