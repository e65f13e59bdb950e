use std::path::Path;

/// Extracts filesize from path, if file does not exist or read fails the function returns 0
pub async fn file_size(fpath: &Path) -> u64 {
    match tokio::fs::metadata(fpath).await {
        Ok(metadata) => metadata.len(),
        _ => 0,
    }
}

pub fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Destination filename for a task index, zero-padded to four digits.
pub fn photo_filename(index: usize) -> String {
    format!("photo_{:04}.jpg", index)
}

/// Sums the sizes of all `.jpg` files directly inside `dir`.
/// The reported batch total comes from this scan, not from the in-memory
/// task results, so files left over from earlier runs count too.
pub async fn photo_dir_size(dir: &Path) -> tokio::io::Result<u64> {
    let mut total = 0u64;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|ext| ext == "jpg").unwrap_or(false) {
            total += entry.metadata().await?.len();
        }
    }
    Ok(total)
}
