//! Writing snapshots to disk.

use eyre::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory name used for a channel reference.
///
/// The reference is used as typed, except that path separators are replaced so a reference can
/// never point outside the output root.
pub fn output_label(reference: &str) -> String {
    let label: String = reference
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match label.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => label,
    }
}

/// Writes `value` as pretty-printed JSON to `root/label/file_name` and returns that path.
///
/// `root/label` is created if it does not exist yet; an existing file is overwritten.
#[tracing::instrument(skip(value))]
pub async fn save_json<T: Serialize + ?Sized>(
    root: &Path,
    label: &str,
    file_name: &str,
    value: &T,
) -> eyre::Result<PathBuf> {
    let dir = root.join(label);
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("create output directory {}", dir.display()))?;

    let json = serde_json::to_vec_pretty(value).context("serialize snapshot")?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &json)
        .await
        .with_context(|| format!("write {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "wrote snapshot");
    Ok(path)
}
