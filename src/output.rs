use crate::error::SummaryError;
use crate::movie::MovieId;
use crate::types::SessionResult;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Location of the summary file for `movie_id` inside `output_dir`.
pub fn summary_path<P: AsRef<Path>>(output_dir: P, movie_id: &MovieId) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}-summary.json", movie_id.as_str()))
}

/// Writes `result` as pretty-printed JSON to `<output_dir>/<movie_id>-summary.json`.
///
/// The output directory is created if it does not exist. When there is no
/// result, nothing is written and `Ok(None)` is returned.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized or the file cannot be
/// written.
pub async fn write_summary<P: AsRef<Path>>(
    result: Option<&SessionResult>,
    output_dir: P,
    movie_id: &MovieId,
) -> Result<Option<PathBuf>, SummaryError> {
    let Some(result) = result else {
        warn!(category = "output", movie_id = %movie_id, "no result to save, skipping summary file");
        return Ok(None);
    };

    let json = serde_json::to_string_pretty(result)?;
    fs::create_dir_all(output_dir.as_ref()).await?;

    let file_path = summary_path(output_dir, movie_id);
    fs::write(&file_path, json).await?;

    info!(path = %file_path.display(), "summary saved");
    Ok(Some(file_path))
}
