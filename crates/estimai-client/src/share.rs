//! Export and share helpers

use crate::error::ClientError;
use crate::poller::Estimation;
use estimai_domain::CorrelationId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of an exported estimation
pub fn export_file_name(id: &CorrelationId) -> String {
    format!("estimativa_{}.json", id)
}

/// Write the normalized document, pretty-printed, into `dir`
///
/// Returns the path of the written file.
pub fn export_to(dir: &Path, estimation: &Estimation) -> Result<PathBuf, ClientError> {
    let path = dir.join(export_file_name(&estimation.correlation_id));
    let contents = serde_json::to_string_pretty(&estimation.document)?;
    fs::write(&path, contents)?;
    info!("Exported estimation {} to {}", estimation.correlation_id, path.display());
    Ok(path)
}

/// Link to the result page for `id`
pub fn share_url(origin: &str, id: &CorrelationId) -> String {
    format!("{}/results/{}", origin.trim_end_matches('/'), id)
}
