use std::path::PathBuf;

use tracing::{error, info};

use crate::args::Strategy;
use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::AggregateResult;

use super::config::SinkConfig;
use super::format::render_result;

/// Writes a strategy's result file, replacing any previous content.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the result cannot be
/// encoded, or the file cannot be written.
pub async fn write_result(
    config: &SinkConfig,
    strategy: Strategy,
    result: &AggregateResult,
) -> AppResult<PathBuf> {
    let path = config.result_path(strategy);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|err| {
            AppError::sink(SinkError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })
        })?;
    }

    let encoded = render_result(result, config.format)?;
    tokio::fs::write(&path, encoded).await.map_err(|err| {
        AppError::sink(SinkError::WriteResult {
            path: path.clone(),
            source: err,
        })
    })?;
    Ok(path)
}

/// Like [`write_result`], but a failure is logged and swallowed; the run
/// outcome does not depend on persistence.
pub async fn persist_result(
    config: &SinkConfig,
    strategy: Strategy,
    result: &AggregateResult,
) -> Option<PathBuf> {
    match write_result(config, strategy, result).await {
        Ok(path) => {
            info!("Results saved to {}", path.display());
            Some(path)
        }
        Err(err) => {
            error!("Failed to save {} results: {}", strategy, err);
            None
        }
    }
}
