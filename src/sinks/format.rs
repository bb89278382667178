use serde::Serialize;

use crate::args::ReportFormat;
use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::AggregateResult;

const JSON_INDENT: &[u8] = b"    ";

/// Encodes a result as human-readable UTF-8 text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_result(result: &AggregateResult, format: ReportFormat) -> AppResult<String> {
    match format {
        ReportFormat::Json => render_json(result),
        ReportFormat::Toml => toml::to_string_pretty(result)
            .map_err(|err| AppError::sink(SinkError::SerializeToml { source: err })),
    }
}

fn render_json(result: &AggregateResult) -> AppResult<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    result
        .serialize(&mut serializer)
        .map_err(|err| AppError::sink(SinkError::SerializeJson { source: err }))?;
    buffer.push(b'\n');
    String::from_utf8(buffer).map_err(|err| AppError::sink(SinkError::Utf8 { source: err }))
}
