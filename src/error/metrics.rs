use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to read process CPU time: {source}")]
    CpuTime {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read resident memory from {path}: {source}")]
    ReadRss {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed resident memory record: '{content}'")]
    MalformedRss { content: String },
    #[error("System page size is unavailable.")]
    PageSizeUnavailable,
    #[error("Resident memory sampling is not supported on this platform.")]
    RssUnsupported,
}
