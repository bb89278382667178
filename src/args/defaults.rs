pub(crate) const DEFAULT_USER_AGENT: &str = concat!("wavebench/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["wavebench.toml", "wavebench.json"];

pub(super) const DEFAULT_URL: &str =
    "http://universities.hipolabs.com/search?country=Russian+Federation";
pub(super) const DEFAULT_REQUESTS: &str = "100";
pub(super) const DEFAULT_WORKERS: &str = "10";
pub(super) const DEFAULT_ATTEMPTS: &str = "3";
pub(super) const DEFAULT_WAVES: &str = "5";
pub(super) const DEFAULT_TIMEOUT: &str = "10s";
pub(super) const DEFAULT_CONNECT_TIMEOUT: &str = "5s";
pub(super) const DEFAULT_BACKOFF_BASE: &str = "500ms";
pub(super) const DEFAULT_BACKOFF_MAX: &str = "10s";
pub(super) const DEFAULT_BACKOFF_JITTER: &str = "500ms";
pub(super) const DEFAULT_OUTPUT_DIR: &str = "results";
