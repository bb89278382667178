use std::time::Duration;

use reqwest::{Client, Url};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

#[derive(Debug, Clone, Copy)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Reuse idle connections between requests.
    pub keep_alive: bool,
}

/// Parses and validates the benchmark target.
///
/// # Errors
///
/// Returns an error when the URL is malformed or not http/https.
pub fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::http(HttpError::UnsupportedScheme {
            scheme: other.to_owned(),
        })),
    }
}

/// Builds the client shared by every worker of a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or resolver cannot be initialized.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    let mut builder = Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT);

    if !settings.keep_alive {
        builder = builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
