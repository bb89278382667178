use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode, Url};

use crate::scheduler::RequestToken;

/// Result of a single GET attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok { status: u16 },
    Status { status: u16 },
    Timeout,
    Transport { message: String },
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Ok { .. })
    }

    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            FetchOutcome::Ok {
                status: status.as_u16(),
            }
        } else {
            FetchOutcome::Status {
                status: status.as_u16(),
            }
        }
    }

    fn from_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchOutcome::Timeout
        } else {
            FetchOutcome::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl std::fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchOutcome::Ok { status } => write!(f, "HTTP {}", status),
            FetchOutcome::Status { status } => write!(f, "unexpected HTTP status {}", status),
            FetchOutcome::Timeout => f.write_str("request timed out"),
            FetchOutcome::Transport { message } => write!(f, "transport error: {}", message),
        }
    }
}

/// Performs one GET against the benchmark target.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, token: RequestToken) -> FetchOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    #[must_use]
    pub const fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, _token: RequestToken) -> FetchOutcome {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                match drain_response_body(response).await {
                    Ok(_) => FetchOutcome::from_status(status),
                    Err(err) => FetchOutcome::from_error(&err),
                }
            }
            Err(err) => FetchOutcome::from_error(&err),
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
