use super::test_support::ScriptedFetcher;
use super::*;
use crate::args::PositiveUsize;
use crate::scheduler::{Outcome, RequestToken, RunCounters};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn attempts(value: usize) -> Result<PositiveUsize, String> {
    PositiveUsize::try_from(value).map_err(|err| err.to_string())
}

fn driver_with(fetcher: Arc<ScriptedFetcher>, local_attempts: usize) -> Result<RequestDriver, String> {
    Ok(RequestDriver::new(
        fetcher,
        DriverConfig {
            attempts: attempts(local_attempts)?,
            backoff: BackoffPolicy::none(),
        },
        Arc::new(RunCounters::new()),
    ))
}

/// Serves a single fixed response to every connection.
async fn spawn_status_server(response: &'static [u8]) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buffer = [0u8; 1024];
                if stream.read(&mut buffer).await.is_err() {
                    return;
                }
                drop(stream.write_all(response).await);
                drop(stream.shutdown().await);
            });
        }
    });
    Ok(format!("http://{}/search", addr))
}

/// Sends `head` and then holds the connection open for `hold` without
/// finishing the body.
async fn spawn_stalling_server(head: &'static [u8], hold: Duration) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buffer = [0u8; 1024];
                if stream.read(&mut buffer).await.is_err() {
                    return;
                }
                if stream.write_all(head).await.is_err() {
                    return;
                }
                drop(stream.flush().await);
                tokio::time::sleep(hold).await;
                drop(stream.shutdown().await);
            });
        }
    });
    Ok(format!("http://{}/search", addr))
}

const STALLED_HEAD: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n[";

fn client_with_timeout(request_timeout: Duration) -> Result<reqwest::Client, String> {
    build_client(&ClientSettings {
        request_timeout,
        connect_timeout: Duration::from_secs(2),
        keep_alive: false,
    })
    .map_err(|err| err.to_string())
}

fn test_client() -> Result<reqwest::Client, String> {
    client_with_timeout(Duration::from_secs(5))
}

#[test]
fn backoff_base_delay_doubles_until_cap() -> Result<(), String> {
    let policy = BackoffPolicy::new(
        Duration::from_millis(500),
        Duration::from_secs(3),
        Duration::ZERO,
    );
    let expected = [
        (1, Duration::from_millis(500)),
        (2, Duration::from_secs(1)),
        (3, Duration::from_secs(2)),
        (4, Duration::from_secs(3)),
        (40, Duration::from_secs(3)),
    ];
    for (attempt, delay) in expected {
        let actual = policy.base_delay(attempt);
        if actual != delay {
            return Err(format!(
                "attempt {}: expected {:?}, got {:?}",
                attempt, delay, actual
            ));
        }
    }
    Ok(())
}

#[test]
fn backoff_jitter_stays_within_bounds() -> Result<(), String> {
    let policy = BackoffPolicy::new(
        Duration::from_millis(100),
        Duration::from_secs(10),
        Duration::from_millis(50),
    );
    let mut rng = StdRng::seed_from_u64(7);
    for attempt in 1..=5 {
        let base = policy.base_delay(attempt);
        for _ in 0..100 {
            let delay = policy.delay(attempt, &mut rng);
            if delay < base || delay > base.saturating_add(Duration::from_millis(50)) {
                return Err(format!(
                    "delay {:?} out of range for attempt {}",
                    delay, attempt
                ));
            }
        }
    }
    Ok(())
}

#[test]
fn backoff_none_never_sleeps() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(1);
    let policy = BackoffPolicy::none();
    for attempt in 1..=10 {
        if !policy.delay(attempt, &mut rng).is_zero() {
            return Err(format!("expected zero delay for attempt {}", attempt));
        }
    }
    Ok(())
}

#[test]
fn driver_succeeds_without_retrying() -> Result<(), String> {
    run_async_test(async {
        let fetcher = Arc::new(ScriptedFetcher::always_ok());
        let driver = driver_with(Arc::clone(&fetcher), 3)?;

        let outcome = driver.drive(RequestToken::new(1)).await;
        if outcome != Outcome::Success {
            return Err("Expected success".to_owned());
        }
        if fetcher.calls(1) != 1 {
            return Err(format!("Expected one fetch, got {}", fetcher.calls(1)));
        }
        let counters = driver.counters().snapshot();
        if counters.successful != 1 || counters.failed != 0 {
            return Err(format!("Unexpected counters: {:?}", counters));
        }
        Ok(())
    })
}

#[test]
fn driver_recovers_within_local_budget() -> Result<(), String> {
    run_async_test(async {
        let fetcher = Arc::new(ScriptedFetcher::always_ok().failing(4, 2));
        let driver = driver_with(Arc::clone(&fetcher), 3)?;

        let outcome = driver.drive(RequestToken::new(4)).await;
        if outcome != Outcome::Success {
            return Err("Expected success on third attempt".to_owned());
        }
        if fetcher.calls(4) != 3 {
            return Err(format!("Expected three fetches, got {}", fetcher.calls(4)));
        }
        Ok(())
    })
}

#[test]
fn driver_reports_failure_after_exhausting_attempts() -> Result<(), String> {
    run_async_test(async {
        let fetcher = Arc::new(ScriptedFetcher::always_ok().always_failing(9));
        let driver = driver_with(Arc::clone(&fetcher), 3)?;

        let outcome = driver.drive(RequestToken::new(9)).await;
        if outcome != Outcome::Failure {
            return Err("Expected failure".to_owned());
        }
        if fetcher.calls(9) != 3 {
            return Err(format!("Expected three fetches, got {}", fetcher.calls(9)));
        }
        let counters = driver.counters().snapshot();
        if counters.successful != 0 || counters.failed != 1 {
            return Err(format!("Unexpected counters: {:?}", counters));
        }
        Ok(())
    })
}

#[test]
fn driver_sleeps_between_attempts() -> Result<(), String> {
    run_async_test(async {
        let fetcher = Arc::new(ScriptedFetcher::always_ok().always_failing(2));
        let driver = RequestDriver::new(
            Arc::clone(&fetcher) as Arc<dyn Fetcher>,
            DriverConfig {
                attempts: attempts(3)?,
                backoff: BackoffPolicy::new(
                    Duration::from_millis(20),
                    Duration::from_secs(1),
                    Duration::ZERO,
                ),
            },
            Arc::new(RunCounters::new()),
        );

        let started = std::time::Instant::now();
        let outcome = driver.drive(RequestToken::new(2)).await;
        let elapsed = started.elapsed();
        if outcome != Outcome::Failure {
            return Err("Expected failure".to_owned());
        }
        // 20ms after the first failure, 40ms after the second, none after the last.
        if elapsed < Duration::from_millis(60) {
            return Err(format!("Expected at least 60ms of backoff, got {:?}", elapsed));
        }
        Ok(())
    })
}

#[test]
fn parse_target_url_rejects_non_http() -> Result<(), String> {
    if parse_target_url("ftp://example.com/file").is_ok() {
        return Err("Expected ftp scheme to be rejected".to_owned());
    }
    if parse_target_url("not a url").is_ok() {
        return Err("Expected malformed url to be rejected".to_owned());
    }
    parse_target_url("https://example.com/search?country=Russian+Federation")
        .map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn http_fetcher_classifies_success() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_status_server(
            b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        )
        .await?;
        let fetcher = HttpFetcher::new(
            test_client()?,
            parse_target_url(&url).map_err(|err| err.to_string())?,
        );
        let outcome = fetcher.fetch(RequestToken::new(1)).await;
        if outcome != (FetchOutcome::Ok { status: 200 }) {
            return Err(format!("Unexpected outcome: {}", outcome));
        }
        Ok(())
    })
}

#[test]
fn http_fetcher_classifies_server_error() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_status_server(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await?;
        let fetcher = HttpFetcher::new(
            test_client()?,
            parse_target_url(&url).map_err(|err| err.to_string())?,
        );
        let outcome = fetcher.fetch(RequestToken::new(1)).await;
        if outcome != (FetchOutcome::Status { status: 503 }) {
            return Err(format!("Unexpected outcome: {}", outcome));
        }
        if outcome.is_success() {
            return Err("503 must not count as success".to_owned());
        }
        Ok(())
    })
}

#[test]
fn http_fetcher_reports_connection_refused() -> Result<(), String> {
    run_async_test(async {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|err| format!("bind failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("local_addr failed: {}", err))?;
        drop(listener);

        let fetcher = HttpFetcher::new(
            test_client()?,
            parse_target_url(&format!("http://{}/", addr)).map_err(|err| err.to_string())?,
        );
        let outcome = fetcher.fetch(RequestToken::new(1)).await;
        if outcome.is_success() {
            return Err("Expected a failed fetch against a closed port".to_owned());
        }
        Ok(())
    })
}

#[test]
fn http_fetcher_reports_timeout_on_stalled_body() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stalling_server(STALLED_HEAD, Duration::from_secs(5)).await?;
        let fetcher = HttpFetcher::new(
            client_with_timeout(Duration::from_millis(300))?,
            parse_target_url(&url).map_err(|err| err.to_string())?,
        );
        let outcome = fetcher.fetch(RequestToken::new(1)).await;
        if outcome != FetchOutcome::Timeout {
            return Err(format!("Expected a timeout, got {}", outcome));
        }
        if outcome.is_success() {
            return Err("A timed out request must not count as success".to_owned());
        }
        Ok(())
    })
}

#[test]
fn http_fetcher_treats_truncated_body_as_failure() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stalling_server(STALLED_HEAD, Duration::ZERO).await?;
        let fetcher = HttpFetcher::new(
            test_client()?,
            parse_target_url(&url).map_err(|err| err.to_string())?,
        );
        let outcome = fetcher.fetch(RequestToken::new(1)).await;
        if !matches!(outcome, FetchOutcome::Transport { .. }) {
            return Err(format!("Expected a transport error, got {}", outcome));
        }
        Ok(())
    })
}

#[test]
fn driver_counts_timed_out_token_as_failed() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stalling_server(STALLED_HEAD, Duration::from_secs(5)).await?;
        let fetcher = HttpFetcher::new(
            client_with_timeout(Duration::from_millis(200))?,
            parse_target_url(&url).map_err(|err| err.to_string())?,
        );
        let driver = RequestDriver::new(
            Arc::new(fetcher),
            DriverConfig {
                attempts: attempts(2)?,
                backoff: BackoffPolicy::none(),
            },
            Arc::new(RunCounters::new()),
        );

        let started = std::time::Instant::now();
        let outcome = driver.drive(RequestToken::new(7)).await;
        if outcome != Outcome::Failure {
            return Err("Expected the timed out token to fail".to_owned());
        }
        // Two attempts, each bounded by the 200ms request timeout.
        if started.elapsed() < Duration::from_millis(400) {
            return Err(format!(
                "Expected both attempts to run, finished in {:?}",
                started.elapsed()
            ));
        }
        let counters = driver.counters().snapshot();
        if counters.successful != 0 || counters.failed != 1 {
            return Err(format!("Unexpected counters: {:?}", counters));
        }
        Ok(())
    })
}
