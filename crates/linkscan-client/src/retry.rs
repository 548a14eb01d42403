//! Backoff policy for scanning-service calls.
//!
//! Only transport failures that may clear on their own (refused
//! connections, timeouts) are retried. Responses of any status go back to
//! the caller untouched, and so do errors raised while building the request.

use std::future::Future;
use std::time::Duration;

use tracing::Instrument;

use crate::error::ScanServiceError;

/// How many times, and how patiently, a failed send is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each later one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Three retries, 200 ms apart and doubling.
    pub(crate) const DEFAULT: Self = Self {
        max_retries: 3,
        base_delay: Duration::from_millis(200),
    };

    /// Delay before retry number `retry`, counting from zero.
    fn delay(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Run `send` under `policy`, inside a span naming `endpoint`.
///
/// The last transport error is returned as [`ScanServiceError::Http`].
pub(crate) async fn send_with_retry<F, Fut>(
    policy: RetryPolicy,
    endpoint: &str,
    send: F,
) -> Result<reqwest::Response, ScanServiceError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let span = tracing::debug_span!("scan_service_call", endpoint);
    async {
        let mut retry = 0;
        loop {
            match send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if retry < policy.max_retries && is_transient(&e) => {
                    let delay = policy.delay(retry);
                    retry += 1;
                    tracing::warn!(
                        retry,
                        max_retries = policy.max_retries,
                        ?delay,
                        error = %e,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(source) => {
                    return Err(ScanServiceError::Http {
                        endpoint: endpoint.to_string(),
                        source,
                    })
                }
            }
        }
    }
    .instrument(span)
    .await
}
