use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;
use url::Url;

const HEAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe for resource URLs.
///
/// Implementations must never fail: anything short of a successful response
/// is reported as `false`.
pub trait LinkVerifier: Send + Sync {
    fn verify(&self, url: &str) -> impl Future<Output = bool> + Send;
}

/// HEAD-request verifier. One probe per call, no caching.
pub struct HttpVerifier {
    client: reqwest::Client,
}

impl HttpVerifier {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HEAD_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl LinkVerifier for HttpVerifier {
    async fn verify(&self, url: &str) -> bool {
        if !is_absolute_http_url(url) {
            debug!(url, "rejected: not an absolute http(s) url");
            return false;
        }

        match self.client.head(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                debug!(url, status = status.as_u16(), "verified");
                status.as_u16() < 400
            }
            Err(e) => {
                debug!(url, error = %e, "verification failed");
                false
            }
        }
    }
}

/// Accepts every syntactically valid URL without touching the network.
pub struct SyntaxOnlyVerifier;

impl LinkVerifier for SyntaxOnlyVerifier {
    async fn verify(&self, url: &str) -> bool {
        is_absolute_http_url(url)
    }
}

/// Scheme + host check, no I/O.
pub fn is_absolute_http_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

// ── Tests ──
