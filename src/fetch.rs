//! HTTP fetch of remote dumps.

use std::time::Duration;

use crate::error::{LoadError, Result};

/// Options merged into the HTTP fetch of a dump URL.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Overall request timeout. None means the client default (no timeout).
    pub timeout: Option<Duration>,
    /// Extra request headers, appended in order.
    pub headers: Vec<(String, String)>,
}

/// Fetch a URL as raw text.
///
/// The body is returned untouched; the dump parser decides what it means.
/// Non-2xx statuses are failures. No retry is attempted.
///
/// # Errors
///
/// Returns `Fetch` on connection failure, timeout, or error status.
pub async fn fetch_text(url: &str, opts: &FetchOptions) -> Result<String> {
    let fetch_err = |source: reqwest::Error| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = opts.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(fetch_err)?;

    let mut request = client.get(url);
    for (name, value) in &opts.headers {
        request = request.header(name, value);
    }

    tracing::debug!(url, "fetching dump");
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_err)?;

    response.text().await.map_err(fetch_err)
}
