/* src/fetch.rs */

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{MyIpError, Result};

/// Build the async transport. The `User-Agent` is attached per request by
/// [`fetch`], so this and a caller-supplied client behave the same.
pub(crate) fn build_client(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| MyIpError::ClientBuild(error_chain(&e)))
}

/// Build the blocking transport.
pub(crate) fn build_blocking_client(config: &ClientConfig) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| MyIpError::ClientBuild(error_chain(&e)))
}

/// Issue one GET and return the body of a 2xx response.
///
/// `user_agent` replaces any default `User-Agent` the transport carries, so
/// the request has exactly one.
pub(crate) async fn fetch(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<String> {
    check_timeout(timeout)?;
    debug!(url, ?timeout, "sending request");

    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify(url, timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        debug!(url, status = status.as_u16(), "non-success status");
        return Err(MyIpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify(url, timeout, e))?;
    debug!(url, bytes = body.len(), "response received");
    Ok(body)
}

/// Blocking counterpart of [`fetch`].
pub(crate) fn fetch_blocking(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<String> {
    check_timeout(timeout)?;
    debug!(url, ?timeout, "sending request");

    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .timeout(timeout)
        .send()
        .map_err(|e| classify(url, timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        debug!(url, status = status.as_u16(), "non-success status");
        return Err(MyIpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(|e| classify(url, timeout, e))?;
    debug!(url, bytes = body.len(), "response received");
    Ok(body)
}

/// Wrap a body decode failure with the URL it came from.
pub(crate) fn decode_error(url: &str, reason: String) -> MyIpError {
    MyIpError::Decode {
        url: url.to_string(),
        reason,
    }
}

fn check_timeout(timeout: Duration) -> Result<()> {
    if timeout.is_zero() {
        return Err(MyIpError::InvalidTimeout(timeout));
    }
    Ok(())
}

fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> MyIpError {
    let url = url.to_string();

    if err.is_timeout() {
        MyIpError::Timeout { url, timeout }
    } else if let Some(status) = err.status() {
        MyIpError::Status {
            url,
            status: status.as_u16(),
        }
    } else if err.is_decode() {
        MyIpError::Decode {
            url,
            reason: error_chain(&err),
        }
    } else {
        MyIpError::Connection {
            url,
            timeout,
            reason: error_chain(&err),
        }
    }
}

/// Render an error with its sources, `outer: inner: root`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixtureServer, unused_base_url};
    use axum::{Router, http::StatusCode, routing::get};

    const AGENT: &str = "myip-foo/test";

    fn fixture() -> FixtureServer {
        FixtureServer::start(
            Router::new()
                .route("/ok", get(|| async { "hello" }))
                .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
                .route(
                    "/slow",
                    get(|| async {
                        tokio::time::sleep(Duration::from_secs(10)).await;
                        "late"
                    }),
                ),
        )
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = fixture();
        let client = build_client(&ClientConfig::default()).unwrap();

        let body = fetch(&client, &server.url("/ok"), Duration::from_secs(5), AGENT)
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let server = fixture();
        let client = build_client(&ClientConfig::default()).unwrap();
        let url = server.url("/missing");

        let err = fetch(&client, &url, Duration::from_secs(5), AGENT).await.unwrap_err();
        assert_eq!(err, MyIpError::Status { url, status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = fixture();
        let client = build_client(&ClientConfig::default()).unwrap();
        let timeout = Duration::from_millis(200);

        let err = fetch(&client, &server.url("/slow"), timeout, AGENT).await.unwrap_err();
        assert_eq!(
            err,
            MyIpError::Timeout {
                url: server.url("/slow"),
                timeout
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = build_client(&ClientConfig::default()).unwrap();
        let url = format!("{}/ok", unused_base_url());

        let timeout = Duration::from_secs(5);

        let err = fetch(&client, &url, timeout, AGENT).await.unwrap_err();
        assert!(matches!(err, MyIpError::Connection { .. }), "{err:?}");
        assert_eq!(err.timeout(), Some(timeout));
    }

    #[tokio::test]
    async fn test_fetch_rejects_zero_timeout() {
        let client = build_client(&ClientConfig::default()).unwrap();

        let err = fetch(&client, "http://127.0.0.1:9/ok", Duration::ZERO, AGENT)
            .await
            .unwrap_err();
        assert_eq!(err, MyIpError::InvalidTimeout(Duration::ZERO));
    }

    #[test]
    fn test_fetch_blocking_status_and_success() {
        let server = fixture();
        let client = build_blocking_client(&ClientConfig::default()).unwrap();

        let body = fetch_blocking(&client, &server.url("/ok"), Duration::from_secs(5), AGENT).unwrap();
        assert_eq!(body, "hello");

        let err = fetch_blocking(&client, &server.url("/missing"), Duration::from_secs(5), AGENT)
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_fetch_blocking_timeout() {
        let server = fixture();
        let client = build_blocking_client(&ClientConfig::default()).unwrap();

        let err = fetch_blocking(&client, &server.url("/slow"), Duration::from_millis(200), AGENT)
            .unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
    }
}
