//! HTTP clients for the Attio and Apollo REST APIs.
//!
//! Both clients are synchronous (`ureq`) and are called from async contexts
//! through the `spawn_blocking` wrappers in [`async_wrapper`]. They share the
//! error mapping, URL building and request timing defined here.

mod apollo;
mod async_wrapper;
mod attio;

pub use apollo::ApolloClient;
pub use async_wrapper::{AsyncApolloClient, AsyncApolloClientImpl, AsyncAttioClient, AsyncAttioClientImpl};
pub use attio::AttioClient;

use crate::error::{ApiError, ApiResult};
use crate::metrics::Metrics;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Build a ureq agent with the configured timeout.
fn build_agent(timeout_secs: u64) -> Arc<ureq::Agent> {
    Arc::new(
        ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build(),
    )
}

/// Join a base URL and a path with exactly one slash.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Percent-encode one path segment so ids cannot add path, query or
/// fragment components.
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// Run a request, recording its duration and outcome.
fn timed<F>(metrics: &Metrics, method: &str, url: &str, send: F) -> ApiResult<ureq::Response>
where
    F: FnOnce() -> Result<ureq::Response, ureq::Error>,
{
    let start = Instant::now();
    let result = send().map_err(map_error);
    let duration = start.elapsed();

    match &result {
        Ok(response) => {
            tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
            metrics.record_http_request(duration);
        }
        Err(e) => {
            tracing::error!("{} {} - Error: {}", method, url, e);
            metrics.record_http_error();
            metrics.record_http_request(duration);
        }
    }

    result
}

/// Read a response body and parse it as JSON.
fn parse_body<T: DeserializeOwned>(response: ureq::Response) -> ApiResult<T> {
    let body = response
        .into_string()
        .map_err(|e| ApiError::HttpError(e.to_string()))?;
    serde_json::from_str(&body).map_err(ApiError::JsonError)
}

/// Map a ureq error to an ApiError, keeping the response body as the message.
fn map_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 => ApiError::Unauthorized(message),
                404 => ApiError::NotFound(message),
                429 => ApiError::RateLimitExceeded,
                _ => ApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => match transport.kind() {
            ureq::ErrorKind::ConnectionFailed => {
                ApiError::HttpError("Connection failed".to_string())
            }
            ureq::ErrorKind::Io if is_timeout(&transport) => ApiError::Timeout,
            _ => ApiError::HttpError(transport.to_string()),
        },
    }
}

/// Whether an I/O transport error was a read or connect timeout.
fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|e| {
            matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("https://api.attio.com/v2/", "/objects/people/records/1"),
            "https://api.attio.com/v2/objects/people/records/1"
        );
        assert_eq!(
            build_url("https://api.apollo.io/api/v1", "contacts"),
            "https://api.apollo.io/api/v1/contacts"
        );
    }

    #[test]
    fn test_read_timeout_maps_to_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/slow", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(800));
            drop(stream);
        });

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(200))
            .build();
        let error = agent.get(&url).call().unwrap_err();
        server.join().unwrap();

        assert!(matches!(map_error(error), ApiError::Timeout));
    }

    #[test]
    fn test_closed_connection_is_not_a_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/closed", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let error = ureq::get(&url).call().unwrap_err();
        server.join().unwrap();

        assert!(matches!(map_error(error), ApiError::HttpError(_)));
    }

    #[test]
    fn test_segment_encodes_url_delimiters() {
        assert_eq!(segment("64b0000000000000000000ff"), "64b0000000000000000000ff");
        assert_eq!(segment("abc#x"), "abc%23x");
        assert_eq!(segment("abc?x=1"), "abc%3Fx%3D1");
        assert_eq!(segment("../admin"), "..%2Fadmin");
    }
}
