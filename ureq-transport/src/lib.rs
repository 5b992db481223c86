//! ureq-backed [`Transport`] for SOAP clients.
//!
//! Bridges the `soap_transport` abstraction to a pooled blocking
//! [`ureq::Agent`], so SOAP exchanges get connection reuse, timeouts, and
//! proxy support from ureq instead of a bespoke HTTP layer. The whole crate
//! is an adapter: two request dispatches plus a translation of ureq failures
//! into [`TransportError`].

use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::time::Duration;

use soap_transport::{Reply, Request, Transport, TransportError};
use tracing::debug;

/// Content types that mark a failure-status reply as a SOAP payload rather
/// than a transport failure. Matched against the raw header value, so
/// parameterized forms like `text/xml; charset=utf-8` do not match.
const SOAP_CONTENT_TYPES: [&str; 2] = ["text/xml", "application/soap+xml"];

const ERROR_PREFIX: &str = "Error in ureq";

/// [`Transport`] implementation backed by a reusable [`ureq::Agent`].
///
/// The agent is the only persistent state: it owns the connection pool and
/// any proxy/TLS configuration, and is never mutated after construction
/// beyond pool growth inside ureq. Cloning shares the pool. The agent is
/// thread-safe, so one transport may serve concurrent callers; no locking is
/// added here, no retries are performed, and the only cancellation is the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl UreqTransport {
    /// Transport with a fresh agent and default timeouts (5s connect, 10s
    /// read).
    pub fn new() -> Self {
        Self::with_agent(
            ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        )
    }

    /// Transport over a caller-configured agent (proxy, TLS, pool sizing).
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            timeout: None,
        }
    }

    /// Bound each individual call by an overall timeout.
    ///
    /// Expiry surfaces as a [`TransportError`] with status `0`, like any
    /// other failure where no response was received.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn apply_timeout(&self, request: ureq::Request) -> ureq::Request {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn open(&self, request: &Request) -> Result<Cursor<Vec<u8>>, TransportError> {
        debug!(url = %request.url, "transport open");
        let response = self
            .apply_timeout(self.agent.get(&request.url))
            .call()
            .map_err(translate)?;
        debug!(status = response.status(), "transport open complete");
        Ok(Cursor::new(read_body(response)?))
    }

    fn send(&self, request: &Request) -> Result<Reply, TransportError> {
        debug!(url = %request.url, "transport send");
        let mut builder = self.apply_timeout(self.agent.post(&request.url));
        for (name, value) in &request.headers {
            builder = builder.set(name, value);
        }
        let message = request.message.as_deref().unwrap_or_default();
        let response = match builder.send_bytes(message) {
            Ok(response) => response,
            // A failure status carrying a SOAP content-type is a fault
            // payload, handed back as a normal reply for the caller's fault
            // handling.
            Err(ureq::Error::Status(_, response)) if is_soap_content_type(&response) => response,
            Err(err) => return Err(translate(err)),
        };
        debug!(status = response.status(), "transport send complete");
        into_reply(response)
    }
}

fn is_soap_content_type(response: &ureq::Response) -> bool {
    response
        .header("content-type")
        .is_some_and(|value| SOAP_CONTENT_TYPES.contains(&value))
}

fn into_reply(response: ureq::Response) -> Result<Reply, TransportError> {
    let status = response.status();
    let headers = header_map(&response);
    let body = read_body(response)?;
    Ok(Reply {
        status,
        headers,
        body,
    })
}

fn header_map(response: &ureq::Response) -> HashMap<String, String> {
    response
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            let value = response.header(&name)?.to_string();
            Some((name, value))
        })
        .collect()
}

fn read_body(response: ureq::Response) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|err| TransportError::network(trace_message(&err)))?;
    Ok(body)
}

/// Cross-cutting translation of ureq failures into the SOAP error type,
/// applied by both operations.
///
/// `Error::Status` means a response was received: the error keeps its real
/// status code and the captured body. `Error::Transport` means no response
/// ever existed, which maps to the `0` status sentinel with no body. ureq has
/// no other failure kinds at this seam, so nothing else is caught.
fn translate(err: ureq::Error) -> TransportError {
    let message = trace_message(&err);
    match err {
        ureq::Error::Status(status, response) => {
            let mut body = Vec::new();
            // Keep whatever bytes were readable; the status is still the
            // useful part of this error.
            let _ = response.into_reader().read_to_end(&mut body);
            TransportError::http(message, status, body)
        }
        ureq::Error::Transport(_) => TransportError::network(message),
    }
}

fn trace_message(err: &dyn std::error::Error) -> String {
    format!("{ERROR_PREFIX}\n{err}\n{}", Backtrace::force_capture())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn canned_response(content_type: Option<&str>, status: u16, body: &str) -> ureq::Response {
        let header = content_type
            .map(|value| format!("Content-Type: {value}\r\n"))
            .unwrap_or_default();
        format!("HTTP/1.1 {status} STATUS\r\n{header}\r\n{body}")
            .parse()
            .unwrap()
    }

    #[rstest]
    #[case(Some("text/xml"), true)]
    #[case(Some("application/soap+xml"), true)]
    #[case(Some("text/xml; charset=utf-8"), false)]
    #[case(Some("text/plain"), false)]
    #[case(None, false)]
    fn test_soap_content_type_matching(#[case] content_type: Option<&str>, #[case] soap: bool) {
        let response = canned_response(content_type, 200, "<Response/>");
        assert_eq!(is_soap_content_type(&response), soap);
    }

    #[test]
    fn test_into_reply_maps_status_headers_and_body() {
        let response = canned_response(Some("text/xml"), 200, "<Response/>");
        let reply = into_reply(response).unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.headers.get("content-type").map(String::as_str),
            Some("text/xml")
        );
        assert_eq!(reply.body, b"<Response/>");
    }

    #[test]
    fn test_trace_message_keeps_prefix_and_error_text() {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let message = trace_message(&err);
        assert!(message.starts_with("Error in ureq\n"));
        assert!(message.contains("refused"));
    }
}
