//! Transport abstraction for SOAP clients.
//!
//! A SOAP client builds envelopes and parses responses; the actual network
//! exchange goes through a [`Transport`]. Implementations perform exactly one
//! HTTP exchange per call: [`Transport::open`] fetches a resource with GET
//! (typically WSDL retrieval) and [`Transport::send`] posts a SOAP envelope
//! and returns the raw reply.
//!
//! The types here are deliberately plain data: the SOAP layer owns envelope
//! construction and XML handling, the transport owns nothing but the wire
//! exchange.

mod error;

pub use error::TransportError;

use std::collections::HashMap;
use std::io::Cursor;

/// Outbound request handed to a transport.
#[derive(Debug, Clone)]
pub struct Request {
    /// Target URL.
    pub url: String,
    /// Message body, used only by [`Transport::send`].
    pub message: Option<Vec<u8>>,
    /// Request headers, used only by [`Transport::send`].
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Request for a GET-style fetch; only the URL is used.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: None,
            headers: HashMap::new(),
        }
    }

    /// Request for a SOAP POST exchange carrying `message` as the body.
    pub fn post(url: impl Into<String>, message: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            message: Some(message.into()),
            headers: HashMap::new(),
        }
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Normalized success result of a [`Transport::send`] exchange.
///
/// The status code is reported as received, including error statuses when the
/// reply carries a SOAP fault body; fault handling belongs to the caller.
#[derive(Debug, Clone)]
pub struct Reply {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// The network seam of a SOAP client.
///
/// Each call is a single independent request/response exchange: exactly one
/// success value or one [`TransportError`], never partial outcomes.
/// Implementations hold whatever connection state they need (typically a
/// pooled HTTP session) and no cross-call state beyond it.
pub trait Transport {
    /// Fetch the resource at `request.url` with an HTTP GET.
    ///
    /// Returns a readable stream over the full response body. A failure
    /// status (4xx/5xx) is always an error here.
    fn open(&self, request: &Request) -> Result<Cursor<Vec<u8>>, TransportError>;

    /// Perform a SOAP POST exchange with `request.message` and
    /// `request.headers`.
    ///
    /// Replies whose content-type marks them as SOAP XML are returned as-is
    /// regardless of status, so SOAP faults reach the caller's fault handling
    /// as data instead of being raised as transport errors.
    fn send(&self, request: &Request) -> Result<Reply, TransportError>;
}
