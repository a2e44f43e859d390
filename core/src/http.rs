//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O with whatever transport it already owns. This separation
//! keeps the core deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! between the host and the client.

/// HTTP method for a request.
///
/// The directory API is read-only apart from the profile form POST, so only
/// the two methods in use are represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `DirectoryClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`. Headers must be forwarded verbatim — they carry the
/// session cookie on credentialed clients.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `DirectoryClient::parse_*` methods for validation and deserialization.
/// Response headers matter here: parsing rejects responses that do not
/// declare a JSON content type, so the caller must copy at least the
/// `Content-Type` header through.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Value of the first header matching `name`, compared
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
