use reqwest::blocking::Client;
use reqwest::Method;
use tracing::warn;
use url::Url;

use crate::error::{Result, ZaimError};

/// A fully built, signed HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response: status code and body text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a signed request and returns whatever the server answered.
///
/// Implementations return `ZaimError::Network` when no response was
/// received; any HTTP status, including errors, is a successful send.
/// Once a status is known, a body that cannot be read is returned empty.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(ZaimError::network)?;
        let status = response.status().as_u16();
        // A status arrived, so a broken body must not hide it
        let body = response.text().unwrap_or_else(|e| {
            warn!(status, error = %e, "failed to read response body");
            String::new()
        });

        Ok(HttpResponse { status, body })
    }
}
