//! HTTP transport seam.
//!
//! Providers never build their own client. They are handed an
//! [`HttpTransport`] at construction, which keeps process-wide state out of
//! the provider and lets tests substitute a scripted transport.

use crate::error::TransportError;
use async_trait::async_trait;
use url::Url;

/// A GET request issued by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self { url, headers: Vec::new() }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The URL without its query string, for errors and logs.
    ///
    /// Credentials travel in the query, so this is the only form that may be
    /// written anywhere.
    pub fn endpoint(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Executes requests on behalf of a provider.
///
/// An `Err` means the request never produced a response (connection, TLS,
/// timeout). Any status code, including errors, is a successful transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_query() {
        let url = Url::parse("https://api.github.com/user/orgs?access_token=t0k&limit=100").unwrap();
        let request = HttpRequest::get(url).header("Accept", "application/json");
        assert_eq!(request.endpoint(), "https://api.github.com/user/orgs");
        assert_eq!(request.headers, vec![("Accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(HttpResponse::new(200, "[]").is_ok());
        assert!(!HttpResponse::new(201, "").is_ok());
        assert!(!HttpResponse::new(404, "").is_ok());
    }
}
