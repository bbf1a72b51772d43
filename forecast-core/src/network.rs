//! Generic HTTP request executor for the weather API.
//!
//! A request is described by an [`Endpoint`]; [`NetworkClient::request`]
//! performs exactly one attempt and maps every failure into [`NetworkError`].

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::NetworkError;

/// Scheme, host and API version prefix every endpoint path is appended to.
pub const API_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Everything but RFC 3986 unreserved characters is escaped in query parts.
const QUERY_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Description of a single API call.
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl Endpoint {
    pub fn get(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Full URL for this endpoint under `base_url`, with percent-encoded query.
    ///
    /// Returns `None` when the path is empty or the URL cannot be built.
    pub fn url(&self, base_url: &str) -> Option<Url> {
        if self.path.is_empty() {
            warn!("endpoint path is empty");
            return None;
        }

        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(err) => {
                warn!(url = %raw, query = ?self.query, error = %err, "failed to build URL");
                return None;
            }
        };

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(name, value)| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(name, QUERY_ENCODE_SET),
                        utf8_percent_encode(value, QUERY_ENCODE_SET)
                    )
                })
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }

        Some(url)
    }
}

#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: Client,
    base_url: String,
}

impl NetworkClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, ...).
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self { http, base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute `endpoint` once and decode the JSON body into `T`.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, NetworkError> {
        let url = endpoint.url(&self.base_url).ok_or(NetworkError::BadUrl)?;
        debug!(method = ?endpoint.method, path = %endpoint.path, "sending request");

        let mut builder = self.http.request(endpoint.method.into(), url);
        for (name, value) in &endpoint.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &endpoint.body {
            builder = builder.json(body);
        }

        let res = builder.send().await.map_err(NetworkError::UnknownError)?;

        let status = res.status();
        if !status.is_success() {
            return Err(NetworkError::ServerError(status.as_u16()));
        }

        let body = res.bytes().await.map_err(|err| {
            debug!(error = %err, "failed to read response body");
            NetworkError::InvalidResponse
        })?;

        serde_json::from_slice(&body).map_err(NetworkError::DecodingError)
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}
