//! Outbound request descriptors.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::error::Result;

/// A fully built API request: method, URL, headers and optional JSON body.
///
/// Built by [`StatusClient`](crate::StatusClient) and handed back to it for
/// sending, so the exact request can be inspected before anything goes over
/// the wire.
#[derive(Debug, Clone)]
pub struct StatusRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl StatusRequest {
    pub(crate) fn get(url: String, headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            url,
            headers,
            body: None,
        }
    }

    pub(crate) fn post_json<B: Serialize>(
        url: String,
        mut headers: HeaderMap,
        body: &B,
    ) -> Result<Self> {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            method: Method::POST,
            url,
            headers,
            body: Some(serde_json::to_vec(body)?),
        })
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers, including authorization.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Method, String, HeaderMap, Option<Vec<u8>>) {
        (self.method, self.url, self.headers, self.body)
    }
}
