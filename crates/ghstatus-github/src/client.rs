//! GitHub commit status API client.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::request::StatusRequest;
use crate::types::{CombinedStatus, CreateStatus, CreatedStatus};

/// Body and status code of a successful response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Parse the body as JSON.
    ///
    /// # Errors
    /// Returns error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// GitHub commit status API client.
///
/// Every call is a single attempt; there is no retry or backoff.
pub struct StatusClient {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
    user_agent: HeaderValue,
}

impl StatusClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Default user agent.
    pub const DEFAULT_USER_AGENT: &'static str = "github-status";

    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client with a custom API URL (GitHub Enterprise, tests).
    ///
    /// # Errors
    /// Returns error if the token or user agent is not a valid header value,
    /// or the HTTP client cannot be built.
    pub fn with_base_url(
        auth: &Auth,
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&auth.bearer())
            .map_err(|_| Error::InvalidHeader { name: "Authorization" })?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| Error::InvalidHeader { name: "User-Agent" })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
            user_agent,
        })
    }

    /// Headers sent with every request.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers
    }

    // === Request construction ===

    /// Build the request for the combined status of `sha`.
    #[must_use]
    pub fn combined_status_request(&self, owner: &str, repo: &str, sha: &str) -> StatusRequest {
        let url = format!("{}/repos/{owner}/{repo}/commits/{sha}/status", self.base_url);
        StatusRequest::get(url, self.headers())
    }

    /// Build the request that creates a status on `sha`.
    ///
    /// # Errors
    /// Returns error if the body cannot be serialized.
    pub fn create_status_request(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CreateStatus,
    ) -> Result<StatusRequest> {
        let url = format!("{}/repos/{owner}/{repo}/statuses/{sha}", self.base_url);
        StatusRequest::post_json(url, self.headers(), status)
    }

    // === Transport ===

    /// Send a request once.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-2xx response.
    pub async fn send(&self, request: StatusRequest) -> Result<RawResponse> {
        let (method, url, headers, body) = request.into_parts();
        debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if status.is_success() {
            let body = response.bytes().await?.to_vec();
            return Ok(RawResponse {
                status: status.as_u16(),
                body,
            });
        }

        // Handle error responses
        let status_code = status.as_u16();

        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Status operations ===

    /// Get the combined status for a commit.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is malformed.
    pub async fn get_combined_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CombinedStatus> {
        let request = self.combined_status_request(owner, repo, sha);
        self.send(request).await?.json()
    }

    /// Create a status on a commit.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is malformed.
    pub async fn create_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CreateStatus,
    ) -> Result<CreatedStatus> {
        let request = self.create_status_request(owner, repo, sha, status)?;
        self.send(request).await?.json()
    }
}

impl std::fmt::Debug for StatusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::StatusState;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SHA: &str = "2a6edbf2a3c6a1c0e2d7c5d0e56b8b3f0c4d1e7a";

    fn client(base_url: &str) -> StatusClient {
        StatusClient::with_base_url(
            &Auth::from("ghp_test_token"),
            base_url,
            "status-test",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn good_job(target_url: Option<&str>) -> CreateStatus {
        CreateStatus {
            state: StatusState::Success,
            description: "Good Job".into(),
            target_url: target_url.map(String::from),
            context: "ci".into(),
        }
    }

    #[test]
    fn test_combined_status_request_shape() {
        let request = client("https://api.example.com/").combined_status_request("acme", "widget", SHA);

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url(),
            format!("https://api.example.com/repos/acme/widget/commits/{SHA}/status")
        );
        assert_eq!(request.headers()[ACCEPT], "application/vnd.github+json");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer ghp_test_token");
        assert!(request.headers()[AUTHORIZATION].is_sensitive());
        assert_eq!(request.headers()[USER_AGENT], "status-test");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_create_status_request_shape() {
        let request = client("https://api.example.com")
            .create_status_request("acme", "widget", SHA, &good_job(Some("http://x")))
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url(),
            format!("https://api.example.com/repos/acme/widget/statuses/{SHA}")
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/json"
        );
        let body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"state": "success", "description": "Good Job", "target_url": "http://x", "context": "ci"})
        );
    }

    #[test]
    fn test_create_status_request_is_deterministic() {
        let c = client("https://api.example.com");
        let status = good_job(None);
        let first = c.create_status_request("acme", "widget", SHA, &status).unwrap();
        let second = c.create_status_request("acme", "widget", SHA, &status).unwrap();
        assert_eq!(first.body(), second.body());
    }

    #[test]
    fn test_invalid_token_header_rejected() {
        let result = StatusClient::with_base_url(
            &Auth::from("bad\ntoken"),
            StatusClient::DEFAULT_API_URL,
            StatusClient::DEFAULT_USER_AGENT,
            StatusClient::DEFAULT_TIMEOUT,
        );
        assert!(matches!(
            result,
            Err(Error::InvalidHeader { name: "Authorization" })
        ));
    }

    #[tokio::test]
    async fn test_get_combined_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/acme/widget/commits/{SHA}/status")))
            .and(header("authorization", "Bearer ghp_test_token"))
            .and(header("user-agent", "status-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "state": "success",
                "repository": {"full_name": "acme/widget"},
                "sha": SHA,
                "statuses": [
                    {"state": "success", "context": "ci/x", "description": "ok", "target_url": "http://x"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await
            .unwrap();

        assert_eq!(status.state, "success");
        assert_eq!(status.sha, SHA);
        assert_eq!(status.statuses.len(), 1);
        assert_eq!(status.statuses[0].target_url.as_deref(), Some("http://x"));
    }

    #[tokio::test]
    async fn test_create_status_without_target_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/repos/acme/widget/statuses/{SHA}")))
            .and(body_json(json!({"state": "success", "description": "Good Job", "context": "ci"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "url": format!("https://api.github.com/repos/acme/widget/statuses/{SHA}"),
                "state": "success",
                "description": "Good Job",
                "target_url": null,
                "context": "ci"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client(&server.uri())
            .create_status("acme", "widget", SHA, &good_job(None))
            .await
            .unwrap();

        assert_eq!(created.context, "ci");
        assert_eq!(created.target_url, None);
    }

    #[tokio::test]
    async fn test_send_returns_raw_body_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let c = client(&server.uri());
        let raw = c
            .send(c.combined_status_request("acme", "widget", SHA))
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
        assert_eq!(raw.body, b"{}");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await;
        assert!(matches!(result, Err(Error::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_rate_limit_detected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "0"))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await;
        assert!(matches!(result, Err(Error::RateLimited)));
    }

    #[tokio::test]
    async fn test_not_found_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await;
        match result {
            Err(Error::ApiError { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("Not Found"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "success"})))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_create_response_without_target_url_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "url": format!("https://api.github.com/repos/acme/widget/statuses/{SHA}"),
                "state": "success",
                "description": "Good Job",
                "context": "ci"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .create_status("acme", "widget", SHA, &good_job(None))
            .await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_status_entry_without_description_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "state": "success",
                "repository": {"full_name": "acme/widget"},
                "sha": SHA,
                "statuses": [{"state": "success", "context": "ci/x", "target_url": "http://x"}]
            })))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .get_combined_status("acme", "widget", SHA)
            .await;
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let result = client("http://127.0.0.1:9")
            .get_combined_status("acme", "widget", SHA)
            .await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
