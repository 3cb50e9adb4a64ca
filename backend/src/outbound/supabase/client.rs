//! Shared reqwest plumbing for the Supabase adapters.
//!
//! Owns transport details only: endpoint resolution, the `apikey` and bearer
//! headers, timeout mapping and decoding of error payloads into
//! [`BackendError`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::dto::ErrorBodyDto;
use crate::domain::{AccessToken, BackendError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a Supabase project.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: Url,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: Url, anon_key: impl Into<String>) -> Self {
        Self {
            url,
            anon_key: Zeroizing::new(anon_key.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Response that reached us with a success status.
pub(super) struct SuccessResponse {
    pub(super) headers: HeaderMap,
    pub(super) body: Vec<u8>,
}

impl SuccessResponse {
    pub(super) fn json<T: DeserializeOwned>(&self, what: &str) -> Result<T, BackendError> {
        serde_json::from_slice(&self.body)
            .map_err(|error| BackendError::decode(format!("invalid {what} payload: {error}")))
    }
}

/// Reqwest client bound to one Supabase project.
pub struct SupabaseClient {
    pub(super) http: Client,
    base: Url,
    anon_key: Zeroizing<String>,
}

impl SupabaseClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base: with_trailing_slash(config.url),
            anon_key: config.anon_key,
        })
    }

    /// Resolve `path` (no leading slash) against the project URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|error| BackendError::transport(format!("invalid endpoint {path}: {error}")))
    }

    /// Attach the project key, and the user's token when present; requests
    /// without a user token authenticate as the anon role.
    pub(super) fn authorize(
        &self,
        request: RequestBuilder,
        token: Option<&AccessToken>,
    ) -> RequestBuilder {
        let bearer = token.map_or(self.anon_key.as_str(), AccessToken::expose);
        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }

    /// Send `request`, mapping transport failures and error statuses.
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<SuccessResponse, BackendError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(SuccessResponse {
            headers,
            body: body.to_vec(),
        })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(error.to_string())
    } else {
        BackendError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> BackendError {
    let preview = body_preview(body);
    let fallback = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    serde_json::from_slice::<ErrorBodyDto>(body)
        .unwrap_or_default()
        .into_backend_error(status.as_u16(), fallback)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Total row count from a PostgREST `Content-Range` header (`0-24/42` or
/// `*/42`).
pub(super) fn content_range_total(headers: &HeaderMap) -> Result<u64, BackendError> {
    let raw = headers
        .get(reqwest::header::CONTENT_RANGE)
        .map(HeaderValue::to_str)
        .transpose()
        .map_err(|error| BackendError::decode(format!("unreadable Content-Range: {error}")))?
        .ok_or_else(|| BackendError::decode("count response has no Content-Range header"))?;
    raw.rsplit_once('/')
        .and_then(|(_, total)| total.parse().ok())
        .ok_or_else(|| BackendError::decode(format!("Content-Range '{raw}' has no total")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Supabase helpers.

    use super::*;
    use crate::domain::{BackendErrorKind, ErrorCode, classify_backend_error};
    use rstest::rstest;

    fn client(url: &str) -> SupabaseClient {
        let url = Url::parse(url).expect("valid url");
        SupabaseClient::new(SupabaseConfig::new(url, "anon")).expect("client builds")
    }

    #[rstest]
    #[case("https://abc.supabase.co")]
    #[case("https://abc.supabase.co/")]
    #[case("http://localhost:54321/")]
    fn endpoints_join_under_the_project_url(#[case] base: &str) {
        let endpoint = client(base)
            .endpoint("rest/v1/clients")
            .expect("endpoint");
        assert!(endpoint.as_str().ends_with("/rest/v1/clients"));
        assert!(!endpoint.as_str().contains("//rest"));
    }

    #[rstest]
    fn self_hosted_path_prefix_is_kept() {
        let endpoint = client("https://example.test/supabase")
            .endpoint("auth/v1/user")
            .expect("endpoint");
        assert_eq!(endpoint.as_str(), "https://example.test/supabase/auth/v1/user");
    }

    #[rstest]
    #[case(StatusCode::CONFLICT, r#"{"code":"23505","message":"duplicate"}"#, ErrorCode::Conflict)]
    #[case(StatusCode::NOT_ACCEPTABLE, r#"{"code":"PGRST116","message":"no rows"}"#, ErrorCode::NotFound)]
    #[case(StatusCode::UNAUTHORIZED, r#"{"code":"PGRST301","message":"JWT expired"}"#, ErrorCode::Unauthorized)]
    #[case(StatusCode::TOO_MANY_REQUESTS, "slow down", ErrorCode::RateLimited)]
    #[case(StatusCode::BAD_GATEWAY, "<html>upstream</html>", ErrorCode::Unknown)]
    fn status_errors_classify_through_the_taxonomy(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: ErrorCode,
    ) {
        let error = map_status_error(status, body.as_bytes());
        assert_eq!(error.kind(), BackendErrorKind::Api);
        assert_eq!(classify_backend_error(&error), expected);
    }

    #[rstest]
    fn non_json_bodies_are_previewed() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"  bad\n  gateway ");
        assert_eq!(error.message(), "status 502: bad gateway");
    }

    #[rstest]
    #[case("0-24/42", 42)]
    #[case("*/0", 0)]
    fn reads_total_from_content_range(#[case] value: &str, #[case] expected: u64) {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_RANGE,
            HeaderValue::from_str(value).expect("header"),
        );
        assert_eq!(content_range_total(&headers).expect("total"), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("0-24/*"))]
    fn missing_or_unknown_totals_are_decode_errors(#[case] value: Option<&str>) {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(
                reqwest::header::CONTENT_RANGE,
                HeaderValue::from_str(value).expect("header"),
            );
        }
        let error = content_range_total(&headers).expect_err("no total");
        assert_eq!(error.kind(), BackendErrorKind::Decode);
    }
}
