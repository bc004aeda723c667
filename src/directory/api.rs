//! HTTP helpers for the directory's JSON endpoints with a fixed timeout policy
//! and consistent error mapping. Non-2xx statuses are always failures, whatever
//! the body contains. The optional API key is attached as a header and never
//! logged.

use super::{config::DirectoryConfig, errors::ApiError};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span};

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;
/// Header carrying the API key for services that require one.
const API_KEY_HEADER: &str = "x-api-key";

/// Shared reqwest client bound to one base URL.
#[derive(Clone, Debug)]
pub struct JsonApi {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl JsonApi {
    /// Builds the client with the crate user agent and configured timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is empty or the TLS backend
    /// cannot be initialized.
    pub fn new(config: &DirectoryConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("Base URL is required.".to_string()));
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `path` relative to the base URL and decodes the JSON body.
    ///
    /// # Errors
    /// Returns an `ApiError` on transport failures, timeouts, non-2xx statuses or
    /// bodies that do not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = build_url_with_base(&self.base_url, path);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret());
        }

        let span = info_span!("directory.get", http.method = "GET", url = %url);
        let response = request
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!(status = response.status().as_u16(), "response received");

        handle_json_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        ApiError::Config(format!("Invalid request: {err}"))
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        let body = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice::<T>(&body)
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
