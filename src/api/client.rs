//! HTTP client for the account service.

use reqwest::StatusCode;
use tracing::debug;

use super::errors::ApiError;
use super::types::{Profile, RegisterRequest, TokenResponse};

/// Default base URL for a local development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Account service client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl From<&crate::config::Config> for ApiConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self::new(config.base_url.clone())
    }
}

/// Account service API client.
///
/// Owns its `reqwest::Client`; construct one instance and pass it where it is
/// needed rather than reaching for a shared global.
pub struct AuthClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl AuthClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Registers a new account and returns the issued token.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable response body.
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = format!("{}/register", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest { email, password })
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        Self::decode_token(response).await
    }

    /// Exchanges credentials for a token via the password-grant convention.
    ///
    /// The body is form-encoded with the email under the `username` field,
    /// matching the service's login form.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable response body.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = format!("{}/login", self.config.base_url);
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", email)
            .append_pair("password", password)
            .finish();

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        Self::decode_token(response).await
    }

    /// Fetches the profile of the token's owner.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable response body. A 401/403 status is reported with the
    /// distinct `Auth` kind.
    pub async fn me(&self, token: &str) -> Result<Profile, ApiError> {
        let url = format!("{}/me", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(Self::classify_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::auth(status.as_u16(), &body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        debug!("Profile fetch succeeded");
        response
            .json()
            .await
            .map_err(|e| ApiError::malformed(format!("Failed to parse profile response: {e}")))
    }

    /// Checks the status, then decodes a token body.
    ///
    /// A 2xx body missing the token field surfaces as a malformed response.
    async fn decode_token(response: reqwest::Response) -> Result<TokenResponse, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::malformed(format!("Failed to parse token response: {e}")))
    }

    /// Classifies a reqwest error into an ApiError.
    fn classify_reqwest_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::transport(format!("Request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::transport(format!("Connection failed: {e}"))
        } else {
            ApiError::transport(format!("Network error: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: trailing slashes are trimmed from the base URL.
    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    /// Test: default config points at the local development server.
    #[test]
    fn test_default_config() {
        assert_eq!(ApiConfig::default().base_url, DEFAULT_BASE_URL);
    }

    /// Test: an ApiConfig builds from the loaded file config.
    #[test]
    fn test_config_from_file_config() {
        let file_config = crate::config::Config {
            base_url: "https://accounts.example.com/".to_string(),
        };
        let config = ApiConfig::from(&file_config);
        assert_eq!(config.base_url, "https://accounts.example.com");
    }
}
