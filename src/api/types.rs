//! Wire types for the account service API.

use serde::{Deserialize, Serialize};

/// JSON body for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token issued by `/register` and `/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token to present on authenticated calls
    pub access_token: String,
    /// Token scheme; the service always issues "bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response body for `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
}
