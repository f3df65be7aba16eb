//! Account service API client.
//!
//! Three calls: `register` (JSON body), `login` (form-encoded password
//! grant), and `me` (bearer-authenticated profile fetch). Responses are JSON.

mod client;
mod errors;
mod types;

pub use client::{ApiConfig, AuthClient, DEFAULT_BASE_URL};
pub use errors::{ApiError, ApiErrorKind};
pub use types::{Profile, RegisterRequest, TokenResponse};
