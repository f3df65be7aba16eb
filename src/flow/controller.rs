//! Login flow orchestration.
//!
//! Drives login → token persistence → profile fetch and publishes
//! `FlowState` transitions via async channels. No direct stdout/stderr
//! writes occur in this module; failures go to the diagnostic log and the
//! flow ends silently.

use tracing::{debug, error};

use super::events::{FlowState, StateSender};
use crate::api::{ApiErrorKind, AuthClient};
use crate::store::{TokenStore, mask_token};

/// Orchestrates one login flow per submission.
///
/// Holds no mutable state of its own: each `submit` call runs an independent
/// flow, so concurrent submissions race and the consumer of the state channel
/// sees whichever terminal state arrives last.
pub struct LoginFlow {
    client: AuthClient,
    store: TokenStore,
}

impl LoginFlow {
    /// Creates a flow over an explicitly constructed client and store.
    pub fn new(client: AuthClient, store: TokenStore) -> Self {
        Self { client, store }
    }

    /// Runs one submission to a terminal state.
    ///
    /// The email is trimmed before the login call; the password passes
    /// through as entered. Every transition is published on `events` and the
    /// terminal state is also returned. This function never returns an
    /// error: failures are logged and end the flow silently.
    pub async fn submit(&self, email: &str, password: &str, events: &StateSender) -> FlowState {
        let email = email.trim();

        events.publish(FlowState::Authenticating).await;
        let token = match self.client.login(email, password).await {
            Ok(response) => response.access_token,
            Err(e) if e.kind == ApiErrorKind::Malformed => {
                error!("Login succeeded without a usable token: {e}");
                return fail(events).await;
            }
            Err(e) => {
                error!("Login failed: {e}");
                return fail(events).await;
            }
        };

        if let Err(e) = self.store.save(&token) {
            // Write failures are diagnostic only; the flow continues.
            error!("Failed to persist token: {e:#}");
        } else {
            debug!("Token saved: {}", mask_token(&token));
        }

        events.publish(FlowState::FetchingProfile).await;
        match self.client.me(&token).await {
            Ok(profile) => {
                debug!("Logged in as: {}", profile.email);
                let state = FlowState::Displayed {
                    email: profile.email,
                };
                events.publish(state.clone()).await;
                state
            }
            Err(e) => {
                // The token stays persisted; there is no rollback here.
                error!("Profile fetch failed: {e}");
                fail(events).await
            }
        }
    }
}

async fn fail(events: &StateSender) -> FlowState {
    events.publish(FlowState::Failed).await;
    FlowState::Failed
}
