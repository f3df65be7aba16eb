//! Login flow state types and channel plumbing.
//!
//! This module defines the contract for states published by the flow
//! controller. States are serializable for future JSON output mode support.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// States of one login flow, in transition order.
///
/// `Displayed` and `Failed` are terminal. A failed flow publishes no further
/// detail here: failures are diagnostic-log only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    /// Waiting for a submission.
    Idle,

    /// Login call in flight.
    Authenticating,

    /// Login succeeded and the token is persisted; profile call in flight.
    FetchingProfile,

    /// Terminal: profile email ready for display.
    Displayed { email: String },

    /// Terminal: the flow stopped after a logged failure.
    Failed,
}

impl FlowState {
    /// Returns true for the two terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Displayed { .. } | FlowState::Failed)
    }
}

/// Channel-based state sender (async, bounded).
pub type FlowStateTx = mpsc::Sender<FlowState>;

/// Channel-based state receiver (async, bounded).
pub type FlowStateRx = mpsc::Receiver<FlowState>;

/// Default channel capacity for state streams.
pub const DEFAULT_STATE_CHANNEL_CAPACITY: usize = 16;

/// Creates a bounded state channel with the default capacity.
pub fn create_state_channel() -> (FlowStateTx, FlowStateRx) {
    mpsc::channel(DEFAULT_STATE_CHANNEL_CAPACITY)
}

/// State sender wrapper.
///
/// A send to a dropped or saturated consumer must not wedge the flow, so
/// delivery errors are discarded.
#[derive(Clone)]
pub struct StateSender {
    tx: FlowStateTx,
}

impl StateSender {
    /// Creates a new `StateSender` wrapping the given channel sender.
    pub fn new(tx: FlowStateTx) -> Self {
        Self { tx }
    }

    /// Publishes a state transition; awaits delivery, ignores a gone
    /// consumer.
    pub async fn publish(&self, state: FlowState) {
        let _ = self.tx.send(state).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: serialized states use the snake_case tag.
    #[test]
    fn test_state_serialization_tag() {
        let json = serde_json::to_value(&FlowState::FetchingProfile).unwrap();
        assert_eq!(json, serde_json::json!({"state": "fetching_profile"}));

        let json = serde_json::to_value(&FlowState::Displayed {
            email: "user@test.com".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "displayed", "email": "user@test.com"})
        );
    }

    /// Test: only Displayed and Failed are terminal.
    #[test]
    fn test_terminal_states() {
        assert!(!FlowState::Idle.is_terminal());
        assert!(!FlowState::Authenticating.is_terminal());
        assert!(!FlowState::FetchingProfile.is_terminal());
        assert!(
            FlowState::Displayed {
                email: "user@test.com".to_string()
            }
            .is_terminal()
        );
        assert!(FlowState::Failed.is_terminal());
    }

    /// Test: publish does not error when the receiver is gone.
    #[tokio::test]
    async fn test_publish_to_dropped_receiver() {
        let (tx, rx) = create_state_channel();
        drop(rx);
        StateSender::new(tx).publish(FlowState::Failed).await;
    }
}
