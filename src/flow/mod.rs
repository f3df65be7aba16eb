//! Login flow controller: orchestration and state reporting.
//!
//! This module contains:
//! - `events`: the explicit flow state machine and channel plumbing
//! - `controller`: the submit → login → persist → profile orchestration

mod controller;
mod events;

pub use controller::LoginFlow;
pub use events::{
    DEFAULT_STATE_CHANNEL_CAPACITY, FlowState, FlowStateRx, FlowStateTx, StateSender,
    create_state_channel,
};
