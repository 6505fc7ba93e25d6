//! Conversation with the coaching agents
//!
//! [`message`] holds the transcript types and [`controller`] runs turns
//! against the agent service.

pub mod controller;
pub mod message;

pub use controller::{ChatController, Rejection, TurnOutcome, TurnState};
pub use message::{Author, ChatMessage, MessageIdGenerator, Transcript};
