//! Voice-enabled chat core
//!
//! Coordinates speech capture, speech synthesis and a looping avatar video
//! around a conversational turn cycle. Host media features and the reply
//! backend are pluggable traits; see [`integration::Orchestrator`].

pub mod avatar;
pub mod error;
pub mod host;
pub mod integration;
pub mod language;
pub mod messages;
pub mod provider;
pub mod speech;
pub mod state;
pub mod utils;

pub use error::{Capability, ChatError, Result};
pub use integration::{
    Capabilities, IntegrationConfig, Orchestrator, OrchestratorBuilder, OrchestratorCommand,
    OrchestratorEvent, OrchestratorHandle,
};
pub use language::{detect, LanguageTag};
pub use messages::{MessageStorage, MessageStore, Role, Turn};
pub use provider::{Reply, ReplyRequest, ResponseProvider};
pub use state::{SessionSnapshot, SessionState, SharedSessionState, TurnPhase};
