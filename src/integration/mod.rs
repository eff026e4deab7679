//! Integration layer tying speech, video and replies into one conversation
//!
//! This module provides:
//! - `config`: file and builder configuration
//! - `commands`: built-in command and stop phrase detection
//! - `orchestrator`: the turn state machine and its handle

pub mod commands;
pub mod config;
pub mod orchestrator;

pub use commands::{detect_command, is_voice_stop_phrase, ChatCommand};
pub use config::IntegrationConfig;
pub use orchestrator::{
    Capabilities, Orchestrator, OrchestratorBuilder, OrchestratorCommand, OrchestratorEvent,
    OrchestratorHandle,
};
