//! Error types for the avatar chat core
//!
//! Every variant is recovered at the orchestrator boundary and surfaced to the
//! user as a system turn built from [`ChatError::user_message`].

use std::fmt;
use thiserror::Error;

/// Optional host-provided media features
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Microphone capture with speech recognition
    SpeechCapture,
    /// Text-to-voice synthesis
    SpeechSynthesis,
    /// The looping avatar video
    VideoPlayback,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::SpeechCapture => write!(f, "speech capture"),
            Capability::SpeechSynthesis => write!(f, "speech synthesis"),
            Capability::VideoPlayback => write!(f, "video playback"),
        }
    }
}

/// Avatar chat errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The host has no implementation of a media capability
    #[error("Unsupported capability: {0}")]
    UnsupportedCapability(Capability),

    /// Capture ended without usable speech (retried once)
    #[error("Transient capture error: {0}")]
    TransientCaptureError(String),

    /// Any other recognition failure
    #[error("Capture error: {0}")]
    FatalCaptureError(String),

    /// Video or audio failed to start or to finish
    #[error("{media} error: {reason}")]
    PlaybackError { media: Capability, reason: String },

    /// The response provider returned an error
    #[error("Response provider failure: {0}")]
    ProviderFailure(String),

    /// The response provider did not answer in time
    #[error("Response provider timed out after {0} ms")]
    ProviderTimeout(u64),

    /// The host never populated its voice catalog
    #[error("Voice catalog not ready after {0} ms")]
    VoiceCatalogTimeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Channel communication error
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for ChatError {
    fn from(e: std::io::Error) -> Self {
        ChatError::IOError(e.to_string())
    }
}

impl ChatError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the conversation running with the feature
    /// intact; the others disable a feature or need user intervention.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Feature is switched off for the rest of the session
            ChatError::UnsupportedCapability(_) => false,
            ChatError::TransientCaptureError(_) => true,
            // Listening is disabled until the user asks again
            ChatError::FatalCaptureError(_) => false,
            ChatError::PlaybackError { .. } => true,
            ChatError::ProviderFailure(_) => true,
            ChatError::ProviderTimeout(_) => true,
            ChatError::VoiceCatalogTimeout(_) => true,
            ChatError::ConfigError(_) => false,
            ChatError::ChannelError(_) => false,
            ChatError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    ///
    /// This is the text of the system turn appended to the conversation.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::UnsupportedCapability(Capability::SpeechCapture) => {
                "Speech recognition is not supported in this environment.".to_string()
            }
            ChatError::UnsupportedCapability(Capability::SpeechSynthesis) => {
                "Text-to-speech is not supported in this environment. Replies will be shown as text."
                    .to_string()
            }
            ChatError::UnsupportedCapability(Capability::VideoPlayback) => {
                "Video playback is not available. Continuing without the avatar.".to_string()
            }
            ChatError::TransientCaptureError(_) => {
                "No speech was detected. Voice input has been paused.".to_string()
            }
            ChatError::FatalCaptureError(code) => format!("Speech recognition error: {}", code),
            ChatError::PlaybackError {
                media: Capability::VideoPlayback,
                reason,
            } => format!("Error loading video: {}", reason),
            ChatError::PlaybackError { .. } => {
                "Text-to-speech failed. Response will be shown as text.".to_string()
            }
            ChatError::ProviderFailure(_) | ChatError::ProviderTimeout(_) => {
                "Sorry, I encountered an error processing your request.".to_string()
            }
            ChatError::VoiceCatalogTimeout(_) => {
                "No synthesis voices were found. Using the default voice.".to_string()
            }
            ChatError::ConfigError(_) => "Configuration error. Please check settings.".to_string(),
            ChatError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            ChatError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

/// Result type alias for avatar chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::SpeechCapture.to_string(), "speech capture");
        assert_eq!(Capability::VideoPlayback.to_string(), "video playback");
    }

    #[test]
    fn test_provider_errors_share_user_message() {
        let failure = ChatError::ProviderFailure("503".into());
        let timeout = ChatError::ProviderTimeout(30_000);
        assert_eq!(failure.user_message(), timeout.user_message());
        assert!(failure.is_recoverable());
        assert!(timeout.is_recoverable());
    }

    #[test]
    fn test_capture_error_messages() {
        let fatal = ChatError::FatalCaptureError("not-allowed".into());
        assert_eq!(fatal.user_message(), "Speech recognition error: not-allowed");
        assert!(!fatal.is_recoverable());

        let transient = ChatError::TransientCaptureError("no-speech".into());
        assert!(transient.is_recoverable());
    }

    #[test]
    fn test_playback_error_depends_on_media() {
        let video = ChatError::PlaybackError {
            media: Capability::VideoPlayback,
            reason: "404".into(),
        };
        assert_eq!(video.user_message(), "Error loading video: 404");
        assert_eq!(video.to_string(), "video playback error: 404");

        let audio = ChatError::PlaybackError {
            media: Capability::SpeechSynthesis,
            reason: "device lost".into(),
        };
        assert!(audio.user_message().starts_with("Text-to-speech failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ChatError = io.into();
        assert!(matches!(err, ChatError::IOError(_)));
        assert!(!err.is_recoverable());
    }
}
