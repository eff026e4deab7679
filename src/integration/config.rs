//! Configuration for the integration layer
//!
//! One TOML file (or the defaults) configures media preferences, timeouts
//! and the per-language voice table.

use crate::speech::VoiceProfiles;
use crate::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the interaction orchestrator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Voice replies aloud
    pub audio_enabled: bool,

    /// Mirror voiced replies with the avatar video
    pub video_enabled: bool,

    /// Enter hands-free listening as soon as the orchestrator starts
    pub listen_on_start: bool,

    /// Avatar video resource
    pub video_source: String,

    /// System turn appended at start, if any
    pub greeting: Option<String>,

    /// Deadline for one response provider call
    pub reply_timeout_ms: u64,

    /// Deadline for the host voice catalog to populate
    pub voice_catalog_timeout_ms: u64,

    /// Pause before the single retry after a no-speech timeout
    pub no_speech_retry_delay_ms: u64,

    /// Pause between a settled turn and re-arming capture
    pub rearm_delay_ms: u64,

    /// Deadline for the avatar video to start playing
    pub video_start_timeout_ms: u64,

    /// How long the standalone video test plays
    pub video_test_duration_ms: u64,

    /// UI event channel capacity
    pub event_buffer_size: usize,

    /// Rate, pitch and persona per language
    pub voices: VoiceProfiles,
}

pub const DEFAULT_GREETING: &str = "Welcome! Ask me anything. You can also ask questions in Hindi / आप हिंदी में भी प्रश्न पूछ सकते हैं!";

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            video_enabled: true,
            listen_on_start: false,
            video_source: "./avatar.mp4".to_string(),
            greeting: Some(DEFAULT_GREETING.to_string()),
            reply_timeout_ms: 30_000,
            voice_catalog_timeout_ms: 5_000,
            no_speech_retry_delay_ms: 100,
            rearm_delay_ms: 500,
            video_start_timeout_ms: 2_000,
            video_test_duration_ms: 5_000,
            event_buffer_size: 100,
            voices: VoiceProfiles::default(),
        }
    }
}

impl IntegrationConfig {
    /// Disable voiced replies (text-only mode)
    pub fn without_audio_output(mut self) -> Self {
        self.audio_enabled = false;
        self
    }

    /// Disable the avatar video
    pub fn without_video(mut self) -> Self {
        self.video_enabled = false;
        self
    }

    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    /// Start in hands-free listening mode
    pub fn with_listening(mut self) -> Self {
        self.listen_on_start = true;
        self
    }

    pub fn with_video_source(mut self, source: impl Into<String>) -> Self {
        self.video_source = source.into();
        self
    }

    pub fn with_reply_timeout_ms(mut self, timeout: u64) -> Self {
        self.reply_timeout_ms = timeout;
        self
    }

    pub fn with_rearm_delay_ms(mut self, delay: u64) -> Self {
        self.rearm_delay_ms = delay;
        self
    }

    pub fn with_voices(mut self, voices: VoiceProfiles) -> Self {
        self.voices = voices;
        self
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    pub fn voice_catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.voice_catalog_timeout_ms)
    }

    pub fn no_speech_retry_delay(&self) -> Duration {
        Duration::from_millis(self.no_speech_retry_delay_ms)
    }

    pub fn rearm_delay(&self) -> Duration {
        Duration::from_millis(self.rearm_delay_ms)
    }

    pub fn video_start_timeout(&self) -> Duration {
        Duration::from_millis(self.video_start_timeout_ms)
    }

    pub fn video_test_duration(&self) -> Duration {
        Duration::from_millis(self.video_test_duration_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.reply_timeout_ms == 0 {
            return Err(ChatError::ConfigError(
                "reply_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.voice_catalog_timeout_ms == 0 {
            return Err(ChatError::ConfigError(
                "voice_catalog_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.event_buffer_size == 0 {
            return Err(ChatError::ConfigError(
                "event_buffer_size must be greater than zero".to_string(),
            ));
        }
        if self.video_enabled && self.video_source.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "video_source is required when video is enabled".to_string(),
            ));
        }
        for (language, profile) in self.voices.iter() {
            if !(0.1..=10.0).contains(&profile.rate) {
                return Err(ChatError::ConfigError(format!(
                    "voice rate for {} out of range: {}",
                    language, profile.rate
                )));
            }
            if !(0.0..=2.0).contains(&profile.pitch) {
                return Err(ChatError::ConfigError(format!(
                    "voice pitch for {} out of range: {}",
                    language, profile.pitch
                )));
            }
        }
        Ok(())
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChatError::IOError(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ChatError::ConfigError(msg) => {
                ChatError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: IntegrationConfig =
            toml::from_str(content).map_err(|e| ChatError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/avatar-chat/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("avatar-chat").join("config.toml"))
    }

    /// Load the given file, else the default file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load(default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
