//! Speech input session
//!
//! Drives one non-continuous capture attempt at a time against a host
//! [`SpeechInput`]. Attempts run as short tasks that post a [`CaptureEvent`]
//! back to the owner, who feeds it to [`SpeechInputSession::resolve`].
//!
//! The session never restarts itself after a result. Re-arming is the
//! orchestrator's decision; the only self-restart is the single bounded
//! retry after a `no-speech` timeout.

use crate::{Capability, ChatError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Recognition failures reported by the host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The capture window closed without any speech
    #[error("no-speech")]
    NoSpeech,

    #[error("aborted")]
    Aborted,

    /// Microphone permission denied
    #[error("not-allowed")]
    NotAllowed,

    #[error("audio-capture")]
    AudioCapture,

    #[error("network")]
    Network,

    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Host error code as shown to the user
    pub fn code(&self) -> &str {
        match self {
            CaptureError::NoSpeech => "no-speech",
            CaptureError::Aborted => "aborted",
            CaptureError::NotAllowed => "not-allowed",
            CaptureError::AudioCapture => "audio-capture",
            CaptureError::Network => "network",
            CaptureError::Other(code) => code,
        }
    }

    /// Only silence is worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::NoSpeech)
    }
}

/// Host microphone capture with recognition
#[async_trait]
pub trait SpeechInput: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    /// Run one capture attempt and return the final transcript
    async fn capture(&self) -> std::result::Result<String, CaptureError>;

    /// Abort the running attempt, if any
    fn abort(&self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputState {
    #[default]
    Idle,
    Listening,
}

/// Identifier of one capture attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CaptureId(u64);

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capture#{}", self.0)
    }
}

/// Raw result of a capture attempt, posted by the attempt task
#[derive(Clone, Debug)]
pub struct CaptureEvent {
    pub attempt: CaptureId,
    pub outcome: std::result::Result<String, CaptureError>,
}

/// What the owner should do with a resolved attempt
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureVerdict {
    /// A transcript was recognized
    Utterance(String),
    /// Silence; a single retry has been scheduled and the session is still listening
    Retry,
    /// Capture gave up; the session is idle
    Failed(ChatError),
}

pub struct SpeechInputSession {
    input: Arc<dyn SpeechInput>,
    retry_delay: Duration,
    event_tx: mpsc::UnboundedSender<CaptureEvent>,
    state: InputState,
    attempt: Option<(CaptureId, JoinHandle<()>)>,
    next_id: u64,
    retried: bool,
}

impl SpeechInputSession {
    pub fn new(
        input: Arc<dyn SpeechInput>,
        retry_delay: Duration,
        event_tx: mpsc::UnboundedSender<CaptureEvent>,
    ) -> Self {
        Self {
            input,
            retry_delay,
            event_tx,
            state: InputState::Idle,
            attempt: None,
            next_id: 1,
            retried: false,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.input.is_supported()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == InputState::Listening
    }

    /// Begin a capture attempt
    ///
    /// Starting while already listening keeps the running attempt.
    pub fn start(&mut self) -> Result<CaptureId> {
        if !self.input.is_supported() {
            return Err(ChatError::UnsupportedCapability(Capability::SpeechCapture));
        }
        if let Some((id, _)) = &self.attempt {
            debug!("Already listening on {}", id);
            return Ok(*id);
        }
        Ok(self.launch(Duration::ZERO))
    }

    /// Abort any attempt and return to idle; safe in every state
    pub fn stop(&mut self) {
        if let Some((id, task)) = self.attempt.take() {
            debug!("Stopping {}", id);
            task.abort();
            self.input.abort();
        }
        self.state = InputState::Idle;
    }

    /// Interpret an attempt result
    ///
    /// Returns `None` for results of attempts that were stopped or replaced.
    pub fn resolve(&mut self, event: CaptureEvent) -> Option<CaptureVerdict> {
        match &self.attempt {
            Some((id, _)) if *id == event.attempt => {}
            _ => {
                debug!("Discarding result of stale {}", event.attempt);
                return None;
            }
        }
        self.attempt = None;
        self.state = InputState::Idle;

        let verdict = match event.outcome {
            Ok(transcript) => {
                info!("Recognized: {}", transcript);
                self.retried = false;
                CaptureVerdict::Utterance(transcript)
            }
            Err(e) if e.is_transient() && !self.retried => {
                debug!("No speech on {}, retrying in {:?}", event.attempt, self.retry_delay);
                self.retried = true;
                self.launch(self.retry_delay);
                CaptureVerdict::Retry
            }
            Err(e) if e.is_transient() => {
                warn!("No speech twice in a row, giving up");
                self.retried = false;
                CaptureVerdict::Failed(ChatError::TransientCaptureError(e.code().to_string()))
            }
            Err(e) => {
                warn!("Speech recognition error: {}", e);
                self.retried = false;
                CaptureVerdict::Failed(ChatError::FatalCaptureError(e.code().to_string()))
            }
        };
        Some(verdict)
    }

    fn launch(&mut self, delay: Duration) -> CaptureId {
        let id = CaptureId(self.next_id);
        self.next_id += 1;

        let input = Arc::clone(&self.input);
        let tx = self.event_tx.clone();
        let task = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = input.capture().await;
            let _ = tx.send(CaptureEvent {
                attempt: id,
                outcome,
            });
        });

        debug!("Started {}", id);
        self.attempt = Some((id, task));
        self.state = InputState::Listening;
        id
    }
}

impl Drop for SpeechInputSession {
    fn drop(&mut self) {
        if let Some((_, task)) = self.attempt.take() {
            task.abort();
        }
    }
}
