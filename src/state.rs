//! Session state for the interaction orchestrator
//!
//! The orchestrator is the only writer. Everyone else (UI, tests, the demo
//! console) reads copies through [`SharedSessionState::snapshot`].
//!
//! The invariant the transitions protect is that `listening` and `speaking`
//! are never both true, so the capture device cannot pick up our own voice.

use crate::language::LanguageTag;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Where the conversation is in its turn cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPhase {
    /// Ready for a new submission
    #[default]
    Idle,
    /// Waiting for the response provider
    AwaitingReply,
    /// Voicing a reply or a diagnostic sentence
    Responding,
}

impl TurnPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, TurnPhase::Idle)
    }

    /// A turn is in flight while awaiting or voicing a reply
    pub fn is_in_flight(&self) -> bool {
        !self.is_idle()
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Idle => write!(f, "Idle"),
            TurnPhase::AwaitingReply => write!(f, "AwaitingReply"),
            TurnPhase::Responding => write!(f, "Responding"),
        }
    }
}

/// Live state of one orchestrator instance
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// Turn cycle phase
    pub phase: TurnPhase,
    /// A capture attempt is running (or waiting out its retry delay)
    pub listening: bool,
    /// A reply request is outstanding
    pub processing: bool,
    /// An utterance is being voiced
    pub speaking: bool,
    /// The avatar video is playing
    pub video_playing: bool,
    /// Language of the most recent submission or reply
    pub current_language: LanguageTag,
    /// Hands-free mode: re-arm capture whenever the conversation settles
    pub listening_enabled: bool,
    /// Replies are voiced
    pub audio_enabled: bool,
    /// Replies are mirrored by the avatar video
    pub video_enabled: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl SessionState {
    pub fn new(audio_enabled: bool, video_enabled: bool) -> Self {
        Self {
            phase: TurnPhase::Idle,
            listening: false,
            processing: false,
            speaking: false,
            video_playing: false,
            current_language: LanguageTag::En,
            listening_enabled: false,
            audio_enabled,
            video_enabled,
        }
    }

    /// Create an immutable snapshot of current state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            listening: self.listening,
            processing: self.processing,
            speaking: self.speaking,
            video_playing: self.video_playing,
            current_language: self.current_language,
            listening_enabled: self.listening_enabled,
            audio_enabled: self.audio_enabled,
            video_enabled: self.video_enabled,
        }
    }

    /// Check that capture and playback do not overlap
    pub fn invariant_holds(&self) -> bool {
        !(self.listening && self.speaking)
    }

    /// The single guard for (re)starting capture
    pub fn may_listen(&self) -> bool {
        self.listening_enabled && self.phase.is_idle() && !self.speaking && !self.listening
    }

    // === State transitions ===

    /// Submission accepted, reply requested
    pub fn begin_turn(&mut self, language: LanguageTag) {
        self.phase = TurnPhase::AwaitingReply;
        self.processing = true;
        self.listening = false;
        self.current_language = language;
    }

    /// Reply (or diagnostic sentence) about to be voiced
    pub fn begin_response(&mut self, language: LanguageTag) {
        self.phase = TurnPhase::Responding;
        self.processing = false;
        self.current_language = language;
    }

    /// Turn cycle complete, ready for input
    pub fn finish_turn(&mut self) {
        self.phase = TurnPhase::Idle;
        self.processing = false;
    }

    pub fn capture_started(&mut self) {
        debug_assert!(!self.speaking, "capture started while speaking");
        self.listening = true;
    }

    pub fn capture_ended(&mut self) {
        self.listening = false;
    }

    pub fn speech_started(&mut self) {
        debug_assert!(!self.listening, "speech started while listening");
        self.speaking = true;
    }

    pub fn speech_settled(&mut self) {
        self.speaking = false;
    }

    /// Return to a quiet idle state, keeping user preferences
    pub fn reset(&mut self) {
        self.phase = TurnPhase::Idle;
        self.listening = false;
        self.processing = false;
        self.speaking = false;
        self.video_playing = false;
        self.listening_enabled = false;
    }
}

/// Immutable snapshot of session state
///
/// Cheap to copy; used for event emission and lock-free reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase: TurnPhase,
    pub listening: bool,
    pub processing: bool,
    pub speaking: bool,
    pub video_playing: bool,
    pub current_language: LanguageTag,
    pub listening_enabled: bool,
    pub audio_enabled: bool,
    pub video_enabled: bool,
}

impl SessionSnapshot {
    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }
}

/// Thread-safe shared session state
///
/// Writes are crate-private so only the orchestrator can mutate it.
#[derive(Clone, Debug)]
pub struct SharedSessionState {
    inner: Arc<RwLock<SessionState>>,
}

impl Default for SharedSessionState {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl SharedSessionState {
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, SessionState> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> parking_lot::RwLockWriteGuard<'_, SessionState> {
        self.inner.write()
    }

    /// Get a snapshot of current state (no lock held after return)
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().snapshot()
    }

    pub fn phase(&self) -> TurnPhase {
        self.inner.read().phase
    }

    pub fn is_listening(&self) -> bool {
        self.inner.read().listening
    }

    pub fn is_speaking(&self) -> bool {
        self.inner.read().speaking
    }

    pub fn is_idle(&self) -> bool {
        self.inner.read().phase.is_idle()
    }
}
