//! Speech capture and synthesis sessions
//!
//! This module provides:
//! - `input`: one-attempt-at-a-time recognition with a bounded no-speech retry
//! - `output`: voiced replies with per-language voice selection
//! - `voice`: the voice catalog model and selection policy

pub mod input;
pub mod output;
pub mod voice;

pub use input::{
    CaptureError, CaptureEvent, CaptureId, CaptureVerdict, InputState, SpeechInput,
    SpeechInputSession,
};
pub use output::{
    SpeechOutcome, SpeechOutput, SpeechOutputSession, SpeechSettled, SynthesisError, Utterance,
    UtteranceId,
};
pub use voice::{select_voice, Voice, VoiceMatch, VoiceProfile, VoiceProfiles, VoiceSelection};
