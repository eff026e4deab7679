//! Speech output session
//!
//! Wraps a host [`SpeechOutput`] with voice selection, per-language tuning
//! and one-at-a-time utterance discipline:
//!
//! - Reserving a new utterance cancels the one in flight.
//! - The first utterance waits (bounded) for the host voice catalog; the
//!   catalog is cached afterwards. After a timeout later utterances only
//!   pick up a catalog that is already available, they never wait again.
//! - Each current utterance reports exactly one [`SpeechSettled`] on the
//!   completion channel. Superseded utterances report nothing.
//! - A superseded utterance drops its host `speak` future, so it stops even
//!   when the host missed the cancel signal.

use crate::language::LanguageTag;
use crate::speech::voice::{select_voice, Voice, VoiceProfiles};
use crate::ChatError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Notify, OnceCell};
use tracing::{debug, info, warn};

/// Identifier of one `speak` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance#{}", self.0)
    }
}

/// Fully resolved request handed to the host synthesizer
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    /// Locale requested from the synthesizer ("hi-IN")
    pub locale: String,
    /// Chosen voice, `None` for the platform default
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
}

/// Host synthesis failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// Playback was cancelled before it finished
    #[error("utterance interrupted")]
    Interrupted,

    #[error("synthesis failed: {0}")]
    Failed(String),
}

/// Host text-to-voice capability
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    /// Resolves once the host voice catalog is populated
    async fn voices(&self) -> Vec<Voice>;

    /// Voice one utterance; resolves when playback ends, fails or is cancelled
    async fn speak(&self, utterance: Utterance) -> Result<(), SynthesisError>;

    /// Cancel whatever is currently being voiced
    fn cancel(&self);
}

/// How an utterance ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechOutcome {
    Completed,
    /// Cancelled by the host or by another client of the synthesizer
    Interrupted,
    Failed(String),
    Unsupported,
}

impl SpeechOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SpeechOutcome::Completed)
    }
}

/// Completion notification for the current utterance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechSettled {
    pub utterance: UtteranceId,
    pub outcome: SpeechOutcome,
    /// Voiced with the platform default because the catalog never arrived
    pub catalog_timed_out: bool,
}

pub struct SpeechOutputSession {
    output: Arc<dyn SpeechOutput>,
    profiles: VoiceProfiles,
    catalog: OnceCell<Vec<Voice>>,
    catalog_timeout: Duration,
    catalog_missed: AtomicBool,
    next_id: AtomicU64,
    in_flight: Mutex<Option<UtteranceId>>,
    superseded: Notify,
    settled_tx: Option<mpsc::UnboundedSender<SpeechSettled>>,
}

impl SpeechOutputSession {
    pub fn new(
        output: Arc<dyn SpeechOutput>,
        profiles: VoiceProfiles,
        catalog_timeout: Duration,
    ) -> Self {
        Self {
            output,
            profiles,
            catalog: OnceCell::new(),
            catalog_timeout,
            catalog_missed: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            in_flight: Mutex::new(None),
            superseded: Notify::new(),
            settled_tx: None,
        }
    }

    /// Deliver completions of current utterances to `tx`
    pub fn with_completion(mut self, tx: mpsc::UnboundedSender<SpeechSettled>) -> Self {
        self.settled_tx = Some(tx);
        self
    }

    pub fn is_supported(&self) -> bool {
        self.output.is_supported()
    }

    pub fn is_speaking(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// The utterance that will report completion, if any
    pub fn current(&self) -> Option<UtteranceId> {
        *self.in_flight.lock()
    }

    /// Claim the synthesizer for a new utterance, cancelling the previous one
    ///
    /// Synchronous so callers know the id before any await point.
    pub fn reserve(&self) -> UtteranceId {
        let id = UtteranceId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let previous = self.in_flight.lock().replace(id);
        if let Some(previous) = previous {
            debug!("{} supersedes {}", id, previous);
            self.output.cancel();
            self.superseded.notify_waiters();
        }
        id
    }

    /// Voice `text` in `language`
    ///
    /// Resolves `true` on normal completion and `false` otherwise; never fails.
    pub async fn speak(&self, text: &str, language: LanguageTag) -> bool {
        let id = self.reserve();
        self.speak_reserved(id, text, language).await
    }

    /// Voice `text` under an id obtained from [`reserve`](Self::reserve)
    pub async fn speak_reserved(&self, id: UtteranceId, text: &str, language: LanguageTag) -> bool {
        // Registered before the currency check so no later reserve or cancel is missed
        let superseded = self.superseded.notified();
        tokio::pin!(superseded);
        superseded.as_mut().enable();

        if !self.output.is_supported() {
            warn!("Speech synthesis is not supported by the host");
            return self.settle(id, SpeechOutcome::Unsupported, false);
        }

        let (voices, catalog_timed_out) = self.voice_catalog().await;
        if !self.is_current(id) {
            debug!("{} superseded while waiting for voices", id);
            return false;
        }

        let profile = self.profiles.get(language);
        let selection = select_voice(voices, language, profile);
        info!(
            "Speaking {} in {} with {} ({})",
            id,
            language,
            selection
                .voice
                .as_ref()
                .map(|v| v.name.as_str())
                .unwrap_or("default voice"),
            selection.matched
        );

        let utterance = Utterance {
            id,
            text: text.to_string(),
            locale: language.locale().to_string(),
            voice: selection.voice,
            rate: profile.rate,
            pitch: profile.pitch,
        };

        let spoken = tokio::select! {
            result = self.output.speak(utterance) => result,
            _ = &mut superseded => {
                debug!("{} superseded while speaking", id);
                Err(SynthesisError::Interrupted)
            }
        };
        let outcome = match spoken {
            Ok(()) => SpeechOutcome::Completed,
            Err(SynthesisError::Interrupted) => SpeechOutcome::Interrupted,
            Err(SynthesisError::Failed(reason)) => {
                warn!("Speech synthesis error for {}: {}", id, reason);
                SpeechOutcome::Failed(reason)
            }
        };
        self.settle(id, outcome, catalog_timed_out)
    }

    /// Cancel the current utterance without reporting its completion
    pub fn cancel(&self) {
        if let Some(id) = self.in_flight.lock().take() {
            debug!("Cancelling {}", id);
            self.output.cancel();
            self.superseded.notify_waiters();
        }
    }

    fn is_current(&self, id: UtteranceId) -> bool {
        *self.in_flight.lock() == Some(id)
    }

    /// The cached catalog, or an empty one and `true` when it timed out
    async fn voice_catalog(&self) -> (&[Voice], bool) {
        let wait = if self.catalog_missed.load(Ordering::SeqCst) {
            Duration::ZERO
        } else {
            self.catalog_timeout
        };
        let loaded = self
            .catalog
            .get_or_try_init(|| async {
                match tokio::time::timeout(wait, self.output.voices()).await {
                    Ok(voices) => {
                        debug!("Voice catalog ready with {} voices", voices.len());
                        Ok(voices)
                    }
                    Err(_) => Err(ChatError::VoiceCatalogTimeout(
                        self.catalog_timeout.as_millis() as u64,
                    )),
                }
            })
            .await;

        match loaded {
            Ok(voices) => (voices.as_slice(), false),
            Err(e) => {
                warn!("{}; using the platform default voice", e);
                self.catalog_missed.store(true, Ordering::SeqCst);
                (&[], true)
            }
        }
    }

    fn settle(&self, id: UtteranceId, outcome: SpeechOutcome, catalog_timed_out: bool) -> bool {
        {
            let mut in_flight = self.in_flight.lock();
            if *in_flight != Some(id) {
                debug!("{} settled after being superseded", id);
                return false;
            }
            *in_flight = None;
        }

        let completed = outcome.is_completed();
        if let Some(tx) = &self.settled_tx {
            let _ = tx.send(SpeechSettled {
                utterance: id,
                outcome,
                catalog_timed_out,
            });
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InstantOutput;

    #[async_trait]
    impl SpeechOutput for InstantOutput {
        async fn voices(&self) -> Vec<Voice> {
            vec![Voice::new("Lekha", "hi-IN")]
        }

        async fn speak(&self, _utterance: Utterance) -> Result<(), SynthesisError> {
            Ok(())
        }

        fn cancel(&self) {}
    }

    #[test]
    fn test_reserve_issues_increasing_ids() {
        let session = SpeechOutputSession::new(
            Arc::new(InstantOutput),
            VoiceProfiles::default(),
            Duration::from_secs(1),
        );
        let a = session.reserve();
        let b = session.reserve();
        assert!(b > a);
        assert_eq!(session.current(), Some(b));
        assert!(session.is_speaking());

        session.cancel();
        assert!(!session.is_speaking());
    }

    #[tokio::test]
    async fn test_speak_reports_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = SpeechOutputSession::new(
            Arc::new(InstantOutput),
            VoiceProfiles::default(),
            Duration::from_secs(1),
        )
        .with_completion(tx);

        assert!(session.speak("नमस्ते", LanguageTag::Hi).await);
        let settled = rx.recv().await.unwrap();
        assert_eq!(settled.outcome, SpeechOutcome::Completed);
        assert!(!settled.catalog_timed_out);
        assert!(rx.try_recv().is_err());
        assert!(!session.is_speaking());
    }

    #[tokio::test]
    async fn test_stale_reservation_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = SpeechOutputSession::new(
            Arc::new(InstantOutput),
            VoiceProfiles::default(),
            Duration::from_secs(1),
        )
        .with_completion(tx);

        let stale = session.reserve();
        let _current = session.reserve();
        assert!(!session.speak_reserved(stale, "old", LanguageTag::En).await);
        assert!(rx.try_recv().is_err());
    }
}
