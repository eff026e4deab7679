use crate::avatar::{VideoError, VideoPlayback};
use crate::speech::{SpeechOutput, SynthesisError, Utterance, Voice};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info};

/// Prints utterances and holds them for a duration proportional to their length
pub struct ConsoleSpeechOutput {
    catalog: Vec<Voice>,
    /// Delay before the voice catalog is reported as populated
    catalog_delay: Duration,
    /// Simulated speaking time per word at rate 1.0
    per_word: Duration,
    interrupt: Notify,
}

impl Default for ConsoleSpeechOutput {
    fn default() -> Self {
        Self::new(vec![
            Voice::new("Samantha Female", "en-US"),
            Voice::new("Daniel", "en-GB"),
            Voice::new("Lekha", "hi-IN"),
        ])
    }
}

impl ConsoleSpeechOutput {
    pub fn new(catalog: Vec<Voice>) -> Self {
        Self {
            catalog,
            catalog_delay: Duration::from_millis(150),
            per_word: Duration::from_millis(250),
            interrupt: Notify::new(),
        }
    }

    pub fn with_per_word(mut self, per_word: Duration) -> Self {
        self.per_word = per_word;
        self
    }

    fn duration_of(&self, utterance: &Utterance) -> Duration {
        let words = utterance.text.split_whitespace().count().max(1) as f32;
        self.per_word.mul_f32(words / utterance.rate.max(0.1))
    }
}

#[async_trait]
impl SpeechOutput for ConsoleSpeechOutput {
    async fn voices(&self) -> Vec<Voice> {
        tokio::time::sleep(self.catalog_delay).await;
        self.catalog.clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SynthesisError> {
        let voice = utterance
            .voice
            .as_ref()
            .map(|v| v.name.as_str())
            .unwrap_or("default");
        println!("🔊 [{} · {}] {}", voice, utterance.locale, utterance.text);

        let duration = self.duration_of(&utterance);
        debug!("Simulating {:?} of speech for {}", duration, utterance.id);
        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = self.interrupt.notified() => Err(SynthesisError::Interrupted),
        }
    }

    fn cancel(&self) {
        self.interrupt.notify_waiters();
    }
}

/// Logs avatar playback instead of rendering it
#[derive(Default)]
pub struct ConsoleVideo {
    source: Mutex<String>,
}

#[async_trait]
impl VideoPlayback for ConsoleVideo {
    fn set_source(&self, source: &str) {
        *self.source.lock() = source.to_string();
    }

    fn rewind(&self) {
        debug!("Avatar rewound");
    }

    async fn play(&self) -> Result<(), VideoError> {
        let source = self.source.lock().clone();
        if source.trim().is_empty() {
            return Err(VideoError::Load("no video source".to_string()));
        }
        info!("▶ avatar {}", source);
        Ok(())
    }

    fn pause(&self) {
        info!("⏸ avatar");
    }
}
