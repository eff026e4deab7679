//! Shared fakes for orchestrator and speech session tests

#![allow(dead_code)]

use async_trait::async_trait;
use avatar_chat::avatar::{VideoError, VideoPlayback};
use avatar_chat::speech::{CaptureError, SpeechInput, SpeechOutput, SynthesisError, Utterance, Voice};
use avatar_chat::{
    Capabilities, IntegrationConfig, MessageStorage, Orchestrator, OrchestratorEvent,
    OrchestratorHandle, Reply, ReplyRequest, ResponseProvider, Role, SessionSnapshot, Turn,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub fn catalog() -> Vec<Voice> {
    vec![
        Voice::new("Alex", "en-US"),
        Voice::new("Samantha Female", "en-US"),
        Voice::new("Rishi", "en-IN"),
        Voice::new("Lekha", "hi-IN"),
    ]
}

// === Speech output ===

pub struct FakeSpeechOutput {
    pub supported: bool,
    pub voices: Vec<Voice>,
    pub voices_delay: Duration,
    pub speak_duration: Duration,
    pub fail_with: Mutex<Option<String>>,
    pub utterances: Mutex<Vec<Utterance>>,
    pub voices_calls: AtomicUsize,
    pub cancels: AtomicUsize,
    pub interrupt: Notify,
}

impl Default for FakeSpeechOutput {
    fn default() -> Self {
        Self {
            supported: true,
            voices: catalog(),
            voices_delay: Duration::ZERO,
            speak_duration: Duration::from_millis(200),
            fail_with: Mutex::new(None),
            utterances: Mutex::new(Vec::new()),
            voices_calls: AtomicUsize::new(0),
            cancels: AtomicUsize::new(0),
            interrupt: Notify::new(),
        }
    }
}

impl FakeSpeechOutput {
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Default::default()
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.utterances.lock().iter().map(|u| u.text.clone()).collect()
    }

    pub fn utterance_count(&self) -> usize {
        self.utterances.lock().len()
    }
}

#[async_trait]
impl SpeechOutput for FakeSpeechOutput {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn voices(&self) -> Vec<Voice> {
        self.voices_calls.fetch_add(1, Ordering::SeqCst);
        if !self.voices_delay.is_zero() {
            tokio::time::sleep(self.voices_delay).await;
        }
        self.voices.clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SynthesisError> {
        self.utterances.lock().push(utterance);
        let failure = self.fail_with.lock().clone();
        if let Some(reason) = failure {
            return Err(SynthesisError::Failed(reason));
        }
        tokio::select! {
            _ = tokio::time::sleep(self.speak_duration) => Ok(()),
            _ = self.interrupt.notified() => Err(SynthesisError::Interrupted),
        }
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.interrupt.notify_waiters();
    }
}

// === Speech input ===

/// Answers capture attempts from a script, then stays silent forever
pub struct FakeSpeechInput {
    pub supported: bool,
    script: Mutex<VecDeque<Result<String, CaptureError>>>,
    pub captures: AtomicUsize,
    pub aborts: AtomicUsize,
}

impl FakeSpeechInput {
    pub fn scripted(script: Vec<Result<String, CaptureError>>) -> Self {
        Self {
            supported: true,
            script: Mutex::new(script.into()),
            captures: AtomicUsize::new(0),
            aborts: AtomicUsize::new(0),
        }
    }

    pub fn hearing(transcripts: &[&str]) -> Self {
        Self::scripted(transcripts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::scripted(vec![])
        }
    }

    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl Default for FakeSpeechInput {
    fn default() -> Self {
        Self::scripted(vec![])
    }
}

#[async_trait]
impl SpeechInput for FakeSpeechInput {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn capture(&self) -> Result<String, CaptureError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(outcome) => outcome,
            None => std::future::pending().await,
        }
    }

    fn abort(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}

// === Video ===

#[derive(Default)]
pub struct FakeVideo {
    pub unsupported: bool,
    pub fail_with: Mutex<Option<VideoError>>,
    pub sources: Mutex<Vec<String>>,
    pub rewinds: AtomicUsize,
    pub plays: AtomicUsize,
    pub pauses: AtomicUsize,
}

impl FakeVideo {
    pub fn failing(error: VideoError) -> Self {
        Self {
            fail_with: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub fn play_count(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoPlayback for FakeVideo {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    fn set_source(&self, source: &str) {
        self.sources.lock().push(source.to_string());
    }

    fn rewind(&self) {
        self.rewinds.fetch_add(1, Ordering::SeqCst);
    }

    async fn play(&self) -> Result<(), VideoError> {
        let failure = self.fail_with.lock().clone();
        match failure {
            Some(e) => Err(e),
            None => {
                self.plays.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

// === Provider ===

/// Echoes the request back in its language after a delay
pub struct FakeProvider {
    pub delay: Duration,
    pub fail: AtomicBool,
    pub hang: AtomicBool,
    pub requests: Mutex<Vec<ReplyRequest>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
            fail: AtomicBool::new(false),
            hang: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        let provider = Self::default();
        provider.fail.store(true, Ordering::SeqCst);
        provider
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ResponseProvider for FakeProvider {
    async fn reply(&self, request: ReplyRequest) -> anyhow::Result<Reply> {
        self.requests.lock().push(request.clone());
        tokio::time::sleep(self.delay).await;
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("service unavailable");
        }
        Ok(Reply::new(format!("echo: {}", request.text), request.language))
    }
}

// === Harness ===

pub fn test_config() -> IntegrationConfig {
    let mut config = IntegrationConfig::default().without_greeting();
    config.event_buffer_size = 10_000;
    config
}

/// A running orchestrator wired to fakes
pub struct Harness {
    pub handle: OrchestratorHandle,
    pub input: Arc<FakeSpeechInput>,
    pub output: Arc<FakeSpeechOutput>,
    pub video: Arc<FakeVideo>,
    pub provider: Arc<FakeProvider>,
    pub task: JoinHandle<()>,
}

impl Harness {
    pub fn start(config: IntegrationConfig) -> Self {
        Self::with(
            config,
            FakeSpeechInput::default(),
            FakeSpeechOutput::default(),
            FakeVideo::default(),
            FakeProvider::default(),
        )
    }

    pub fn with(
        config: IntegrationConfig,
        input: FakeSpeechInput,
        output: FakeSpeechOutput,
        video: FakeVideo,
        provider: FakeProvider,
    ) -> Self {
        let input = Arc::new(input);
        let output = Arc::new(output);
        let video = Arc::new(video);
        let provider = Arc::new(provider);

        let capabilities = Capabilities {
            input: input.clone(),
            output: output.clone(),
            video: video.clone(),
        };
        let (orchestrator, handle) = Orchestrator::builder(config)
            .capabilities(capabilities)
            .provider(provider.clone())
            .store(Arc::new(MessageStorage::new()))
            .build()
            .expect("valid test config");
        let task = orchestrator.start();

        Self {
            handle,
            input,
            output,
            video,
            provider,
            task,
        }
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.handle.turns()
    }

    pub fn texts(&self, role: Role) -> Vec<String> {
        self.turns()
            .into_iter()
            .filter(|t| t.role == role)
            .map(|t| t.text)
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.handle.snapshot()
    }

    /// Drain events, returning every published snapshot
    pub fn snapshots(&self) -> Vec<SessionSnapshot> {
        let mut snapshots = Vec::new();
        while let Some(event) = self.handle.try_recv_event() {
            if let OrchestratorEvent::StateChanged(snapshot) = event {
                snapshots.push(snapshot);
            }
        }
        snapshots
    }

    /// Wait until the turn cycle is idle with nothing being voiced
    pub async fn settled(&self) {
        // Give the loop a chance to pick up commands already sent
        run_for(Duration::from_millis(10)).await;
        assert!(
            wait_until(|| {
                let s = self.snapshot();
                s.is_idle() && !s.speaking
            })
            .await,
            "orchestrator never settled: {:?}",
            self.snapshot()
        );
    }
}

/// Poll `condition` while letting (paused) time advance
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..2_000 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// Let timers and tasks run for a while
pub async fn run_for(duration: Duration) {
    tokio::time::sleep(duration).await;
}
