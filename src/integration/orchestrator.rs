//! Interaction orchestrator
//!
//! Owns the conversation turn cycle and is the only component allowed to
//! start or stop capture, synthesis and the avatar video:
//!
//! ```text
//! Idle --submit--> AwaitingReply --reply--> Responding --speech settled--> Idle
//! ```
//!
//! Hands-free listening is an orthogonal flag. Whenever a turn settles and
//! the flag is set, capture is re-armed after a short delay, and only if
//! nothing is being voiced at that moment.
//!
//! The orchestrator runs as a single task. Host futures (provider calls,
//! capture attempts, utterances, timers) run as short tasks that post their
//! results back into the loop, so all state mutation happens in one place.

use crate::avatar::{AvatarPlayback, VideoPlayback};
use crate::integration::commands::{
    detect_command, is_voice_stop_phrase, listening_prompt, listening_stopped, ChatCommand,
    AUDIO_TEST_SENTENCE, HINDI_TEST_SENTENCE,
};
use crate::integration::config::IntegrationConfig;
use crate::language::LanguageTag;
use crate::messages::{MessageStorage, MessageStore, Turn};
use crate::provider::{CannedResponseProvider, Reply, ReplyRequest, ResponseProvider};
use crate::speech::{
    CaptureEvent, CaptureVerdict, SpeechInput, SpeechInputSession, SpeechOutcome, SpeechOutput,
    SpeechOutputSession, SpeechSettled, UtteranceId,
};
use crate::state::{SessionSnapshot, SessionState, SharedSessionState, TurnPhase};
use crate::utils::OrchestratorChannels;
use crate::{Capability, ChatError, Result};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Commands that can be sent to the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorCommand {
    /// Typed or recognized user input
    Submit(String),

    /// Enter hands-free listening (microphone button)
    StartListening,

    /// Leave hands-free listening
    StopListening,

    /// Toggle voiced replies
    SetAudioEnabled(bool),

    /// Toggle the avatar video
    SetVideoEnabled(bool),

    /// Point the avatar at another video resource
    SetVideoSource(String),

    /// Stop all media and exit the loop
    Shutdown,
}

/// Events emitted by the orchestrator
#[derive(Debug, Clone)]
pub enum OrchestratorEvent {
    /// Session state changed
    StateChanged(SessionSnapshot),

    /// A turn was appended to the conversation
    TurnAppended(Turn),

    /// Orchestrator has shut down
    Shutdown,
}

/// Results of short-lived tasks, posted back into the loop
#[derive(Debug)]
enum TaskEvent {
    ReplyReady { seq: u64, result: Result<Reply> },
    RearmDue { epoch: u64 },
    VideoTestElapsed { test: u64 },
}

/// Host media capabilities handed to the orchestrator
#[derive(Clone)]
pub struct Capabilities {
    pub input: Arc<dyn SpeechInput>,
    pub output: Arc<dyn SpeechOutput>,
    pub video: Arc<dyn VideoPlayback>,
}

/// Handle for controlling the orchestrator from the UI or tests
#[derive(Clone)]
pub struct OrchestratorHandle {
    command_tx: mpsc::UnboundedSender<OrchestratorCommand>,
    event_rx: Receiver<OrchestratorEvent>,
    state: SharedSessionState,
    store: Arc<dyn MessageStore>,
}

impl OrchestratorHandle {
    /// Send a command to the orchestrator
    pub fn send_command(&self, cmd: OrchestratorCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| ChatError::ChannelError(format!("Failed to send command: {}", e)))
    }

    pub fn submit(&self, text: impl Into<String>) -> Result<()> {
        self.send_command(OrchestratorCommand::Submit(text.into()))
    }

    pub fn start_listening(&self) -> Result<()> {
        self.send_command(OrchestratorCommand::StartListening)
    }

    pub fn stop_listening(&self) -> Result<()> {
        self.send_command(OrchestratorCommand::StopListening)
    }

    pub fn set_audio_enabled(&self, enabled: bool) -> Result<()> {
        self.send_command(OrchestratorCommand::SetAudioEnabled(enabled))
    }

    pub fn set_video_enabled(&self, enabled: bool) -> Result<()> {
        self.send_command(OrchestratorCommand::SetVideoEnabled(enabled))
    }

    pub fn set_video_source(&self, source: impl Into<String>) -> Result<()> {
        self.send_command(OrchestratorCommand::SetVideoSource(source.into()))
    }

    /// Request shutdown
    pub fn shutdown(&self) -> Result<()> {
        self.send_command(OrchestratorCommand::Shutdown)
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<OrchestratorEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Shared session state for direct queries
    pub fn state(&self) -> &SharedSessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// The conversation so far, in append order
    pub fn turns(&self) -> Vec<Turn> {
        self.store.all()
    }

    // === Convenience state query methods ===

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    pub fn is_speaking(&self) -> bool {
        self.state.is_speaking()
    }
}

/// Builder filling in the demo provider and an in-memory store
pub struct OrchestratorBuilder {
    config: IntegrationConfig,
    capabilities: Option<Capabilities>,
    provider: Option<Arc<dyn ResponseProvider>>,
    store: Option<Arc<dyn MessageStore>>,
}

impl OrchestratorBuilder {
    pub fn new(config: IntegrationConfig) -> Self {
        Self {
            config,
            capabilities: None,
            provider: None,
            store: None,
        }
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn provider(mut self, provider: Arc<dyn ResponseProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn store(mut self, store: Arc<dyn MessageStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<(Orchestrator, OrchestratorHandle)> {
        let capabilities = self
            .capabilities
            .ok_or_else(|| ChatError::ConfigError("Host capabilities are required".into()))?;
        let provider: Arc<dyn ResponseProvider> = match self.provider {
            Some(provider) => provider,
            None => Arc::new(CannedResponseProvider::default()),
        };
        let store: Arc<dyn MessageStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MessageStorage::new()),
        };
        Orchestrator::new(self.config, capabilities, provider, store)
    }
}

/// The conversation state machine
pub struct Orchestrator {
    config: IntegrationConfig,
    state: SharedSessionState,
    store: Arc<dyn MessageStore>,
    provider: Arc<dyn ResponseProvider>,

    // Media sessions
    input: SpeechInputSession,
    output: Arc<SpeechOutputSession>,
    avatar: AvatarPlayback,

    // Channels
    command_rx: mpsc::UnboundedReceiver<OrchestratorCommand>,
    capture_rx: mpsc::UnboundedReceiver<CaptureEvent>,
    speech_rx: mpsc::UnboundedReceiver<SpeechSettled>,
    task_tx: mpsc::UnboundedSender<TaskEvent>,
    task_rx: mpsc::UnboundedReceiver<TaskEvent>,
    event_tx: Sender<OrchestratorEvent>,

    /// Sequence number of the outstanding reply request
    reply_seq: u64,
    reply_task: Option<JoinHandle<()>>,
    /// Utterance whose completion ends the current response
    current_utterance: Option<UtteranceId>,
    /// Bumped to invalidate pending re-arm timers
    rearm_epoch: u64,
    /// Running standalone video test
    video_test: Option<u64>,
    video_test_seq: u64,
    /// Unsupported capabilities already reported to the user
    reported: HashSet<Capability>,
    catalog_timeout_reported: bool,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Returns the orchestrator and a handle for controlling it.
    /// The orchestrator must be started with `start()` to begin processing.
    pub fn new(
        config: IntegrationConfig,
        capabilities: Capabilities,
        provider: Arc<dyn ResponseProvider>,
        store: Arc<dyn MessageStore>,
    ) -> Result<(Self, OrchestratorHandle)> {
        config.validate()?;

        let channels = OrchestratorChannels::new(config.event_buffer_size);
        let (task_tx, task_rx) = mpsc::unbounded_channel();

        let state = SharedSessionState::new(SessionState::new(
            config.audio_enabled,
            config.video_enabled,
        ));

        let input = SpeechInputSession::new(
            capabilities.input,
            config.no_speech_retry_delay(),
            channels.media.capture_tx,
        );
        let output = Arc::new(
            SpeechOutputSession::new(
                capabilities.output,
                config.voices.clone(),
                config.voice_catalog_timeout(),
            )
            .with_completion(channels.media.speech_tx),
        );
        let avatar = AvatarPlayback::new(
            capabilities.video,
            config.video_source.clone(),
            config.video_start_timeout(),
        );

        let handle = OrchestratorHandle {
            command_tx: channels.commands.command_tx,
            event_rx: channels.events.event_rx,
            state: state.clone(),
            store: Arc::clone(&store),
        };

        let orchestrator = Self {
            config,
            state,
            store,
            provider,
            input,
            output,
            avatar,
            command_rx: channels.commands.command_rx,
            capture_rx: channels.media.capture_rx,
            speech_rx: channels.media.speech_rx,
            task_tx,
            task_rx,
            event_tx: channels.events.event_tx,
            reply_seq: 0,
            reply_task: None,
            current_utterance: None,
            rearm_epoch: 0,
            video_test: None,
            video_test_seq: 0,
            reported: HashSet::new(),
            catalog_timeout_reported: false,
        };

        Ok((orchestrator, handle))
    }

    pub fn builder(config: IntegrationConfig) -> OrchestratorBuilder {
        OrchestratorBuilder::new(config)
    }

    /// Spawn the orchestrator loop on the current runtime
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the orchestrator loop until shutdown
    pub async fn run(mut self) {
        info!("Orchestrator main loop starting");

        if let Some(greeting) = self.config.greeting.clone() {
            self.append(Turn::system(greeting));
        }
        if self.config.listen_on_start {
            self.enable_listening(false);
        }
        self.publish_state();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(OrchestratorCommand::Shutdown) | None => {
                        info!("Shutdown requested");
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd).await,
                },
                Some(event) = self.capture_rx.recv() => self.handle_capture(event).await,
                Some(settled) = self.speech_rx.recv() => self.handle_speech_settled(settled),
                Some(task) = self.task_rx.recv() => self.handle_task(task).await,
            }
            debug_assert!(self.state.read().invariant_holds());
        }

        self.teardown();
    }

    async fn handle_command(&mut self, cmd: OrchestratorCommand) {
        match cmd {
            OrchestratorCommand::Submit(text) => self.submit(text).await,
            OrchestratorCommand::StartListening => self.enable_listening(false),
            OrchestratorCommand::StopListening => self.disable_listening(false),
            OrchestratorCommand::SetAudioEnabled(enabled) => self.set_audio_enabled(enabled),
            OrchestratorCommand::SetVideoEnabled(enabled) => self.set_video_enabled(enabled),
            OrchestratorCommand::SetVideoSource(source) => {
                self.avatar.set_source(source.as_str());
                self.config.video_source = source.clone();
                self.state.write().video_playing = false;
                self.append(Turn::system(format!("Video path updated to: {}", source)));
                self.publish_state();
            }
            // Handled by the loop
            OrchestratorCommand::Shutdown => {}
        }
    }

    async fn handle_task(&mut self, task: TaskEvent) {
        match task {
            TaskEvent::ReplyReady { seq, result } => self.handle_reply(seq, result).await,
            TaskEvent::RearmDue { epoch } => {
                if epoch == self.rearm_epoch {
                    self.try_listen();
                } else {
                    debug!("Discarding stale re-arm timer");
                }
            }
            TaskEvent::VideoTestElapsed { test } => {
                if self.video_test != Some(test) {
                    return;
                }
                self.video_test = None;
                // The avatar stays up if a reply started voicing meanwhile
                if self.current_utterance.is_none() {
                    self.stop_avatar();
                }
                self.append(Turn::system("Video test completed."));
                self.publish_state();
            }
        }
    }

    // === Turn cycle ===

    /// Accept user input, ignoring blanks and anything during an in-flight turn
    async fn submit(&mut self, text: String) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank submission");
            return;
        }
        let phase = self.state.phase();
        if phase.is_in_flight() {
            debug!("Ignoring submission while {}", phase);
            return;
        }

        let turn = Turn::user(trimmed);
        let language = turn.language;
        self.append(turn);

        if let Some(command) = detect_command(trimmed) {
            info!("Running built-in command {:?}", command);
            self.run_command(command).await;
            return;
        }

        self.stop_capture();
        self.state.write().begin_turn(language);
        self.publish_state();

        self.reply_seq += 1;
        let seq = self.reply_seq;
        let request = ReplyRequest {
            text: trimmed.to_string(),
            language,
        };
        info!("Requesting reply #{} in {}", seq, language);

        let provider = Arc::clone(&self.provider);
        let tx = self.task_tx.clone();
        let timeout = self.config.reply_timeout();
        self.reply_task = Some(tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, provider.reply(request)).await {
                Ok(Ok(reply)) => Ok(reply),
                Ok(Err(e)) => Err(ChatError::ProviderFailure(format!("{:#}", e))),
                Err(_) => Err(ChatError::ProviderTimeout(timeout.as_millis() as u64)),
            };
            let _ = tx.send(TaskEvent::ReplyReady { seq, result });
        }));
    }

    async fn handle_reply(&mut self, seq: u64, result: Result<Reply>) {
        if seq != self.reply_seq || self.state.phase() != TurnPhase::AwaitingReply {
            debug!("Discarding stale reply #{}", seq);
            return;
        }
        self.reply_task = None;

        match result {
            Ok(reply) => {
                info!("Reply #{} received in {}", seq, reply.language);
                self.append(Turn::assistant(reply.text.clone(), reply.language));
                self.voice(&reply.text, reply.language).await;
            }
            Err(e) => {
                self.report(e);
                self.finish_turn();
            }
        }
    }

    /// Voice a reply or diagnostic sentence, mirroring it with the avatar
    async fn voice(&mut self, text: &str, language: LanguageTag) {
        self.state.write().begin_response(language);

        let audio_enabled = self.state.read().audio_enabled;
        if !audio_enabled {
            self.finish_turn();
            return;
        }
        if !self.output.is_supported() {
            self.report_unsupported(Capability::SpeechSynthesis);
            self.state.write().audio_enabled = false;
            self.finish_turn();
            return;
        }

        self.stop_capture();
        let video_enabled = self.state.read().video_enabled;
        if video_enabled {
            self.start_avatar().await;
        }

        let id = self.output.reserve();
        self.current_utterance = Some(id);
        self.state.write().speech_started();
        self.publish_state();

        let output = Arc::clone(&self.output);
        let text = text.to_string();
        tokio::spawn(async move {
            output.speak_reserved(id, &text, language).await;
        });
    }

    fn handle_speech_settled(&mut self, settled: SpeechSettled) {
        if self.current_utterance != Some(settled.utterance) {
            debug!("Discarding completion of stale {}", settled.utterance);
            return;
        }
        self.current_utterance = None;
        self.state.write().speech_settled();
        if self.video_test.is_none() {
            self.stop_avatar();
        }

        if settled.catalog_timed_out && !self.catalog_timeout_reported {
            self.catalog_timeout_reported = true;
            self.report(ChatError::VoiceCatalogTimeout(
                self.config.voice_catalog_timeout_ms,
            ));
        }

        match settled.outcome {
            SpeechOutcome::Completed => debug!("{} completed", settled.utterance),
            SpeechOutcome::Interrupted => debug!("{} interrupted", settled.utterance),
            SpeechOutcome::Failed(reason) => self.report(ChatError::PlaybackError {
                media: Capability::SpeechSynthesis,
                reason,
            }),
            SpeechOutcome::Unsupported => {
                self.report_unsupported(Capability::SpeechSynthesis);
                self.state.write().audio_enabled = false;
            }
        }

        self.finish_turn();
    }

    /// Return to Idle and re-arm listening if hands-free mode is on
    fn finish_turn(&mut self) {
        self.state.write().finish_turn();
        self.publish_state();
        self.schedule_rearm();
    }

    // === Built-in commands ===

    async fn run_command(&mut self, command: ChatCommand) {
        match command {
            ChatCommand::TestAudio => {
                self.run_audio_test("Running audio test...", AUDIO_TEST_SENTENCE, LanguageTag::En)
                    .await
            }
            ChatCommand::TestHindi => {
                self.run_audio_test(
                    "Running Hindi audio test...",
                    HINDI_TEST_SENTENCE,
                    LanguageTag::Hi,
                )
                .await
            }
            ChatCommand::TestVideo => self.run_video_test().await,
            ChatCommand::DisableVideo => {
                self.set_video_enabled(false);
                self.append(Turn::system("Video playback disabled"));
            }
            ChatCommand::EnableVideo => {
                self.set_video_enabled(true);
                self.append(Turn::system("Video playback enabled"));
            }
            ChatCommand::Listen => self.enable_listening(true),
            ChatCommand::StopListening => self.disable_listening(true),
        }
    }

    async fn run_audio_test(&mut self, announcement: &str, sentence: &str, language: LanguageTag) {
        self.append(Turn::system(announcement));
        let audio_enabled = self.state.read().audio_enabled;
        if !audio_enabled {
            self.append(Turn::system("Audio is currently disabled. Enable audio to test."));
            return;
        }
        self.voice(sentence, language).await;
    }

    async fn run_video_test(&mut self) {
        self.append(Turn::system("Testing video playback..."));
        let video_enabled = self.state.read().video_enabled;
        if !video_enabled {
            self.append(Turn::system("Video is currently disabled. Enable video to test."));
            return;
        }

        match self.avatar.start().await {
            Ok(()) => {
                self.state.write().video_playing = true;
                self.publish_state();

                self.video_test_seq += 1;
                let test = self.video_test_seq;
                self.video_test = Some(test);

                let tx = self.task_tx.clone();
                let duration = self.config.video_test_duration();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = tx.send(TaskEvent::VideoTestElapsed { test });
                });
            }
            Err(e) => {
                warn!("Video test failed: {}", e);
                self.append(Turn::system(format!("Video test failed: {}", e)));
            }
        }
    }

    // === Listening ===

    fn enable_listening(&mut self, announce: bool) {
        if !self.input.is_supported() {
            self.report_unsupported(Capability::SpeechCapture);
            return;
        }

        let language = {
            let mut state = self.state.write();
            state.listening_enabled = true;
            state.current_language
        };
        info!("Hands-free listening enabled");
        if announce {
            self.append(Turn::system(listening_prompt(language)));
        }
        self.try_listen();
        self.publish_state();
    }

    fn disable_listening(&mut self, announce: bool) {
        self.input.stop();
        self.rearm_epoch += 1;
        let language = {
            let mut state = self.state.write();
            state.listening_enabled = false;
            state.capture_ended();
            state.current_language
        };
        info!("Hands-free listening disabled");
        if announce {
            self.append(Turn::system(listening_stopped(language)));
        }
        self.publish_state();
    }

    /// Start a capture attempt if the guard allows it
    fn try_listen(&mut self) {
        let may_listen = self.state.read().may_listen();
        if !may_listen {
            debug!("Not re-arming capture: {:?}", self.state.snapshot());
            return;
        }
        match self.input.start() {
            Ok(id) => {
                debug!("Listening on {}", id);
                self.state.write().capture_started();
                self.publish_state();
            }
            Err(e) => {
                self.state.write().listening_enabled = false;
                self.report(e);
                self.publish_state();
            }
        }
    }

    fn stop_capture(&mut self) {
        if self.input.is_listening() {
            self.input.stop();
        }
        self.state.write().capture_ended();
    }

    fn schedule_rearm(&mut self) {
        let listening_enabled = self.state.read().listening_enabled;
        if !listening_enabled {
            return;
        }
        self.rearm_epoch += 1;
        let epoch = self.rearm_epoch;
        let tx = self.task_tx.clone();
        let delay = self.config.rearm_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TaskEvent::RearmDue { epoch });
        });
    }

    async fn handle_capture(&mut self, event: CaptureEvent) {
        let Some(verdict) = self.input.resolve(event) else {
            return;
        };

        match verdict {
            CaptureVerdict::Retry => debug!("Still listening after no-speech"),
            CaptureVerdict::Utterance(transcript) => {
                self.state.write().capture_ended();
                self.publish_state();

                if is_voice_stop_phrase(&transcript) {
                    info!("Stop phrase heard: {}", transcript);
                    self.disable_listening(true);
                    return;
                }

                self.submit(transcript).await;
                // Blank input and commands that do not voice leave the turn idle
                if self.state.phase().is_idle() {
                    self.schedule_rearm();
                }
            }
            CaptureVerdict::Failed(e) => {
                {
                    let mut state = self.state.write();
                    state.capture_ended();
                    state.listening_enabled = false;
                }
                self.report(e);
                self.publish_state();
            }
        }
    }

    // === Media toggles ===

    fn set_audio_enabled(&mut self, enabled: bool) {
        if enabled && !self.output.is_supported() {
            self.report_unsupported(Capability::SpeechSynthesis);
            return;
        }
        self.state.write().audio_enabled = enabled;
        info!("Audio {}", if enabled { "enabled" } else { "disabled" });

        if !enabled && self.current_utterance.take().is_some() {
            // Cancelled utterances report nothing, so settle the turn here
            self.output.cancel();
            self.state.write().speech_settled();
            self.stop_avatar();
            self.finish_turn();
            return;
        }
        self.publish_state();
    }

    fn set_video_enabled(&mut self, enabled: bool) {
        self.state.write().video_enabled = enabled;
        if !enabled {
            self.video_test = None;
            self.stop_avatar();
        }
        info!("Video {}", if enabled { "enabled" } else { "disabled" });
        self.publish_state();
    }

    async fn start_avatar(&mut self) {
        match self.avatar.start().await {
            Ok(()) => self.state.write().video_playing = true,
            Err(ChatError::UnsupportedCapability(capability)) => {
                self.report_unsupported(capability);
                self.state.write().video_enabled = false;
            }
            Err(e) => self.report(e),
        }
    }

    fn stop_avatar(&mut self) {
        self.avatar.stop();
        self.state.write().video_playing = false;
    }

    // === Output ===

    /// Surface an error as a system turn
    fn report(&mut self, error: ChatError) {
        warn!("{}", error);
        self.append(Turn::system(error.user_message()));
    }

    /// Report a missing capability the first time it is hit
    fn report_unsupported(&mut self, capability: Capability) {
        if self.reported.insert(capability) {
            self.report(ChatError::UnsupportedCapability(capability));
        } else {
            debug!("{} still unsupported", capability);
        }
    }

    fn append(&mut self, turn: Turn) {
        debug!("{}: {}", turn.role, turn.text);
        self.store.append(turn.clone());
        self.emit(OrchestratorEvent::TurnAppended(turn));
    }

    fn publish_state(&self) {
        let snapshot = self.state.snapshot();
        self.emit(OrchestratorEvent::StateChanged(snapshot));
    }

    fn emit(&self, event: OrchestratorEvent) {
        if let Err(TrySendError::Full(_)) = self.event_tx.try_send(event) {
            debug!("Event channel full, dropping event");
        }
    }

    /// Stop every media session and announce shutdown
    fn teardown(&mut self) {
        self.input.stop();
        self.output.cancel();
        self.current_utterance = None;
        self.avatar.stop();
        self.video_test = None;
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
        self.state.write().reset();
        self.publish_state();
        self.emit(OrchestratorEvent::Shutdown);
        info!("Orchestrator shutdown complete");
    }
}
