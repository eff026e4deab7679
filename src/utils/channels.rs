use crate::integration::{OrchestratorCommand, OrchestratorEvent};
use crate::speech::{CaptureEvent, SpeechSettled};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::sync::mpsc;

/// Commands flowing from handles into the orchestrator loop
pub struct CommandChannels {
    pub command_tx: mpsc::UnboundedSender<OrchestratorCommand>,
    pub command_rx: mpsc::UnboundedReceiver<OrchestratorCommand>,
}

impl CommandChannels {
    pub fn new() -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        Self {
            command_tx,
            command_rx,
        }
    }
}

impl Default for CommandChannels {
    fn default() -> Self {
        Self::new()
    }
}

/// Completion events posted by capture attempts and utterances
pub struct MediaChannels {
    pub capture_tx: mpsc::UnboundedSender<CaptureEvent>,
    pub capture_rx: mpsc::UnboundedReceiver<CaptureEvent>,
    pub speech_tx: mpsc::UnboundedSender<SpeechSettled>,
    pub speech_rx: mpsc::UnboundedReceiver<SpeechSettled>,
}

impl MediaChannels {
    pub fn new() -> Self {
        let (capture_tx, capture_rx) = mpsc::unbounded_channel();
        let (speech_tx, speech_rx) = mpsc::unbounded_channel();
        Self {
            capture_tx,
            capture_rx,
            speech_tx,
            speech_rx,
        }
    }
}

impl Default for MediaChannels {
    fn default() -> Self {
        Self::new()
    }
}

/// UI-facing events; bounded so a stalled UI cannot grow memory
pub struct EventChannels {
    pub event_tx: Sender<OrchestratorEvent>,
    pub event_rx: Receiver<OrchestratorEvent>,
}

impl EventChannels {
    pub fn new(buffer_size: usize) -> Self {
        let (event_tx, event_rx) = bounded(buffer_size);
        Self { event_tx, event_rx }
    }
}

pub struct OrchestratorChannels {
    pub commands: CommandChannels,
    pub media: MediaChannels,
    pub events: EventChannels,
}

impl OrchestratorChannels {
    pub fn new(event_buffer_size: usize) -> Self {
        Self {
            commands: CommandChannels::new(),
            media: MediaChannels::new(),
            events: EventChannels::new(event_buffer_size),
        }
    }
}
