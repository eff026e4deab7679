use crate::speech::{CaptureError, SpeechInput};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Speech input fed with already-recognized text
///
/// Each capture attempt takes the next line sent on the paired sender. With
/// a silence timeout, an attempt that waits longer ends with `no-speech`.
pub struct ScriptedSpeechInput {
    lines: Mutex<mpsc::UnboundedReceiver<String>>,
    silence_timeout: Option<Duration>,
}

impl ScriptedSpeechInput {
    pub fn new(silence_timeout: Option<Duration>) -> (Self, mpsc::UnboundedSender<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let input = Self {
            lines: Mutex::new(rx),
            silence_timeout,
        };
        (input, tx)
    }
}

#[async_trait]
impl SpeechInput for ScriptedSpeechInput {
    async fn capture(&self) -> Result<String, CaptureError> {
        let mut lines = self.lines.lock().await;
        let line = match self.silence_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, lines.recv()).await {
                Ok(line) => line,
                Err(_) => return Err(CaptureError::NoSpeech),
            },
            None => lines.recv().await,
        };
        // A closed feed behaves like a lost microphone
        line.ok_or(CaptureError::AudioCapture)
    }

    fn abort(&self) {
        debug!("Scripted capture aborted");
    }
}
