//! Avatar playback controller
//!
//! Wraps a host [`VideoPlayback`] so that `start` and `stop` are idempotent.
//! Every start rewinds the video first, so each reply begins on the same frame.

use crate::{Capability, ChatError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Host video failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// The resource could not be loaded
    #[error("{0}")]
    Load(String),

    /// The host refused to start playback (autoplay policy)
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Host video element
#[async_trait]
pub trait VideoPlayback: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    fn set_source(&self, source: &str);

    /// Seek to the first frame
    fn rewind(&self);

    /// Resolves once playback has actually started
    async fn play(&self) -> std::result::Result<(), VideoError>;

    fn pause(&self);
}

/// Start/stop controller over the shared looping video
pub struct AvatarPlayback {
    video: Arc<dyn VideoPlayback>,
    playing: bool,
    source: String,
    start_timeout: Duration,
}

impl AvatarPlayback {
    pub fn new(
        video: Arc<dyn VideoPlayback>,
        source: impl Into<String>,
        start_timeout: Duration,
    ) -> Self {
        let source = source.into();
        if video.is_supported() {
            video.set_source(&source);
        }
        Self {
            video,
            playing: false,
            source,
            start_timeout,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.video.is_supported()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Point the player at a new resource, stopping current playback
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.stop();
        self.source = source.into();
        if self.video.is_supported() {
            self.video.set_source(&self.source);
        }
        info!("Avatar source set to {}", self.source);
    }

    /// Play from the first frame
    ///
    /// No-op while already playing. Failures leave the controller stopped.
    pub async fn start(&mut self) -> Result<()> {
        if self.playing {
            return Ok(());
        }
        if !self.video.is_supported() {
            return Err(ChatError::UnsupportedCapability(Capability::VideoPlayback));
        }

        self.video.rewind();
        match tokio::time::timeout(self.start_timeout, self.video.play()).await {
            Ok(Ok(())) => {
                debug!("Avatar playing {}", self.source);
                self.playing = true;
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Avatar failed to start: {}", e);
                Err(ChatError::PlaybackError {
                    media: Capability::VideoPlayback,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                warn!("Avatar did not start within {:?}", self.start_timeout);
                self.video.pause();
                Err(ChatError::PlaybackError {
                    media: Capability::VideoPlayback,
                    reason: format!("timed out after {} ms", self.start_timeout.as_millis()),
                })
            }
        }
    }

    /// Pause playback; no-op while stopped
    pub fn stop(&mut self) {
        if self.playing {
            self.video.pause();
            self.playing = false;
            debug!("Avatar stopped");
        }
    }
}
