//! Avatar video playback
//!
//! A single looping video mirrors voiced replies. Only the orchestrator
//! starts and stops it.

pub mod playback;

pub use playback::{AvatarPlayback, VideoError, VideoPlayback};
