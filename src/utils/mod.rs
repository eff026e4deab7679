pub mod channels;

pub use channels::{CommandChannels, EventChannels, MediaChannels, OrchestratorChannels};
