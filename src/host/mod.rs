//! Host capability implementations for the console demo
//!
//! A terminal has no microphone recognizer, synthesizer or video element,
//! so these stand in for them: speech is printed with a simulated
//! duration and recognized speech is fed in as text.

pub mod console;
pub mod scripted;

pub use console::{ConsoleSpeechOutput, ConsoleVideo};
pub use scripted::ScriptedSpeechInput;
