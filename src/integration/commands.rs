//! Built-in command detection
//!
//! Typed commands must match the whole submission exactly (case-insensitive,
//! surrounding whitespace ignored). Voice stop phrases are matched on the
//! recognized transcript and also tolerate trailing punctuation.

use crate::language::LanguageTag;

/// Phrases that end hands-free listening when heard
const VOICE_STOP_PHRASES: &[&str] = &["stop listening", "stop", "exit", "quit", "बंद करो", "रुको"];

/// Sentence voiced by the English audio test
pub const AUDIO_TEST_SENTENCE: &str = "This is an audio test for the assistant. If you can hear this message, your audio is working correctly.";

/// Sentence voiced by the Hindi audio test
pub const HINDI_TEST_SENTENCE: &str = "नमस्ते, यह एक हिंदी ऑडियो परीक्षण है। यदि आप यह संदेश सुन सकते हैं, तो आपका ऑडियो सही काम कर रहा है।";

/// Commands that short-circuit the reply path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Voice the English diagnostic sentence
    TestAudio,
    /// Voice the Hindi diagnostic sentence
    TestHindi,
    /// Play the avatar on its own for a while
    TestVideo,
    DisableVideo,
    EnableVideo,
    /// Enter hands-free listening
    Listen,
    /// Leave hands-free listening
    StopListening,
}

/// Detect a typed command
///
/// Returns None for anything that is not exactly a command.
pub fn detect_command(text: &str) -> Option<ChatCommand> {
    let normalized = text.trim().to_lowercase();
    match normalized.as_str() {
        "test audio" => Some(ChatCommand::TestAudio),
        "test hindi" => Some(ChatCommand::TestHindi),
        "test video" => Some(ChatCommand::TestVideo),
        "novideo" => Some(ChatCommand::DisableVideo),
        "video" => Some(ChatCommand::EnableVideo),
        "listen" => Some(ChatCommand::Listen),
        "stop listening" | "बंद करो" | "रुको" => Some(ChatCommand::StopListening),
        _ => None,
    }
}

/// Check if a transcript is a stop phrase
///
/// Speech recognizers often add punctuation, so trailing marks (including
/// the Devanagari danda) are ignored. Partial matches like "stopping" are not.
pub fn is_voice_stop_phrase(transcript: &str) -> bool {
    let normalized = transcript.trim().to_lowercase();
    let cleaned = normalized
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '।')
        .trim_end();

    VOICE_STOP_PHRASES.iter().any(|&phrase| cleaned == phrase)
}

/// Acknowledgement for entering hands-free mode
pub fn listening_prompt(language: LanguageTag) -> &'static str {
    match language {
        LanguageTag::Hi => "मैं सुन रहा हूँ। कृपया अपना प्रश्न बोलें।",
        LanguageTag::En => "I'm listening. Please speak your question.",
    }
}

/// Acknowledgement for leaving hands-free mode
pub fn listening_stopped(language: LanguageTag) -> &'static str {
    match language {
        LanguageTag::Hi => "आवाज पहचानना बंद किया गया है।",
        LanguageTag::En => "Speech recognition stopped.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_command_exact_matches() {
        assert_eq!(detect_command("test audio"), Some(ChatCommand::TestAudio));
        assert_eq!(detect_command("test hindi"), Some(ChatCommand::TestHindi));
        assert_eq!(detect_command("test video"), Some(ChatCommand::TestVideo));
        assert_eq!(detect_command("novideo"), Some(ChatCommand::DisableVideo));
        assert_eq!(detect_command("video"), Some(ChatCommand::EnableVideo));
        assert_eq!(detect_command("listen"), Some(ChatCommand::Listen));
        assert_eq!(detect_command("stop listening"), Some(ChatCommand::StopListening));
        assert_eq!(detect_command("बंद करो"), Some(ChatCommand::StopListening));
        assert_eq!(detect_command("रुको"), Some(ChatCommand::StopListening));
    }

    #[test]
    fn test_detect_command_case_and_whitespace() {
        assert_eq!(detect_command("  Test Audio "), Some(ChatCommand::TestAudio));
        assert_eq!(detect_command("LISTEN"), Some(ChatCommand::Listen));
        assert_eq!(detect_command("NoVideo"), Some(ChatCommand::DisableVideo));
    }

    #[test]
    fn test_detect_command_rejects_partial_matches() {
        assert_eq!(detect_command("test audio please"), None);
        assert_eq!(detect_command("please listen"), None);
        assert_eq!(detect_command("videos"), None);
        assert_eq!(detect_command("listen."), None);
        assert_eq!(detect_command("stop"), None);
        assert_eq!(detect_command(""), None);
    }

    #[test]
    fn test_voice_stop_phrases() {
        assert!(is_voice_stop_phrase("stop"));
        assert!(is_voice_stop_phrase("Stop."));
        assert!(is_voice_stop_phrase("STOP LISTENING!"));
        assert!(is_voice_stop_phrase("exit"));
        assert!(is_voice_stop_phrase("quit?"));
        assert!(is_voice_stop_phrase("रुको।"));
        assert!(is_voice_stop_phrase(" बंद करो "));
    }

    #[test]
    fn test_voice_stop_phrases_partial_rejected() {
        assert!(!is_voice_stop_phrase("stopping"));
        assert!(!is_voice_stop_phrase("stop the music"));
        assert!(!is_voice_stop_phrase("exit strategy"));
        assert!(!is_voice_stop_phrase(""));
        assert!(!is_voice_stop_phrase("..."));
    }

    #[test]
    fn test_localized_prompts() {
        assert!(listening_prompt(LanguageTag::En).starts_with("I'm listening"));
        assert!(listening_stopped(LanguageTag::Hi).contains("बंद"));
    }
}
