//! Script-based language detection
//!
//! The detector only looks at literal text. Any Devanagari codepoint makes
//! the whole string Hindi, whatever the majority script is.

use crate::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of a turn, a reply request or an utterance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    #[default]
    En,
    Hi,
}

impl LanguageTag {
    /// Short language code (`en`, `hi`)
    pub fn code(&self) -> &'static str {
        match self {
            LanguageTag::En => "en",
            LanguageTag::Hi => "hi",
        }
    }

    /// Locale requested from the synthesizer
    pub fn locale(&self) -> &'static str {
        match self {
            LanguageTag::En => "en-US",
            LanguageTag::Hi => "hi-IN",
        }
    }

    /// Country code used as the last voice fallback
    pub fn country(&self) -> &'static str {
        match self {
            LanguageTag::En => "US",
            LanguageTag::Hi => "IN",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LanguageTag {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        let code = lowered.split(['-', '_']).next().unwrap_or_default();
        match code {
            "en" => Ok(LanguageTag::En),
            "hi" => Ok(LanguageTag::Hi),
            _ => Err(ChatError::ConfigError(format!("Unknown language tag: {}", s))),
        }
    }
}

/// Check if a character lies in the Devanagari block (U+0900..=U+097F)
pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// Classify text into a language tag
pub fn detect(text: &str) -> LanguageTag {
    if text.chars().any(is_devanagari) {
        LanguageTag::Hi
    } else {
        LanguageTag::En
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_empty_is_english() {
        assert_eq!(detect(""), LanguageTag::En);
        assert_eq!(detect("   "), LanguageTag::En);
    }

    #[test]
    fn test_detect_devanagari() {
        assert_eq!(detect("नमस्ते"), LanguageTag::Hi);
        assert_eq!(detect("रुको"), LanguageTag::Hi);
    }

    #[test]
    fn test_detect_mixed_script_prefers_devanagari() {
        // A single Devanagari codepoint outweighs any amount of Latin text
        assert_eq!(
            detect("please tell me about the report for this quarter क"),
            LanguageTag::Hi
        );
        assert_eq!(detect("GST जीएसटी"), LanguageTag::Hi);
    }

    #[test]
    fn test_detect_other_scripts_are_english() {
        assert_eq!(detect("hello world"), LanguageTag::En);
        assert_eq!(detect("こんにちは"), LanguageTag::En);
        assert_eq!(detect("বাংলা"), LanguageTag::En);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let samples = ["", "abc", "नमस्ते world", "123 !?"];
        for sample in samples {
            assert_eq!(detect(sample), detect(sample));
            assert_eq!(
                detect(sample) == LanguageTag::Hi,
                sample.chars().any(is_devanagari)
            );
        }
    }

    #[test]
    fn test_block_boundaries() {
        assert!(is_devanagari('\u{0900}'));
        assert!(is_devanagari('\u{097F}'));
        assert!(!is_devanagari('\u{08FF}'));
        assert!(!is_devanagari('\u{0980}'));
    }

    #[test]
    fn test_tag_codes() {
        assert_eq!(LanguageTag::Hi.locale(), "hi-IN");
        assert_eq!(LanguageTag::En.locale(), "en-US");
        assert_eq!(LanguageTag::Hi.country(), "IN");
        assert_eq!(LanguageTag::default(), LanguageTag::En);
        assert_eq!(LanguageTag::Hi.to_string(), "hi");
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("hi".parse::<LanguageTag>().unwrap(), LanguageTag::Hi);
        assert_eq!("hi-IN".parse::<LanguageTag>().unwrap(), LanguageTag::Hi);
        assert_eq!("EN_us".parse::<LanguageTag>().unwrap(), LanguageTag::En);
        assert!("fr".parse::<LanguageTag>().is_err());
    }
}
