//! Voice catalog entries, per-language tuning and the selection policy

use crate::language::LanguageTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A synthesis voice offered by the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Display name, often carrying persona hints ("Samantha Female")
    pub name: String,
    /// BCP-47 style locale ("hi-IN", "en_US")
    pub locale: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
        }
    }

    /// Locale with `_` separators normalized to `-`
    fn normalized_locale(&self) -> String {
        self.locale.replace('_', "-")
    }
}

/// Rate, pitch and narrator preference for one language
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceProfile {
    /// Speech rate (1.0 = platform normal)
    pub rate: f32,
    /// Voice pitch (1.0 = platform normal)
    pub pitch: f32,
    /// Substring of a voice name that marks the default narrator persona
    pub persona_hint: Option<String>,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            persona_hint: None,
        }
    }
}

/// Voice tuning table keyed by language
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceProfiles {
    pub en: VoiceProfile,
    pub hi: VoiceProfile,
}

impl Default for VoiceProfiles {
    fn default() -> Self {
        Self {
            en: VoiceProfile {
                persona_hint: Some("Female".to_string()),
                ..VoiceProfile::default()
            },
            // Slightly slower and higher for Devanagari phonemes
            hi: VoiceProfile {
                rate: 0.9,
                pitch: 1.1,
                persona_hint: None,
            },
        }
    }
}

impl VoiceProfiles {
    pub fn get(&self, language: LanguageTag) -> &VoiceProfile {
        match language {
            LanguageTag::En => &self.en,
            LanguageTag::Hi => &self.hi,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LanguageTag, &VoiceProfile)> {
        [(LanguageTag::En, &self.en), (LanguageTag::Hi, &self.hi)].into_iter()
    }
}

/// Which rule picked the voice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceMatch {
    ExactLocale,
    LanguagePrefix,
    Country,
    Persona,
    PlatformDefault,
}

impl fmt::Display for VoiceMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceMatch::ExactLocale => write!(f, "exact locale"),
            VoiceMatch::LanguagePrefix => write!(f, "language prefix"),
            VoiceMatch::Country => write!(f, "country"),
            VoiceMatch::Persona => write!(f, "persona"),
            VoiceMatch::PlatformDefault => write!(f, "platform default"),
        }
    }
}

/// Outcome of voice selection; `voice` is `None` for the platform default
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceSelection {
    pub voice: Option<Voice>,
    pub matched: VoiceMatch,
}

impl VoiceSelection {
    fn found(voice: &Voice, matched: VoiceMatch) -> Self {
        Self {
            voice: Some(voice.clone()),
            matched,
        }
    }

    fn platform_default() -> Self {
        Self {
            voice: None,
            matched: VoiceMatch::PlatformDefault,
        }
    }
}

/// Pick a voice for `language` from the catalog
///
/// Hindi walks exact locale, language prefix, then country code. Other
/// languages look for the persona hint among voices of that language.
/// First match wins; nothing matching means the platform default.
pub fn select_voice(
    catalog: &[Voice],
    language: LanguageTag,
    profile: &VoiceProfile,
) -> VoiceSelection {
    match language {
        LanguageTag::Hi => {
            let locale = language.locale();
            if let Some(voice) = catalog.iter().find(|v| v.normalized_locale() == locale) {
                return VoiceSelection::found(voice, VoiceMatch::ExactLocale);
            }
            if let Some(voice) = catalog
                .iter()
                .find(|v| v.normalized_locale().starts_with(language.code()))
            {
                return VoiceSelection::found(voice, VoiceMatch::LanguagePrefix);
            }
            if let Some(voice) = catalog
                .iter()
                .find(|v| v.normalized_locale().contains(language.country()))
            {
                return VoiceSelection::found(voice, VoiceMatch::Country);
            }
            VoiceSelection::platform_default()
        }
        _ => {
            let Some(hint) = profile.persona_hint.as_deref() else {
                return VoiceSelection::platform_default();
            };
            catalog
                .iter()
                .find(|v| v.normalized_locale().contains(language.code()) && v.name.contains(hint))
                .map(|v| VoiceSelection::found(v, VoiceMatch::Persona))
                .unwrap_or_else(VoiceSelection::platform_default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("Alex", "en-US"),
            Voice::new("Samantha Female", "en-US"),
            Voice::new("Rishi", "en-IN"),
            Voice::new("Hindi Generic", "hi"),
            Voice::new("Lekha", "hi-IN"),
        ]
    }

    #[test]
    fn test_hindi_prefers_exact_locale() {
        let profiles = VoiceProfiles::default();
        let selection = select_voice(&catalog(), LanguageTag::Hi, profiles.get(LanguageTag::Hi));
        assert_eq!(selection.matched, VoiceMatch::ExactLocale);
        assert_eq!(selection.voice.unwrap().name, "Lekha");
    }

    #[test]
    fn test_hindi_falls_back_to_prefix() {
        let voices: Vec<_> = catalog().into_iter().filter(|v| v.locale != "hi-IN").collect();
        let selection = select_voice(&voices, LanguageTag::Hi, &VoiceProfile::default());
        assert_eq!(selection.matched, VoiceMatch::LanguagePrefix);
        assert_eq!(selection.voice.unwrap().name, "Hindi Generic");
    }

    #[test]
    fn test_hindi_falls_back_to_country() {
        let voices: Vec<_> = catalog()
            .into_iter()
            .filter(|v| !v.locale.starts_with("hi"))
            .collect();
        let selection = select_voice(&voices, LanguageTag::Hi, &VoiceProfile::default());
        assert_eq!(selection.matched, VoiceMatch::Country);
        assert_eq!(selection.voice.unwrap().name, "Rishi");
    }

    #[test]
    fn test_hindi_platform_default() {
        let voices = vec![Voice::new("Alex", "en-US")];
        let selection = select_voice(&voices, LanguageTag::Hi, &VoiceProfile::default());
        assert_eq!(selection.matched, VoiceMatch::PlatformDefault);
        assert!(selection.voice.is_none());
    }

    #[test]
    fn test_underscore_locales_match() {
        let voices = vec![Voice::new("Android Hindi", "hi_IN")];
        let selection = select_voice(&voices, LanguageTag::Hi, &VoiceProfile::default());
        assert_eq!(selection.matched, VoiceMatch::ExactLocale);
    }

    #[test]
    fn test_english_prefers_persona() {
        let profiles = VoiceProfiles::default();
        let selection = select_voice(&catalog(), LanguageTag::En, profiles.get(LanguageTag::En));
        assert_eq!(selection.matched, VoiceMatch::Persona);
        assert_eq!(selection.voice.unwrap().name, "Samantha Female");
    }

    #[test]
    fn test_english_without_persona_match_uses_default() {
        let profiles = VoiceProfiles::default();
        let voices = vec![Voice::new("Alex", "en-US"), Voice::new("Female Lekha", "hi-IN")];
        let selection = select_voice(&voices, LanguageTag::En, profiles.get(LanguageTag::En));
        assert_eq!(selection.matched, VoiceMatch::PlatformDefault);
    }

    #[test]
    fn test_empty_catalog() {
        let profiles = VoiceProfiles::default();
        for (language, profile) in profiles.iter() {
            let selection = select_voice(&[], language, profile);
            assert!(selection.voice.is_none());
        }
    }

    #[test]
    fn test_default_profiles() {
        let profiles = VoiceProfiles::default();
        assert_eq!(profiles.get(LanguageTag::Hi).rate, 0.9);
        assert_eq!(profiles.get(LanguageTag::Hi).pitch, 1.1);
        assert_eq!(profiles.get(LanguageTag::En).rate, 1.0);
    }
}
