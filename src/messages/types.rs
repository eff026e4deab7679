use crate::language::{detect, LanguageTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// One role-tagged message in the conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub language: LanguageTag,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            language,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        let text = text.into();
        let language = detect(&text);
        Self::new(Role::User, text, language)
    }

    pub fn assistant(text: impl Into<String>, language: LanguageTag) -> Self {
        Self::new(Role::Assistant, text, language)
    }

    pub fn system(text: impl Into<String>) -> Self {
        let text = text.into();
        let language = detect(&text);
        Self::new(Role::System, text, language)
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_detects_language() {
        assert_eq!(Turn::user("hello").language, LanguageTag::En);
        assert_eq!(Turn::user("नमस्ते").language, LanguageTag::Hi);
    }

    #[test]
    fn test_assistant_turn_keeps_reply_language() {
        let turn = Turn::assistant("plain latin text", LanguageTag::Hi);
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.language, LanguageTag::Hi);
    }

    #[test]
    fn test_turns_have_distinct_ids() {
        let a = Turn::system("one");
        let b = Turn::system("one");
        assert_ne!(a.id, b.id);
        assert!(a.is_system());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::user("hi")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"language\":\"en\""));
    }
}
