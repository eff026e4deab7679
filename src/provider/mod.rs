//! Response provider boundary
//!
//! The orchestrator hands each accepted submission to a [`ResponseProvider`]
//! and treats any error it returns as a recoverable failure.

pub mod canned;

pub use canned::CannedResponseProvider;

use crate::language::LanguageTag;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A submission tagged with its detected language
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
    pub language: LanguageTag,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub language: LanguageTag,
}

impl Reply {
    pub fn new(text: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

/// Produces the assistant's answer to one submission
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    async fn reply(&self, request: ReplyRequest) -> anyhow::Result<Reply>;
}
