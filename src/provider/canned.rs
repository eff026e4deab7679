use super::{Reply, ReplyRequest, ResponseProvider};
use crate::language::LanguageTag;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Keyword topics the demo provider knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Topic {
    Voice,
    Video,
    General,
}

impl Topic {
    fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

        if mentions(&["voice", "listen", "speak", "आवाज़", "आवाज", "बोल"]) {
            Topic::Voice
        } else if mentions(&["video", "avatar", "वीडियो"]) {
            Topic::Video
        } else {
            Topic::General
        }
    }

    fn answer(&self, language: LanguageTag) -> &'static str {
        match (self, language) {
            (Topic::Voice, LanguageTag::En) => {
                "Say \"listen\" and I will keep listening after every answer. Say \"stop listening\" to end hands-free mode."
            }
            (Topic::Voice, LanguageTag::Hi) => {
                "\"listen\" कहिए और मैं हर उत्तर के बाद सुनता रहूँगा। रोकने के लिए \"रुको\" कहिए।"
            }
            (Topic::Video, LanguageTag::En) => {
                "The avatar plays while I speak. Type \"novideo\" to turn it off or \"video\" to bring it back."
            }
            (Topic::Video, LanguageTag::Hi) => {
                "जब मैं बोलता हूँ तब अवतार वीडियो चलता है। इसे बंद करने के लिए \"novideo\" लिखें।"
            }
            (Topic::General, LanguageTag::En) => {
                "Thanks for your question. This demo answers with canned replies, but your message was received."
            }
            (Topic::General, LanguageTag::Hi) => {
                "आपके प्रश्न के लिए धन्यवाद। यह डेमो तैयार उत्तर देता है, लेकिन आपका संदेश मिल गया है।"
            }
        }
    }
}

/// Demo provider answering from a small keyword table after a fixed delay
#[derive(Clone, Debug)]
pub struct CannedResponseProvider {
    latency: Duration,
}

impl Default for CannedResponseProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}

impl CannedResponseProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ResponseProvider for CannedResponseProvider {
    async fn reply(&self, request: ReplyRequest) -> anyhow::Result<Reply> {
        tokio::time::sleep(self.latency).await;
        let topic = Topic::classify(&request.text);
        debug!("Canned reply for topic {:?} in {}", topic, request.language);
        Ok(Reply::new(topic.answer(request.language), request.language))
    }
}
