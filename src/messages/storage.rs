use super::types::Turn;
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only conversation log consumed for display
pub trait MessageStore: Send + Sync {
    fn append(&self, turn: Turn);

    /// All turns in append order
    fn all(&self) -> Vec<Turn>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct MessageStorage {
    turns: Arc<RwLock<Vec<Turn>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            turns: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Render the log as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.turns.read())
    }
}

impl MessageStore for MessageStorage {
    fn append(&self, turn: Turn) {
        self.turns.write().push(turn);
    }

    fn all(&self) -> Vec<Turn> {
        self.turns.read().clone()
    }

    fn len(&self) -> usize {
        self.turns.read().len()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}
