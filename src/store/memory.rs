use std::sync::Mutex;

use crate::store::models::ConversationTurn;
use crate::store::TranscriptStore;

/// In-memory transcript store for tests and embedders that do not want a
/// file on disk.
#[derive(Default)]
pub struct MemoryTranscriptStore {
    turns: Mutex<Vec<ConversationTurn>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptStore for MemoryTranscriptStore {
    fn append(&self, turn: ConversationTurn) -> bool {
        let mut turns = self.turns.lock().unwrap_or_else(|e| e.into_inner());
        turns.push(turn);
        true
    }

    fn list_all(&self) -> Vec<ConversationTurn> {
        let turns = self.turns.lock().unwrap_or_else(|e| e.into_inner());
        turns.clone()
    }
}
