pub mod file;
pub mod memory;
pub mod models;

pub use file::FileTranscriptStore;
pub use memory::MemoryTranscriptStore;
pub use models::ConversationTurn;

/// Append-only persistence for conversation turns.
///
/// Implementations never raise: failures are logged for operators and
/// reported through return values so callers can degrade gracefully.
pub trait TranscriptStore: Send + Sync {
    /// Persist one turn. Returns false if the turn could not be written.
    fn append(&self, turn: ConversationTurn) -> bool;

    /// All turns in storage order, oldest first. Empty on any read error.
    fn list_all(&self) -> Vec<ConversationTurn>;

    fn get_by_id(&self, id: &str) -> Option<ConversationTurn> {
        self.list_all().into_iter().find(|turn| turn.id == id)
    }
}
