use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use crate::store::models::ConversationTurn;
use crate::store::TranscriptStore;

/// Whole-file JSON transcript log.
///
/// Every append re-reads the full array and rewrites the file. Two
/// concurrent appends race on that cycle and the last writer wins; this is
/// an accepted limitation of the low-volume single-process deployments the
/// store targets, not something it tries to hide.
pub struct FileTranscriptStore {
    path: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_log_file(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            fs::write(&self.path, "[]")?;
        }
        Ok(())
    }

    fn read_turns(&self) -> Vec<ConversationTurn> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to read chat log {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(turns) => turns,
            Err(e) => {
                error!(
                    "Chat log {} is not valid JSON, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn append(&self, turn: ConversationTurn) -> bool {
        if let Err(e) = self.ensure_log_file() {
            error!("Failed to initialize chat log {}: {}", self.path.display(), e);
            return false;
        }

        // A read failure degrades to an empty collection so the write path
        // stays available; prior entries are then invisible to this rewrite.
        let mut turns = self.read_turns();
        let id = turn.id.clone();
        turns.push(turn);

        let serialized = match serde_json::to_string_pretty(&turns) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to serialize chat log: {}", e);
                return false;
            }
        };

        match fs::write(&self.path, serialized) {
            Ok(()) => {
                info!("Chat log saved with ID: {}", id);
                true
            }
            Err(e) => {
                error!("Failed to write chat log {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn list_all(&self) -> Vec<ConversationTurn> {
        if let Err(e) = self.ensure_log_file() {
            error!("Failed to initialize chat log {}: {}", self.path.display(), e);
            return Vec::new();
        }
        self.read_turns()
    }
}
