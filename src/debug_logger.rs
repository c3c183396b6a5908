// Decision journal: asynchronous JSONL logging of every /move answer
//
// Writes are fire-and-forget so the request/response cycle never waits on disk.
// Each line is a JournalEntry that the replay tooling can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::engine::Decision;
use crate::selector::SelectionTier;
use crate::types::{Battlesnake, Board};

/// One journaled decision
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JournalEntry {
    pub turn: i32,
    #[serde(default)]
    pub game_id: String,
    pub chosen_move: String,
    #[serde(default)]
    pub tier: Option<SelectionTier>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub safety: Option<usize>,
    pub board: Board,
    pub you: Battlesnake,
    pub timestamp: String,
}

impl JournalEntry {
    pub fn new(game_id: &str, turn: i32, board: Board, you: Battlesnake, decision: &Decision) -> Self {
        JournalEntry {
            turn,
            game_id: game_id.to_string(),
            chosen_move: decision.direction.as_str().to_string(),
            tier: Some(decision.tier),
            score: decision.score(),
            safety: decision.safety(),
            board,
            you,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Journals a decision asynchronously (fire-and-forget)
    /// Must be called from within a tokio runtime
    pub fn log_decision(&self, entry: JournalEntry) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Journals a decision and waits for the write to finish
    pub async fn log_decision_now(&self, entry: JournalEntry) {
        if self.enabled {
            Self::write_entry(self.file.clone(), entry).await;
        }
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: JournalEntry) {
        let mut file_guard = file_handle.lock().await;

        let Some(file) = file_guard.as_mut() else {
            return;
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush().await {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
