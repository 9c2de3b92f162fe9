use crate::apply::ApplyStats;
use chrono::{DateTime, Utc};

pub mod config;
pub mod init;
pub mod pull;
pub mod push;
pub mod status;
pub mod sync;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Local edits uploaded by a push.
    pub pushed: usize,
    /// Vault mutations performed by a pull.
    pub stats: ApplyStats,
    /// Completion instant of a fully successful sync cycle; the caller
    /// persists it as the new last-sync timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn merge(&mut self, other: CmdResult) {
        self.pushed += other.pushed;
        self.stats.created += other.stats.created;
        self.stats.updated += other.stats.updated;
        self.stats.renamed += other.stats.renamed;
        self.stats.deleted += other.stats.deleted;
        self.messages.extend(other.messages);
    }
}
