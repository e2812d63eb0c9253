use crate::model::Chunk;
use std::path::PathBuf;

pub mod archive;
pub mod chunks;
pub mod files;
pub mod init;
pub mod preview;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
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
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub chunks: Vec<Chunk>,
    pub text: Option<String>,
    pub directory: Option<PathBuf>,
    pub paths: Vec<PathBuf>,
    pub archive: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_chunks(mut self, chunks: Vec<Chunk>) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_directory(mut self, directory: PathBuf) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_archive(mut self, archive: PathBuf) -> Self {
        self.archive = Some(archive);
        self
    }
}

/// Message for a job whose frame range produced no chunks.
pub(crate) fn no_chunks_message() -> CmdMessage {
    CmdMessage::warning("No chunks to render: legacy bounds skip ranges where first + step >= last.")
}
