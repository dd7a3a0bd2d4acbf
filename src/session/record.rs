//! OpenClaw session line types and writer.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::transcript::{ContentBlock, ModelRef, Role};

/// Session file format version written in the header.
pub const SESSION_VERSION: u32 = 3;

/// One line of an OpenClaw session file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputRecord {
    Session(SessionHeader),
    ModelChange(ModelChange),
    Message(MessageEntry),
}

/// First line: identifies the session and its model.
#[derive(Debug, Clone, Serialize)]
pub struct SessionHeader {
    pub version: u32,
    pub id: String,
    pub timestamp: String,
    pub cwd: String,
    pub model: String,
}

impl SessionHeader {
    pub fn new(session_id: &str, timestamp: &str, cwd: &str, model: &ModelRef) -> Self {
        Self {
            version: SESSION_VERSION,
            id: session_id.to_string(),
            timestamp: timestamp.to_string(),
            cwd: cwd.to_string(),
            model: model.to_string(),
        }
    }
}

/// Second line: initial model selection, a root of the message graph.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChange {
    pub id: String,
    pub parent_id: Option<String>,
    pub timestamp: String,
    pub provider: String,
    pub model_id: String,
}

impl ModelChange {
    pub fn new(id: String, timestamp: &str, model: &ModelRef) -> Self {
        Self {
            id,
            parent_id: None,
            timestamp: timestamp.to_string(),
            provider: model.provider.clone(),
            model_id: model.model_id.clone(),
        }
    }
}

/// A converted conversation turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    pub id: String,
    pub parent_id: Option<String>,
    /// Original ISO timestamp string
    pub timestamp: String,
    pub message: MessageBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub role: Role,
    pub content: Vec<ContentBlock>,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Writes compact, newline-terminated session lines.
///
/// Each record is serialized in full before anything reaches the writer, so a
/// failure never leaves a partial line behind.
pub struct SessionWriter<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> SessionWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn write(&mut self, record: &OutputRecord) -> Result<()> {
        let mut line = serde_json::to_string(record).context("Failed to serialize record")?;
        line.push('\n');
        self.out
            .write_all(line.as_bytes())
            .context("Failed to write record")?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().context("Failed to flush output")?;
        Ok(self.out)
    }
}
