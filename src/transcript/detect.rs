//! Header discovery pass.
//!
//! The OpenClaw session header must name the model before any message line is
//! written, but the model only shows up on the first assistant turn. A cheap
//! forward scan finds it (plus the first timestamp) without holding the file.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::record::SourceRecord;
use crate::jsonl::JsonlReader;
use crate::timestamp;

/// Model used when no assistant turn announces one.
pub const DEFAULT_MODEL: &str = "claude-opus-4-6";

/// Provider used when the model id carries no `provider/` prefix.
pub const DEFAULT_PROVIDER: &str = "anthropic";

/// Stream-level values discovered by [`detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// First `timestamp` seen on any record, or now when none exists
    pub first_timestamp: String,
    /// First `message.model` of an assistant record, or the fallback
    pub model: String,
}

/// Scan a transcript file for its first timestamp and model.
pub fn detect<P: AsRef<Path>>(path: P, fallback_model: &str) -> Result<Detection> {
    let path = path.as_ref();
    let reader = JsonlReader::open(path)?;
    detect_lines(reader, fallback_model)
        .with_context(|| format!("Failed to scan {:?}", path))
}

/// Same as [`detect`], over any buffered reader.
pub fn detect_reader<R: BufRead>(reader: R, fallback_model: &str) -> Result<Detection> {
    detect_lines(JsonlReader::new(reader), fallback_model)
}

fn detect_lines<R: BufRead>(lines: JsonlReader<R>, fallback_model: &str) -> Result<Detection> {
    let mut first_timestamp: Option<String> = None;
    let mut model: Option<String> = None;

    for line in lines {
        let line = line.context("Failed to read line")?;
        let Ok(value) = line.parsed else {
            debug!(line = line.number, "skipping unparsable line during detection");
            continue;
        };
        let record = SourceRecord::new(&value);

        if first_timestamp.is_none() {
            first_timestamp = record.timestamp().map(str::to_string);
        }

        if model.is_none() && record.record_type() == Some("assistant") {
            model = record.model().map(str::to_string);
        }

        if first_timestamp.is_some() && model.is_some() {
            break;
        }
    }

    Ok(Detection {
        first_timestamp: first_timestamp.unwrap_or_else(timestamp::now_iso),
        model: model.unwrap_or_else(|| fallback_model.to_string()),
    })
}

/// A model id split into provider and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub provider: String,
    pub model_id: String,
}

impl ModelRef {
    /// Split `provider/model` on the first `/`; bare ids get `default_provider`.
    pub fn split(model: &str, default_provider: &str) -> Self {
        match model.split_once('/') {
            Some((provider, model_id)) => Self {
                provider: provider.to_string(),
                model_id: model_id.to_string(),
            },
            None => Self {
                provider: default_provider.to_string(),
                model_id: model.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model_id)
    }
}
