//! Claude Code -> OpenClaw stream conversion.
//!
//! Two sequential passes over the input: [`detect`] finds the header values,
//! then every line is classified, normalized and written as it is read. The
//! only state that grows with the input is the [`IdMap`].

use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::jsonl::JsonlReader;
use crate::session::{
    short_id, IdMap, MessageBody, MessageEntry, ModelChange, OutputRecord, SessionHeader,
    SessionWriter,
};
use crate::timestamp;
use crate::transcript::{
    detect, is_command_noise, joined_text, normalize, Detection, ModelRef, Rejection, Role,
    SourceRecord, DEFAULT_MODEL, DEFAULT_PROVIDER,
};

/// Per-run conversion settings.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub session_id: String,
    /// Working directory recorded in the session header
    pub cwd: String,
    /// Drop local-command noise from user turns
    pub filter_commands: bool,
    /// Model announced when the transcript names none
    pub fallback_model: String,
    /// Provider for model ids without a `provider/` prefix
    pub default_provider: String,
}

impl ConvertOptions {
    pub fn new(session_id: impl Into<String>, cwd: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            cwd: cwd.into(),
            filter_commands: true,
            fallback_model: DEFAULT_MODEL.to_string(),
            default_provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    /// Message lines written
    pub converted: usize,
    /// Records rejected by type, role, noise or emptiness checks
    pub skipped: usize,
    /// Lines that were not valid JSON
    pub errors: usize,
    /// Short-id collisions observed
    pub collisions: usize,
    pub first_timestamp: String,
    pub model: ModelRef,
}

/// Convert the transcript at `input` into an OpenClaw session at `output`.
pub fn convert(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<ConvertStats> {
    let detection = detect(input, &opts.fallback_model)?;
    info!(
        model = %detection.model,
        first_timestamp = %detection.first_timestamp,
        "detected session header values"
    );

    let reader = JsonlReader::open(input)?;
    let file = fs::File::create(output)
        .with_context(|| format!("Failed to create file: {:?}", output))?;

    convert_lines(reader, BufWriter::new(file), &detection, opts)
        .with_context(|| format!("Failed to convert {:?}", input))
}

/// Convert an already-open transcript given the detected header values.
pub fn convert_reader<R: BufRead, W: Write>(
    input: R,
    output: W,
    detection: &Detection,
    opts: &ConvertOptions,
) -> Result<ConvertStats> {
    convert_lines(JsonlReader::new(input), output, detection, opts)
}

fn convert_lines<R: BufRead, W: Write>(
    lines: JsonlReader<R>,
    output: W,
    detection: &Detection,
    opts: &ConvertOptions,
) -> Result<ConvertStats> {
    let model = ModelRef::split(&detection.model, &opts.default_provider);
    let mut writer = SessionWriter::new(output);

    writer.write(&OutputRecord::Session(SessionHeader::new(
        &opts.session_id,
        &detection.first_timestamp,
        &opts.cwd,
        &model,
    )))?;
    writer.write(&OutputRecord::ModelChange(ModelChange::new(
        short_id(&format!("{}_model", opts.session_id)),
        &detection.first_timestamp,
        &model,
    )))?;

    let mut converter = RecordConverter::new(&detection.first_timestamp, opts.filter_commands);
    let mut stats = ConvertStats {
        converted: 0,
        skipped: 0,
        errors: 0,
        collisions: 0,
        first_timestamp: detection.first_timestamp.clone(),
        model,
    };

    for line in lines {
        let line = line.context("Failed to read line")?;
        let value = match line.parsed {
            Ok(value) => value,
            Err(e) => {
                debug!(line = line.number, error = %e, "unparsable line");
                stats.errors += 1;
                continue;
            }
        };

        match converter.convert(&value) {
            Ok(entry) => {
                writer.write(&OutputRecord::Message(entry))?;
                stats.converted += 1;
            }
            Err(rejection) => {
                debug!(line = line.number, reason = rejection.reason(), "skipped record");
                stats.skipped += 1;
            }
        }
    }

    debug!(lines = writer.lines(), "session written");
    writer.finish()?;
    stats.collisions = converter.ids.collisions();
    Ok(stats)
}

/// Converts single source records into message entries.
pub struct RecordConverter {
    ids: IdMap,
    fallback_timestamp: String,
    filter_commands: bool,
}

impl RecordConverter {
    /// `fallback_timestamp` is used for records that carry none.
    pub fn new(fallback_timestamp: &str, filter_commands: bool) -> Self {
        Self {
            ids: IdMap::new(),
            fallback_timestamp: fallback_timestamp.to_string(),
            filter_commands,
        }
    }

    /// Convert one parsed line, or say why it is skipped.
    pub fn convert(&mut self, value: &Value) -> Result<MessageEntry, Rejection> {
        let record = SourceRecord::new(value);
        let message = record.classify()?;
        let filter = self.filter_commands && message.role == Role::User;

        if filter {
            if let Some(raw) = message.content().as_str() {
                if is_command_noise(raw) {
                    return Err(Rejection::CommandNoise);
                }
            }
        }

        let content = normalize(message.content()).ok_or(Rejection::EmptyContent)?;

        if filter && is_command_noise(&joined_text(&content)) {
            return Err(Rejection::CommandNoise);
        }

        let id = match record.uuid() {
            Some(uuid) => self.ids.shorten(uuid),
            None => self.ids.shorten(&uuid::Uuid::new_v4().to_string()),
        };
        let parent_id = record.parent_uuid().map(|p| self.ids.shorten(p));
        let raw_ts = record
            .timestamp()
            .unwrap_or(self.fallback_timestamp.as_str())
            .to_string();

        let (model, message_id) = match message.role {
            Role::Assistant => (
                message.model().map(str::to_string),
                message.id().map(str::to_string),
            ),
            Role::User => (None, None),
        };

        Ok(MessageEntry {
            id,
            parent_id,
            message: MessageBody {
                role: message.role,
                content,
                timestamp: timestamp::to_epoch_millis(&raw_ts),
                model,
                id: message_id,
            },
            timestamp: raw_ts,
        })
    }

    /// Identifier map built so far.
    pub fn ids(&self) -> &IdMap {
        &self.ids
    }
}
