//! Read-only view over one Claude Code transcript line.
//!
//! Records are kept as untyped `serde_json::Value`s: the source schema is
//! loose, and every accessor here tolerates absent or wrongly-typed fields.

use serde::Serialize;
use serde_json::{Map, Value};

use super::content::is_falsy;

static NULL: Value = Value::Null;

/// Conversation role of an accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// Why a record was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `type` is not `user`/`assistant` (system, progress, snapshots, ...)
    UnsupportedType,
    /// Truthy `isMeta`
    Meta,
    /// `message` missing or not an object
    MissingMessage,
    /// `message.role` absent or different from `type`
    RoleMismatch,
    /// Local command transcript artifact
    CommandNoise,
    /// Nothing left after content normalization
    EmptyContent,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::UnsupportedType => "unsupported record type",
            Rejection::Meta => "meta record",
            Rejection::MissingMessage => "missing message",
            Rejection::RoleMismatch => "role does not match type",
            Rejection::CommandNoise => "local command noise",
            Rejection::EmptyContent => "empty content",
        }
    }
}

/// A parsed source line.
#[derive(Debug, Clone, Copy)]
pub struct SourceRecord<'a> {
    value: &'a Value,
}

impl<'a> SourceRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// The `type` discriminator, if it is a string.
    pub fn record_type(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    /// Any truthy `isMeta` marks the record as meta.
    pub fn is_meta(&self) -> bool {
        self.value.get("isMeta").is_some_and(|v| !is_falsy(v))
    }

    pub fn uuid(&self) -> Option<&'a str> {
        self.str_field("uuid")
    }

    pub fn parent_uuid(&self) -> Option<&'a str> {
        self.str_field("parentUuid").filter(|s| !s.is_empty())
    }

    pub fn timestamp(&self) -> Option<&'a str> {
        self.str_field("timestamp").filter(|s| !s.is_empty())
    }

    pub fn message(&self) -> Option<&'a Map<String, Value>> {
        self.value.get("message").and_then(Value::as_object)
    }

    /// `message.model` on assistant records.
    pub fn model(&self) -> Option<&'a str> {
        self.message()
            .and_then(|m| m.get("model"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Classify the record, returning the accepted message when it should be
    /// converted.
    pub fn classify(&self) -> Result<MessageView<'a>, Rejection> {
        let role = self
            .record_type()
            .and_then(Role::parse)
            .ok_or(Rejection::UnsupportedType)?;

        if self.is_meta() {
            return Err(Rejection::Meta);
        }

        let message = self.message().ok_or(Rejection::MissingMessage)?;

        let inner_role = message
            .get("role")
            .and_then(Value::as_str)
            .and_then(Role::parse);
        if inner_role != Some(role) {
            return Err(Rejection::RoleMismatch);
        }

        Ok(MessageView { role, message })
    }
}

/// The `message` object of an accepted record.
#[derive(Debug, Clone, Copy)]
pub struct MessageView<'a> {
    pub role: Role,
    message: &'a Map<String, Value>,
}

impl<'a> MessageView<'a> {
    /// Raw `content`: a string, a block list, or anything else.
    pub fn content(&self) -> &'a Value {
        self.message.get("content").unwrap_or(&NULL)
    }

    fn non_empty(&self, key: &str) -> Option<&'a str> {
        self.message
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn model(&self) -> Option<&'a str> {
        self.non_empty("model")
    }

    /// Provider-side message id (`msg_...`).
    pub fn id(&self) -> Option<&'a str> {
        self.non_empty("id")
    }
}
