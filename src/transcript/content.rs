//! Content normalization.
//!
//! Message content arrives either as a plain string or as a list of typed
//! blocks. OpenClaw always wants the list form, so everything is funnelled
//! into [`ContentBlock`]s here. Normalization never fails: malformed blocks
//! degrade to the closest reasonable shape and unknown block types are carried
//! through verbatim.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// One element of a normalized content list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        signature: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: Value,
    },
    /// Unrecognized block, emitted exactly as read.
    #[serde(untagged)]
    Other(Value),
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Text carried by a `text` block, `None` for every other variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Normalize raw message content into an ordered block list.
///
/// Returns `None` when nothing survives: empty or whitespace-only strings,
/// lists whose blocks are all dropped, and any non-string, non-list value.
pub fn normalize(content: &Value) -> Option<Vec<ContentBlock>> {
    let blocks = match content {
        Value::String(s) => {
            if s.trim().is_empty() {
                return None;
            }
            vec![ContentBlock::text(s.as_str())]
        }
        Value::Array(items) => items.iter().filter_map(normalize_block).collect(),
        _ => return None,
    };

    if blocks.is_empty() {
        None
    } else {
        Some(blocks)
    }
}

/// Space-joined text of every `text` block, used for the second noise check.
pub fn joined_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(ContentBlock::as_text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_block(block: &Value) -> Option<ContentBlock> {
    let obj = match block {
        Value::Object(obj) => obj,
        // A bare string inside a list is read as a text block
        Value::String(s) => return text_block(s),
        _ => return None,
    };

    match obj.get("type") {
        None => text_block(str_field(obj, "text")),
        Some(Value::String(kind)) => match kind.as_str() {
            "text" => text_block(str_field(obj, "text")),
            "thinking" => Some(ContentBlock::Thinking {
                thinking: str_field(obj, "thinking").to_string(),
                signature: str_field(obj, "signature").to_string(),
            }),
            "tool_use" => Some(ContentBlock::ToolUse {
                id: str_field(obj, "id").to_string(),
                name: str_field(obj, "name").to_string(),
                input: obj.get("input").cloned().unwrap_or_else(|| json!({})),
            }),
            "tool_result" => Some(ContentBlock::ToolResult {
                tool_use_id: str_field(obj, "tool_use_id").to_string(),
                content: tool_result_content(obj.get("content")),
            }),
            _ => Some(ContentBlock::Other(block.clone())),
        },
        Some(_) => Some(ContentBlock::Other(block.clone())),
    }
}

fn text_block(text: &str) -> Option<ContentBlock> {
    if text.trim().is_empty() {
        None
    } else {
        Some(ContentBlock::text(text))
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Reduce `tool_result.content` to list form.
///
/// Strings become a single text block, nested text blocks are reduced to
/// `{type, text}`, other nested blocks pass through. Falsy content (null,
/// empty string/list/object, `false`, `0`) is read as an empty string.
fn tool_result_content(content: Option<&Value>) -> Value {
    let content = match content {
        Some(v) if !is_falsy(v) => v,
        _ => return json!([{"type": "text", "text": ""}]),
    };

    match content {
        Value::String(s) => json!([{"type": "text", "text": s}]),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item.get("type").and_then(Value::as_str) {
                    Some("text") => json!({
                        "type": "text",
                        "text": item.get("text").and_then(Value::as_str).unwrap_or(""),
                    }),
                    _ => item.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
