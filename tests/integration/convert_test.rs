//! End-to-end conversion through the library API

use std::fs;

use claw_import::session::short_id;
use claw_import::transcript::detect::{detect_reader, DEFAULT_MODEL};
use claw_import::{convert, validate, ConvertOptions};
use serde_json::json;

use crate::helpers::{load_fixture, read_lines, temp_fixture, write_transcript};

const SCENARIO: &str = r#"{"type":"user","message":{"role":"user","content":"hello"},"uuid":"u1","timestamp":"2024-01-01T00:00:00Z"}
{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"hi"}],"model":"anthropic/claude-3"},"uuid":"u2","parentUuid":"u1","timestamp":"2024-01-01T00:00:01Z"}
"#;

fn options() -> ConvertOptions {
    ConvertOptions::new("sess-1", "/home/user")
}

// ============================================================================
// Two-message scenario
// ============================================================================

#[test]
fn scenario_converts_two_messages() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_transcript(dir.path(), "in.jsonl", SCENARIO);
    let output = dir.path().join("out.jsonl");

    let stats = convert(&input, &output, &options()).unwrap();

    assert_eq!(stats.converted, 2);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.model.provider, "anthropic");
    assert_eq!(stats.model.model_id, "claude-3");
    assert_eq!(stats.first_timestamp, "2024-01-01T00:00:00Z");

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        json!({
            "type": "session",
            "version": 3,
            "id": "sess-1",
            "timestamp": "2024-01-01T00:00:00Z",
            "cwd": "/home/user",
            "model": "anthropic/claude-3"
        })
    );
    assert_eq!(
        lines[1],
        json!({
            "type": "model_change",
            "id": short_id("sess-1_model"),
            "parentId": null,
            "timestamp": "2024-01-01T00:00:00Z",
            "provider": "anthropic",
            "modelId": "claude-3"
        })
    );
    assert_eq!(
        lines[2],
        json!({
            "type": "message",
            "id": short_id("u1"),
            "parentId": null,
            "timestamp": "2024-01-01T00:00:00Z",
            "message": {
                "role": "user",
                "content": [{"type": "text", "text": "hello"}],
                "timestamp": 1_704_067_200_000i64
            }
        })
    );
    assert_eq!(
        lines[3],
        json!({
            "type": "message",
            "id": short_id("u2"),
            "parentId": short_id("u1"),
            "timestamp": "2024-01-01T00:00:01Z",
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": "hi"}],
                "timestamp": 1_704_067_201_000i64,
                "model": "anthropic/claude-3"
            }
        })
    );

    assert_eq!(validate(&output).unwrap(), 4);
}

// ============================================================================
// Realistic Claude Code transcript
// ============================================================================

#[test]
fn realistic_session_with_filtering() {
    let (dir, input) = temp_fixture("session.jsonl");
    let output = dir.path().join("out.jsonl");

    let stats = convert(&input, &output, &options()).unwrap();

    assert_eq!(stats.converted, 5);
    assert_eq!(stats.skipped, 7);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.model.model_id, "claude-sonnet-4-20250514");
    assert_eq!(stats.model.provider, "anthropic");
    assert_eq!(stats.first_timestamp, "2025-06-01T09:00:00.000Z");

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0]["model"], "anthropic/claude-sonnet-4-20250514");

    // Headers share the first timestamp of the whole file
    assert_eq!(lines[0]["timestamp"], lines[1]["timestamp"]);

    let assistant = &lines[3];
    assert_eq!(assistant["message"]["role"], "assistant");
    assert_eq!(assistant["message"]["id"], "msg_01ABC");
    assert_eq!(assistant["message"]["model"], "claude-sonnet-4-20250514");
    assert_eq!(
        assistant["message"]["content"],
        json!([
            {"type": "thinking", "thinking": "Look at the router first.", "signature": "sig=="},
            {"type": "text", "text": "I'll look at the router."},
            {"type": "tool_use", "id": "toolu_01", "name": "Read", "input": {"file_path": "/work/app/src/router.rs"}}
        ])
    );

    let tool_result = &lines[4];
    assert_eq!(
        tool_result["message"]["content"],
        json!([{
            "type": "tool_result",
            "tool_use_id": "toolu_01",
            "content": [{"type": "text", "text": "pub fn router() -> Router { Router::new() }"}]
        }])
    );

    // Blank text block dropped from the second assistant turn
    assert_eq!(
        lines[5]["message"]["content"],
        json!([{"type": "text", "text": "Added `GET /health` returning 200."}])
    );

    assert_eq!(lines[6]["message"]["content"][0]["text"], "Thanks!");
}

#[test]
fn parent_chain_is_preserved() {
    let (dir, input) = temp_fixture("session.jsonl");
    let output = dir.path().join("out.jsonl");
    convert(&input, &output, &options()).unwrap();

    let lines = read_lines(&output);
    let messages = &lines[2..];
    // user -> assistant -> tool result -> assistant
    assert_eq!(messages[0]["parentId"], json!(null));
    for pair in messages[..4].windows(2) {
        assert_eq!(pair[1]["parentId"], pair[0]["id"]);
    }
    // "Thanks!" points at the second assistant turn, past the dropped noise
    assert_eq!(messages[4]["parentId"], messages[3]["id"]);
}

#[test]
fn realistic_session_without_filtering() {
    let (dir, input) = temp_fixture("session.jsonl");
    let output = dir.path().join("out.jsonl");
    let opts = ConvertOptions {
        filter_commands: false,
        ..options()
    };

    let stats = convert(&input, &output, &opts).unwrap();

    assert_eq!(stats.converted, 7);
    assert_eq!(stats.skipped, 5);
    let lines = read_lines(&output);
    assert!(lines[2]["message"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("<command-name>/clear"));
}

#[test]
fn detection_skips_records_without_timestamp() {
    let found = detect_reader(load_fixture("session.jsonl").as_bytes(), DEFAULT_MODEL).unwrap();
    // The leading snapshot record carries no timestamp
    assert_eq!(found.first_timestamp, "2025-06-01T09:00:00.000Z");
    assert_eq!(found.model, "claude-sonnet-4-20250514");
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn malformed_lines_are_counted_not_fatal() {
    let (dir, input) = temp_fixture("malformed.jsonl");
    let output = dir.path().join("out.jsonl");

    let stats = convert(&input, &output, &options()).unwrap();

    assert_eq!(stats.converted, 2);
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.model.model_id, "claude-opus-4-6");

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 4);
    // No timestamp on the record: inherits the first one
    assert_eq!(lines[3]["timestamp"], "2025-01-01T00:00:00Z");
    assert_eq!(lines[3]["parentId"], lines[2]["id"]);
}

#[test]
fn all_garbage_input_still_writes_headers() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_transcript(dir.path(), "in.jsonl", "nope\nstill nope\n");
    let output = dir.path().join("out.jsonl");

    let stats = convert(&input, &output, &options()).unwrap();

    assert_eq!(stats.converted, 0);
    assert_eq!(stats.errors, 2);
    let lines = read_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "session");
    assert_eq!(lines[1]["type"], "model_change");
    assert_eq!(lines[1]["modelId"], "claude-opus-4-6");
}

#[test]
fn empty_content_is_always_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_transcript(
        dir.path(),
        "in.jsonl",
        concat!(
            r#"{"type":"user","message":{"role":"user","content":""},"uuid":"a"}"#,
            "\n",
            r#"{"type":"user","message":{"role":"user","content":"   "},"uuid":"b"}"#,
            "\n"
        ),
    );
    let output = dir.path().join("out.jsonl");

    for filter in [true, false] {
        let opts = ConvertOptions {
            filter_commands: filter,
            ..options()
        };
        let stats = convert(&input, &output, &opts).unwrap();
        assert_eq!(stats.converted, 0);
        assert_eq!(stats.skipped, 2);
    }
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = convert(
        &dir.path().join("missing.jsonl"),
        &dir.path().join("out.jsonl"),
        &options(),
    );
    assert!(result.is_err());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn rerun_produces_identical_output() {
    let (dir, input) = temp_fixture("session.jsonl");
    let first = dir.path().join("first.jsonl");
    let second = dir.path().join("second.jsonl");

    convert(&input, &first, &options()).unwrap();
    convert(&input, &second, &options()).unwrap();

    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}
