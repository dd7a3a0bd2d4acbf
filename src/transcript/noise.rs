//! Local-command noise detection.
//!
//! Claude Code injects slash-command bookkeeping into user turns
//! (`<command-name>/clear</command-name>`, captured stdout, caveats). Those
//! are transcript artifacts, not conversation, and are dropped by default.

/// Markers identifying injected local-command content.
pub const COMMAND_NOISE_MARKERS: &[&str] = &[
    "<command-name>",
    "<local-command-stdout>",
    "<local-command-caveat>",
    "<command-message>",
    "<command-args>",
];

/// True if `text` contains any local-command marker.
pub fn is_command_noise(text: &str) -> bool {
    COMMAND_NOISE_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}
