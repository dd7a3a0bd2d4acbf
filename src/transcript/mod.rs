//! Claude Code transcript side of the conversion.
//!
//! Claude Code writes one JSON object per line with a `type` discriminator:
//! `user`, `assistant`, `system`, `progress`, `file-history-snapshot`,
//! `queue-operation`. Only `user` and `assistant` records carry conversation
//! content; everything else is skipped.
//!
//! - [`record`] - tolerant view over a single record
//! - [`content`] - content block normalization
//! - [`noise`] - local-command artifact detection
//! - [`detect`] - first-timestamp / model discovery pass

pub mod content;
pub mod detect;
pub mod noise;
pub mod record;

pub use content::{joined_text, normalize, ContentBlock};
pub use detect::{detect, Detection, ModelRef, DEFAULT_MODEL, DEFAULT_PROVIDER};
pub use noise::is_command_noise;
pub use record::{MessageView, Rejection, Role, SourceRecord};
