//! OpenClaw session side of the conversion.
//!
//! An OpenClaw session file is JSONL: a `session` header, a `model_change`
//! line, then one `message` line per conversation turn. Messages link to their
//! predecessor through short `id`/`parentId` values.

pub mod ids;
pub mod record;
pub mod validate;

pub use ids::{short_id, IdMap};
pub use record::{
    MessageBody, MessageEntry, ModelChange, OutputRecord, SessionHeader, SessionWriter,
    SESSION_VERSION,
};
pub use validate::{validate, ValidationError};
