//! claw-import: convert Claude Code session transcripts into OpenClaw sessions.
//!
//! The conversion streams the source JSONL twice (header detection, then
//! conversion) and writes the target JSONL as it goes, so memory use does not
//! depend on transcript size.

pub mod cli;
pub mod config;
pub mod convert;
pub mod jsonl;
pub mod registry;
pub mod session;
pub mod timestamp;
pub mod transcript;

pub use config::Config;
pub use convert::{convert, ConvertOptions, ConvertStats, RecordConverter};
pub use registry::{register, RegistryError, SessionEntry};
pub use session::{validate, ValidationError};
pub use transcript::{detect, Detection, ModelRef};
