//! Command handlers

pub mod completions;
pub mod config;
pub mod convert;
