//! Data models for messages and the per-file link reports built from them.

pub mod message;
