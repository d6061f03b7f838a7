//! Email parsing: `.eml` loading and lenient payload decoding.

pub mod eml;
pub mod text;
