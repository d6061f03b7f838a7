//! Parsed message and per-file report types.

use std::path::PathBuf;

/// Subject used when a message carries no `Subject:` header.
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// A single email message, reduced to what link extraction needs.
///
/// Built once from a file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Decoded subject line (RFC 2047 encoded-words resolved),
    /// or [`DEFAULT_SUBJECT`] when the header is absent.
    pub subject: String,

    /// The single decoded payload as text.
    ///
    /// `None` for multipart messages and for messages with an empty body.
    pub body: Option<String>,
}

impl Message {
    /// Build a message, substituting the default subject when none is given.
    pub fn new(subject: Option<&str>, body: Option<String>) -> Self {
        Self {
            subject: subject.unwrap_or(DEFAULT_SUBJECT).to_string(),
            body: body.filter(|b| !b.is_empty()),
        }
    }
}

/// Links found in one message file, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileReport {
    /// Path of the `.eml` file the links came from.
    pub path: PathBuf,

    /// Subject of the message.
    pub subject: String,

    /// Resolved links in order of first appearance, duplicates included.
    pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_subject_uses_default() {
        let msg = Message::new(None, Some("body".into()));
        assert_eq!(msg.subject, "No Subject");
    }

    #[test]
    fn test_blank_subject_is_not_replaced() {
        let msg = Message::new(Some(""), None);
        assert_eq!(msg.subject, "");
    }

    #[test]
    fn test_empty_body_is_no_body() {
        let msg = Message::new(Some("Hi"), Some(String::new()));
        assert_eq!(msg.body, None);
    }
}
