//! Loader for individual `.eml` files (RFC 5322 messages without MBOX framing).

use std::path::Path;

use mail_parser::decoders::base64::base64_decode;
use mail_parser::decoders::quoted_printable::quoted_printable_decode;
use mail_parser::{Encoding, HeaderName, MessageParser, MessagePart, PartType};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::message::Message;
use crate::parser::text::decode_utf8_ignore;

/// Read and parse a single `.eml` file into a [`Message`].
///
/// The file is read in one go, so its handle is closed before parsing starts.
pub fn load_message(path: impl AsRef<Path>) -> Result<Message> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;

    debug!(path = %path.display(), bytes = data.len(), "Read message file");

    parse_message(&data).ok_or_else(|| Error::InvalidMessage(path.to_path_buf()))
}

/// Parse an in-memory message.
///
/// Returns `None` only when `mail-parser` rejects non-empty input. An empty
/// buffer is a message with no headers and no body.
pub fn parse_message(raw_message: &[u8]) -> Option<Message> {
    let message_bytes = skip_from_line(raw_message);
    if message_bytes.iter().all(u8::is_ascii_whitespace) {
        return Some(Message::new(None, None));
    }

    let parsed = MessageParser::default().parse(message_bytes)?;
    let body = single_payload(&parsed.raw_message, parsed.root_part());

    // Present but blank is an empty subject; only a missing header gets the default.
    let subject = parsed
        .header(HeaderName::Subject)
        .map(|value| value.as_text().unwrap_or(""));

    Some(Message::new(subject, body))
}

/// Transfer-decoded payload of a single-part message, as lenient UTF-8.
///
/// The charset is ignored: the payload bytes are read as UTF-8 and invalid
/// sequences are dropped. Multipart containers and embedded messages have no
/// single payload.
fn single_payload(raw_message: &[u8], root: &MessagePart<'_>) -> Option<String> {
    if matches!(root.body, PartType::Message(_) | PartType::Multipart(_)) {
        return None;
    }

    let end = root.raw_end_offset().min(raw_message.len());
    let raw_body = raw_message.get(root.raw_body_offset()..end)?;

    // Malformed encodings fall back to the raw bytes.
    let decoded = match root.encoding {
        Encoding::Base64 => base64_decode(raw_body),
        Encoding::QuotedPrintable => quoted_printable_decode(raw_body),
        Encoding::None => None,
    };

    Some(decode_utf8_ignore(decoded.as_deref().unwrap_or(raw_body)))
}

/// Skip a leading BOM and an MBOX-style `From ` envelope line if present.
fn skip_from_line(data: &[u8]) -> &[u8] {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_from_line() {
        let data = b"From user@example.com Thu Jan 01 00:00:00 2024\nSubject: Test\n\nBody\n";
        let result = skip_from_line(data);
        assert!(result.starts_with(b"Subject:"));
    }

    #[test]
    fn test_skip_from_line_no_from() {
        let data = b"Subject: Test\n\nBody\n";
        assert_eq!(skip_from_line(data), data);
    }

    #[test]
    fn test_skip_bom() {
        let data = b"\xEF\xBB\xBFSubject: Test\n\nBody\n";
        assert!(skip_from_line(data).starts_with(b"Subject:"));
    }

    #[test]
    fn test_parse_plain_message() {
        let raw = b"From: a@example.com\r\nSubject: Test\r\n\r\nVisit https://foo.bar/baz today\r\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.subject, "Test");
        assert!(msg.body.unwrap().contains("https://foo.bar/baz"));
    }

    #[test]
    fn test_parse_missing_subject() {
        let raw = b"From: a@example.com\n\nhello\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.subject, "No Subject");
    }

    #[test]
    fn test_parse_encoded_subject() {
        let raw = b"Subject: =?UTF-8?Q?Caf=C3=A9?=\n\nbody\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.subject, "Café");
    }

    #[test]
    fn test_quoted_printable_body_is_decoded() {
        let raw = b"Subject: QP\nContent-Type: text/plain; charset=utf-8\n\
Content-Transfer-Encoding: quoted-printable\n\n\
https://example.com/a=3Db\n";
        let msg = parse_message(raw).unwrap();
        assert!(msg.body.unwrap().contains("https://example.com/a=b"));
    }

    #[test]
    fn test_multipart_has_no_payload() {
        let raw = b"Subject: Multi\nMIME-Version: 1.0\n\
Content-Type: multipart/alternative; boundary=\"xx\"\n\n\
--xx\nContent-Type: text/plain\n\nhttps://example.com/\n--xx--\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.subject, "Multi");
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_empty_body_is_none() {
        let raw = b"Subject: Empty\n\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_empty_input() {
        let msg = parse_message(b"").unwrap();
        assert_eq!(msg.subject, "No Subject");
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_blank_subject_is_kept_empty() {
        let raw = b"Subject: \n\nhttps://foo.bar/z\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.subject, "");
        assert!(msg.body.unwrap().contains("https://foo.bar/z"));
    }

    #[test]
    fn test_invalid_utf8_bytes_are_dropped_from_body() {
        let raw = b"Subject: U\nContent-Type: text/plain; charset=utf-8\n\nhttp://a.example/\xffpath\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some("http://a.example/path\n"));
    }

    #[test]
    fn test_latin1_body_is_read_as_utf8() {
        let raw = b"Subject: L\nContent-Type: text/plain; charset=iso-8859-1\n\nhttp://a.example/\xe9path\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some("http://a.example/path\n"));
    }

    #[test]
    fn test_base64_body_with_invalid_bytes() {
        // "http://a.example/\xffpath"
        let raw = b"Subject: B\nContent-Transfer-Encoding: base64\n\naHR0cDovL2EuZXhhbXBsZS//cGF0aA==\n";
        let msg = parse_message(raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some("http://a.example/path"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_message("/nonexistent/dir/none.eml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
