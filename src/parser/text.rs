//! Lenient byte-to-text decoding for message payloads.

/// Decode `bytes` as UTF-8, dropping every invalid byte sequence.
///
/// Unlike [`String::from_utf8_lossy`] nothing is substituted for the
/// invalid sequences, so no U+FFFD can end up glued to a link.
pub fn decode_utf8_ignore(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_is_unchanged() {
        assert_eq!(decode_utf8_ignore("caf\u{e9} ok".as_bytes()), "café ok");
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        let bytes = b"see http://a.example/\xff\xfepath";
        assert_eq!(decode_utf8_ignore(bytes), "see http://a.example/path");
    }

    #[test]
    fn test_truncated_sequence_at_end() {
        // First two bytes of a three-byte sequence
        let bytes = b"tail\xe2\x82";
        assert_eq!(decode_utf8_ignore(bytes), "tail");
    }
}
