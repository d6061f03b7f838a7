//! Scheme-prefixed URL matching over decoded message text.

use std::sync::LazyLock;

use regex::Regex;

/// `http://` or `https://` followed by letters, digits, the punctuation in
/// `$-_@.&+` (where `$-_` is the byte range 0x24..=0x5F), `!*\(),`, or
/// percent-encoded octets.
///
/// The class is kept exactly as is: trailing punctuation such as `.` or `)`
/// ends up in the match.
pub const URL_PATTERN: &str =
    r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"));

/// Return every non-overlapping URL match in `text`, in order of occurrence.
///
/// Duplicates are kept. Nothing is normalized or validated.
pub fn find_urls(text: &str) -> Vec<&str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url() {
        let text = "Please visit https://example.com/page?id=1 for details";
        assert_eq!(find_urls(text), vec!["https://example.com/page?id=1"]);
    }

    #[test]
    fn test_no_scheme() {
        assert!(find_urls("www.example.com and ftp://files.example.com").is_empty());
        assert!(find_urls("").is_empty());
    }

    #[test]
    fn test_order_and_duplicates() {
        let text = "http://b.example/ then https://a.example/ then http://b.example/";
        assert_eq!(
            find_urls(text),
            vec!["http://b.example/", "https://a.example/", "http://b.example/"]
        );
    }

    #[test]
    fn test_stops_at_excluded_characters() {
        // Space, double quote and tilde are outside the class; angle brackets are not.
        assert_eq!(find_urls("<https://a.example/x>"), vec!["https://a.example/x>"]);
        assert_eq!(find_urls("href=\"https://a.example/y\""), vec!["https://a.example/y"]);
        assert_eq!(find_urls("https://a.example/~user"), vec!["https://a.example/"]);
    }

    #[test]
    fn test_trailing_punctuation_is_kept() {
        assert_eq!(
            find_urls("See (https://a.example/z)."),
            vec!["https://a.example/z)."]
        );
    }

    #[test]
    fn test_percent_and_query_characters() {
        let url = "https://x.safelinks.protection.outlook.com/?url=https%3A%2F%2Fexample.com%2Fpage&data=05%7C01";
        assert_eq!(find_urls(&format!("click {url} now")), vec![url]);
    }

    #[test]
    fn test_bare_scheme_is_not_a_match() {
        assert!(find_urls("http:// nothing").is_empty());
    }
}
