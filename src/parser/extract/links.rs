use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::verify::LinkVerifier;

/// `(https://...)`, or a scheme-less `(www....)` the model forgot to qualify.
static PAREN_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(((?:https?://|www\.)[^\s)]+)\)").unwrap());

pub struct FoundUrl<'a> {
    pub url: &'a str,
    /// Byte span of the URL inside the line, without the parentheses.
    pub span: Range<usize>,
}

pub fn find_url(line: &str) -> Option<FoundUrl<'_>> {
    let m = PAREN_URL_RE.captures(line)?.get(1)?;
    Some(FoundUrl {
        url: m.as_str(),
        span: m.range(),
    })
}

fn has_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Verify `url`, retrying once with `https://` when it has no scheme.
/// Returns the URL that verified.
pub async fn verify_with_repair<V: LinkVerifier>(url: &str, verifier: &V) -> Option<String> {
    if verifier.verify(url).await {
        return Some(url.to_string());
    }
    if has_scheme(url) {
        return None;
    }

    let fixed = format!("https://{}", url);
    if verifier.verify(&fixed).await {
        debug!(from = url, to = %fixed, "repaired url scheme");
        return Some(fixed);
    }
    None
}

pub fn extract_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or("")
        .trim_start_matches("www.")
        .to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::testing::StubVerifier;

    #[test]
    fn finds_parenthesized_url() {
        let line = "📚 Docs: Rust Book (https://doc.rust-lang.org/book/) - The book";
        let found = find_url(line).unwrap();
        assert_eq!(found.url, "https://doc.rust-lang.org/book/");
        assert_eq!(&line[found.span], "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn bare_url_is_not_a_resource() {
        assert!(find_url("see https://example.com for more").is_none());
        assert!(find_url("Book: Some Title (2nd edition)").is_none());
    }

    #[test]
    fn scheme_less_www() {
        let found = find_url("Blog: Post (www.example.com/post) - x").unwrap();
        assert_eq!(found.url, "www.example.com/post");
    }

    #[test]
    fn markdown_link_url() {
        let found = find_url("▶️ Video: [Intro](https://example.com/v) - d").unwrap();
        assert_eq!(found.url, "https://example.com/v");
    }

    #[tokio::test]
    async fn verified_url_kept_as_is() {
        let v = StubVerifier::live(&["https://example.com/ok"]);
        assert_eq!(
            verify_with_repair("https://example.com/ok", &v).await.as_deref(),
            Some("https://example.com/ok")
        );
        assert_eq!(v.calls(), vec!["https://example.com/ok"]);
    }

    #[tokio::test]
    async fn schemed_url_not_retried() {
        let v = StubVerifier::live(&[]);
        assert_eq!(verify_with_repair("https://example.com/dead", &v).await, None);
        assert_eq!(v.calls().len(), 1);
    }

    #[tokio::test]
    async fn scheme_repair() {
        let v = StubVerifier::live(&["https://www.example.com/post"]);
        assert_eq!(
            verify_with_repair("www.example.com/post", &v).await.as_deref(),
            Some("https://www.example.com/post")
        );
        assert_eq!(v.calls(), vec!["www.example.com/post", "https://www.example.com/post"]);
    }

    #[tokio::test]
    async fn repair_that_still_fails() {
        let v = StubVerifier::live(&[]);
        assert_eq!(verify_with_repair("www.example.com/post", &v).await, None);
        assert_eq!(v.calls().len(), 2);
    }

    #[test]
    fn domain() {
        assert_eq!(extract_domain("https://www.youtube.com/watch?v=1"), "youtube.com");
        assert_eq!(extract_domain("http://docs.python.org/3/"), "docs.python.org");
        assert_eq!(extract_domain("example.com/x"), "example.com");
    }
}
