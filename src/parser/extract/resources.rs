use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::links::{self, FoundUrl};
use crate::verify::LinkVerifier;

static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\s/]*").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\s*-\s*(.+)$").unwrap());

const DEFAULT_KIND: &str = "Resource";
const UNNAMED: &str = "Unnamed Resource";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Parse every resource line in a block, verifying each URL in turn.
/// Lines without a parenthesized URL or whose URL does not verify are dropped.
pub async fn parse_block<V: LinkVerifier>(block: &str, verifier: &V) -> Vec<Resource> {
    let mut resources = Vec::new();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(found) = links::find_url(line) else {
            continue;
        };

        let Some(url) = links::verify_with_repair(found.url, verifier).await else {
            debug!(url = found.url, "dropping resource line with unverified url");
            continue;
        };

        resources.push(parse_line(line, &found, url));
    }

    resources
}

/// Split `[emoji] Type: Name (url) - description` into its parts.
///
/// The type/name split is on the first colon that comes before the URL; a
/// line with no such colon is typed as a generic "Resource".
pub fn parse_line(line: &str, found: &FoundUrl<'_>, url: String) -> Resource {
    let (head, rest) = match line.find(':') {
        Some(idx) if idx < found.span.start => (&line[..idx], &line[idx + 1..]),
        _ => ("", line),
    };

    Resource {
        kind: parse_kind(head),
        name: parse_name(rest),
        url,
        description: DESCRIPTION_RE
            .captures(rest)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default(),
    }
}

fn parse_kind(head: &str) -> String {
    TYPE_RE
        .find_iter(head)
        .map(|m| m.as_str().trim())
        .find(|t| !t.is_empty())
        .unwrap_or(DEFAULT_KIND)
        .to_string()
}

fn parse_name(rest: &str) -> String {
    let raw = rest.split('(').next().unwrap_or("");
    let name = raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '[' | ']'));
    if name.is_empty() {
        UNNAMED.to_string()
    } else {
        name.to_string()
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::testing::StubVerifier;

    fn resource(kind: &str, name: &str, url: &str, description: &str) -> Resource {
        Resource {
            kind: kind.into(),
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }

    #[tokio::test]
    async fn canonical_line() {
        let v = StubVerifier::live(&["https://example.com/ok"]);
        let r = parse_block("▶️ Video: Intro (https://example.com/ok) - desc", &v).await;
        assert_eq!(r, vec![resource("Video", "Intro", "https://example.com/ok", "desc")]);
    }

    #[tokio::test]
    async fn unverified_line_dropped() {
        let v = StubVerifier::live(&[]);
        let r = parse_block("▶️ Video: Intro (https://example.com/dead) - desc", &v).await;
        assert!(r.is_empty());
    }

    #[tokio::test]
    async fn repaired_url_adopted() {
        let v = StubVerifier::live(&["https://www.example.com/post"]);
        let r = parse_block("📝 Blog: Post (www.example.com/post) - words", &v).await;
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].url, "https://www.example.com/post");
        assert_eq!(r[0].kind, "Blog");
    }

    #[tokio::test]
    async fn prose_lines_skipped_without_probing() {
        let v = StubVerifier::live(&["https://a.com/1"]);
        let block = "Here are some resources:\n\n* 📚 Docs: A (https://a.com/1) - first\nEnjoy!";
        let r = parse_block(block, &v).await;
        assert_eq!(r.len(), 1);
        assert_eq!(v.calls(), vec!["https://a.com/1"]);
    }

    #[tokio::test]
    async fn order_preserved() {
        let v = StubVerifier::all_live();
        let block = "📚 Docs: A (https://a.com) - 1\n💻 Practice: B (https://b.com) - 2\n📖 Book: C (https://c.com) - 3";
        let names: Vec<_> = parse_block(block, &v).await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn bold_bulleted_type() {
        let line = "- ▶️ **YouTube Video/Course**: **Python for Everybody** (https://y.com/p) - Free course.";
        let found = links::find_url(line).unwrap();
        let r = parse_line(line, &found, found.url.to_string());
        assert_eq!(r.kind, "YouTube Video/Course");
        assert_eq!(r.name, "Python for Everybody");
        assert_eq!(r.description, "Free course.");
    }

    #[test]
    fn no_type_before_url() {
        let line = "Intro (https://example.com/x) - d";
        let found = links::find_url(line).unwrap();
        let r = parse_line(line, &found, found.url.to_string());
        assert_eq!(r.kind, "Resource");
        assert_eq!(r.name, "Intro");
        assert_eq!(r.description, "d");
    }

    #[test]
    fn emoji_only_type_defaults() {
        let line = "🧪 : Playground (https://play.example.com)";
        let found = links::find_url(line).unwrap();
        let r = parse_line(line, &found, found.url.to_string());
        assert_eq!(r.kind, "Resource");
        assert_eq!(r.name, "Playground");
        assert_eq!(r.description, "");
    }

    #[test]
    fn markdown_link_name() {
        let line = "📝 Article: [Ownership Explained](https://e.com/own) - Short read";
        let found = links::find_url(line).unwrap();
        let r = parse_line(line, &found, found.url.to_string());
        assert_eq!(r.name, "Ownership Explained");
        assert_eq!(r.description, "Short read");
    }

    #[test]
    fn missing_name() {
        let line = "📖 Book: (https://e.com/b) - untitled";
        let found = links::find_url(line).unwrap();
        let r = parse_line(line, &found, found.url.to_string());
        assert_eq!(r.name, "Unnamed Resource");
    }

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(resource("Video", "Intro", "https://e.com", "")).unwrap();
        assert_eq!(json["type"], "Video");
        assert!(json.get("kind").is_none());
    }
}
