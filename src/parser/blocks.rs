use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Text(String),
    Empty,
}

impl Block {
    /// Line as it appeared in the model output (trimmed).
    pub fn to_line(&self) -> String {
        match self {
            Block::Heading { level, text } => format!("{} {}", "#".repeat(*level as usize), text),
            Block::Text(t) => t.clone(),
            Block::Empty => String::new(),
        }
    }
}

pub fn classify_lines(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return Block::Empty;
            }

            // ── Heading: ## text ──
            if let Some(caps) = HEADING_RE.captures(line) {
                return Block::Heading {
                    level: caps[1].len() as u8,
                    text: caps[2].trim().to_string(),
                };
            }

            Block::Text(line.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading() {
        let blocks = classify_lines("### Syntax & Basics");
        assert!(matches!(&blocks[0], Block::Heading { level: 3, text } if text == "Syntax & Basics"));
    }

    #[test]
    fn indented_heading() {
        let blocks = classify_lines("    ## Core  ");
        assert!(matches!(&blocks[0], Block::Heading { level: 2, text } if text == "Core"));
    }

    #[test]
    fn four_hashes_is_text() {
        let blocks = classify_lines("#### Too deep");
        assert!(matches!(&blocks[0], Block::Text(t) if t == "#### Too deep"));
    }

    #[test]
    fn hash_without_space_is_text() {
        let blocks = classify_lines("#hashtag");
        assert!(matches!(&blocks[0], Block::Text(_)));
    }

    #[test]
    fn empty_line() {
        let blocks = classify_lines("text\n\nmore");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[1], Block::Empty));
    }

    #[test]
    fn round_trips_heading_line() {
        let blocks = classify_lines("##   Mastery");
        assert_eq!(blocks[0].to_line(), "## Mastery");
    }
}
