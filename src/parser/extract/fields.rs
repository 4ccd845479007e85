use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Explanation,
    EstimatedTime,
    Resources,
}

/// How the model decorated a `Label:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `Explanation: ...`
    Plain,
    /// `**Explanation:** ...`
    Bold,
    /// `- Explanation: ...`
    Dash,
    /// `- **Explanation:** ...`
    DashBold,
}

/// One way of locating a field in a section. Strategies for a field are tried
/// in table order and the first capture wins; append new formats at the end.
pub struct FieldStrategy {
    pub field: Field,
    pub style: LabelStyle,
    re: Regex,
}

impl FieldStrategy {
    fn new(field: Field, style: LabelStyle, pattern: &str) -> Self {
        Self {
            field,
            style,
            re: Regex::new(pattern).unwrap(),
        }
    }

    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
    }
}

static STRATEGIES: LazyLock<Vec<FieldStrategy>> = LazyLock::new(|| {
    use Field::*;
    use LabelStyle::*;

    vec![
        // ── Explanation: up to the next Estimated Time / Resources label ──
        FieldStrategy::new(
            Explanation,
            Plain,
            r"(?s)(?:Explanation|EXPLANATION):\s*(.*?)(?:Estimated Time|ESTIMATED TIME|Resources|RESOURCES)",
        ),
        FieldStrategy::new(
            Explanation,
            Bold,
            r"(?s)\*\*Explanation:\*\*\s*(.*?)(?:\*\*Estimated Time|\*\*Resources)",
        ),
        FieldStrategy::new(
            Explanation,
            Dash,
            r"(?s)- Explanation:\s*(.*?)(?:- Estimated Time|- Resources)",
        ),
        FieldStrategy::new(
            Explanation,
            DashBold,
            r"(?s)- \*\*Explanation:\*\*\s*(.*?)(?:- \*\*Estimated Time|- \*\*Resources)",
        ),
        // ── Estimated Time: up to the Resources label ──
        FieldStrategy::new(
            EstimatedTime,
            Plain,
            r"(?s)(?:Estimated Time|ESTIMATED TIME):\s*(.*?)(?:Resources|RESOURCES)",
        ),
        FieldStrategy::new(
            EstimatedTime,
            Bold,
            r"(?s)\*\*Estimated Time:\*\*\s*(.*?)\*\*Resources",
        ),
        FieldStrategy::new(
            EstimatedTime,
            Dash,
            r"(?s)- Estimated Time:\s*(.*?)- Resources",
        ),
        FieldStrategy::new(
            EstimatedTime,
            DashBold,
            r"(?s)- \*\*Estimated Time:\*\*\s*(.*?)- \*\*Resources",
        ),
        // ── Resources: up to the next ### heading or end of section ──
        FieldStrategy::new(Resources, Plain, r"(?s)(?:Resources|RESOURCES):(.*?)(?:###|$)"),
        FieldStrategy::new(Resources, Bold, r"(?s)\*\*Resources:\*\*(.*?)(?:###|$)"),
        FieldStrategy::new(Resources, Dash, r"(?s)- Resources:(.*?)(?:###|$)"),
        FieldStrategy::new(Resources, DashBold, r"(?s)- \*\*Resources:\*\*(.*?)(?:###|$)"),
    ]
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub fn strategies(field: Field) -> impl Iterator<Item = &'static FieldStrategy> {
    STRATEGIES.iter().filter(move |s| s.field == field)
}

/// Raw capture of the first strategy that matches, trimmed.
pub fn find(text: &str, field: Field) -> Option<&str> {
    strategies(field).find_map(|s| s.capture(text)).map(str::trim)
}

/// A plain-label match on decorated input leaves `**` and bullet dashes
/// around the value; drop them.
pub fn trim_markup(value: &str) -> &str {
    value.trim_matches(|c: char| c == '*' || c == '-' || c.is_whitespace())
}

/// Single-spaced, emphasis-free explanation text.
pub fn clean_explanation(value: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(value, " ");
    collapsed.replace('*', "").trim().to_string()
}

// ── Tests ──
