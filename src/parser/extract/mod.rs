pub mod fields;
pub mod links;
pub mod resources;

use serde::Serialize;
use tracing::warn;

use super::sections::Section;
use crate::verify::LinkVerifier;
use fields::Field;
pub use resources::Resource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelContent {
    pub explanation: String,
    pub estimated_time: String,
    pub resources: Vec<Resource>,
}

impl LevelContent {
    /// Names of the fields that came out empty.
    pub fn gaps(&self) -> Vec<&'static str> {
        let mut gaps = Vec::new();
        if self.explanation.is_empty() {
            gaps.push("explanation");
        }
        if self.estimated_time.is_empty() {
            gaps.push("estimated time");
        }
        if self.resources.is_empty() {
            gaps.push("resources");
        }
        gaps
    }
}

pub async fn extract_level<V: LinkVerifier>(section: &Section, verifier: &V) -> LevelContent {
    let text = section.text();

    let explanation = fields::find(&text, Field::Explanation)
        .map(|e| fields::clean_explanation(fields::trim_markup(e)))
        .unwrap_or_default();
    let estimated_time = fields::find(&text, Field::EstimatedTime)
        .map(|t| fields::trim_markup(t).to_string())
        .unwrap_or_default();
    let resources = match fields::find(&text, Field::Resources) {
        Some(block) => resources::parse_block(block, verifier).await,
        None => Vec::new(),
    };

    let content = LevelContent {
        explanation,
        estimated_time,
        resources,
    };

    for gap in content.gaps() {
        warn!(level = %section.level, "Missing {} for level during parsing", gap);
    }

    content
}

// ── Tests ──
