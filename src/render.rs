use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::levels::LevelNames;
use crate::parser::extract::links::extract_domain;
use crate::parser::ExtractedPath;
use crate::verify::LinkVerifier;

/// `python_programming_learning_path.md`
pub fn file_name(skill: &str) -> String {
    format!("{}_learning_path.md", skill.trim().to_lowercase().replace(' ', "_"))
}

/// Downloadable Markdown document. Levels missing from `path` are left out.
pub fn markdown(skill: &str, levels: &LevelNames, path: &ExtractedPath, generated_at: DateTime<Local>) -> String {
    let mut md = format!("# Learning Path for {}\n\n", skill);
    let _ = writeln!(md, "_Generated {}_\n", generated_at.format("%Y-%m-%d %H:%M"));

    for level in levels.iter() {
        let Some(content) = path.get(level) else {
            continue;
        };
        let _ = write!(md, "## {}\n\n", level);
        let _ = write!(md, "### Explanation\n{}\n\n", content.explanation);
        let _ = write!(md, "### Estimated Time\n{}\n\n", content.estimated_time);
        md.push_str("### Resources\n");
        for r in &content.resources {
            let _ = write!(md, "- **{}**: [{}]({})", r.kind, r.name, r.url);
            if !r.description.is_empty() {
                let _ = write!(md, " - {}", r.description);
            }
            md.push('\n');
        }
        md.push('\n');
    }
    md
}

/// Console view of a learning path. Every resource URL is probed again so
/// the reader sees its status at display time.
pub async fn terminal<V: LinkVerifier>(
    skill: &str,
    levels: &LevelNames,
    path: &ExtractedPath,
    roadmap: Option<&str>,
    verifier: &V,
) -> String {
    let mut out = format!("## Learning Path for {}\n\n", skill);
    out.push_str("This personalized learning path will take you from beginner to expert level.\n\n");

    for (i, level) in levels.iter().enumerate() {
        let Some(content) = path.get(level) else {
            let _ = writeln!(out, "❌ Could not generate content for {} level. Please try again.\n", level);
            continue;
        };

        let marker = if i == 0 { "▼" } else { "▶" };
        let _ = writeln!(out, "{} {} Level", marker, level);
        if !content.explanation.is_empty() {
            let _ = writeln!(out, "\n{}", content.explanation);
        }
        if !content.estimated_time.is_empty() {
            let _ = writeln!(out, "\n⏱️  Time Estimate: {}", content.estimated_time);
        }

        if content.resources.is_empty() {
            out.push_str("\n⚠️  No resources were found for this level. Please try regenerating.\n\n");
            continue;
        }

        out.push_str("\n📚 Recommended Resources\n");
        for r in &content.resources {
            let status = if verifier.verify(&r.url).await {
                "✅ Link verified"
            } else {
                "⚠️ Link may be unstable"
            };
            let _ = writeln!(out, "  • {}: {} [{}]", r.kind, r.name, extract_domain(&r.url));
            let _ = writeln!(out, "    {}", r.url);
            if !r.description.is_empty() {
                let _ = writeln!(out, "    {}", r.description);
            }
            let _ = writeln!(out, "    {}", status);
        }
        out.push('\n');
    }

    if let Some(roadmap) = roadmap {
        let _ = writeln!(out, "── Industry Roadmap ──\n{}", roadmap);
    }
    out
}

// ── Tests ──
