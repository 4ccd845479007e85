use tracing::debug;

use super::blocks::Block;
use crate::levels::LevelNames;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split model output into one section per level, returned in level order.
///
/// Levels whose heading never appears are absent. When no level heading is
/// found at all, falls back to slicing on bare level-name occurrences.
pub fn split_levels(text: &str, blocks: &[Block], levels: &LevelNames) -> Vec<Section> {
    let sections = cluster_sections(blocks, levels);
    if !sections.is_empty() {
        return sections;
    }

    let names = levels.as_slice();
    if names.iter().all(|n| !n.is_empty() && text.contains(n.as_str())) {
        debug!("no level headings found, slicing on bare level names");
        return slice_on_names(text, levels);
    }

    Vec::new()
}

/// Group lines under the most recent level heading. Lines before the first
/// level heading are dropped, and so are headings that name no level.
pub fn cluster_sections(blocks: &[Block], levels: &LevelNames) -> Vec<Section> {
    let mut buckets: [Option<Vec<String>>; 3] = [None, None, None];
    let mut current: Option<usize> = None;

    for block in blocks {
        if let Block::Heading { text, .. } = block {
            if let Some(idx) = match_level(text, levels) {
                // A repeated heading starts the level over.
                buckets[idx] = Some(Vec::new());
                current = Some(idx);
            }
            continue;
        }

        if let Some(idx) = current {
            if let Some(lines) = buckets[idx].as_mut() {
                lines.push(block.to_line());
            }
        }
    }

    levels
        .iter()
        .zip(buckets)
        .filter_map(|(level, lines)| {
            lines.map(|lines| Section {
                level: level.to_string(),
                lines,
            })
        })
        .collect()
}

/// Case-insensitive substring match; first level in order wins.
fn match_level(heading: &str, levels: &LevelNames) -> Option<usize> {
    let heading = heading.to_lowercase();
    levels
        .iter()
        .position(|name| !name.is_empty() && heading.contains(&name.to_lowercase()))
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    start: usize,
    end: usize,
    level: usize,
}

/// Leftmost non-overlapping occurrences win; on a shared start the longer
/// name wins, so "Core" inside "Core Concepts" is not counted twice.
fn slice_on_names(text: &str, levels: &LevelNames) -> Vec<Section> {
    let mut all: Vec<Occurrence> = levels
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .flat_map(|(level, name)| {
            text.match_indices(name).map(move |(start, m)| Occurrence {
                start,
                end: start + m.len(),
                level,
            })
        })
        .collect();
    all.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Occurrence> = Vec::with_capacity(all.len());
    for occ in all {
        if kept.last().map_or(true, |last| occ.start >= last.end) {
            kept.push(occ);
        }
    }

    levels
        .iter()
        .enumerate()
        .filter_map(|(idx, level)| {
            let pos = kept.iter().position(|o| o.level == idx)?;
            let first = kept[pos];
            let end = kept[pos + 1..]
                .iter()
                .find(|o| o.level != idx)
                .map(|o| o.start)
                .unwrap_or(text.len());
            Some(Section {
                level: level.to_string(),
                lines: text[first.end..end].lines().map(|l| l.trim().to_string()).collect(),
            })
        })
        .collect()
}

// ── Tests ──
