use std::time::Duration;

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

pub const ROADMAP_BASE_URL: &str = "https://roadmap.sh";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const CONTAINER_SELECTORS: &[&str] = &["div.roadmap-container", "#roadmap-content", "main"];
const ITEM_SELECTORS: &[&str] = &["li.node", "div.roadmap-group", "section.roadmap-section"];
const TITLE_SELECTOR: &str = "h2, h3, h4, strong";
const DESCRIPTION_SELECTOR: &str = "p, span";

pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// Slugs tried in order: "machine-learning", "machinelearning", "machine".
pub fn candidate_slugs(skill: &str) -> Vec<String> {
    let lower = skill.trim().to_lowercase();
    let candidates = [
        lower.replace(' ', "-"),
        lower.replace(' ', ""),
        lower.split_whitespace().next().unwrap_or("").to_string(),
    ];

    let mut slugs: Vec<String> = Vec::with_capacity(candidates.len());
    for slug in candidates {
        if !slug.is_empty() && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

/// Markdown supplement for `skill` from roadmap.sh, or `None` on transport failure.
pub async fn fetch_roadmap(client: &reqwest::Client, base_url: &str, skill: &str) -> Option<String> {
    match try_fetch(client, base_url.trim_end_matches('/'), skill).await {
        Ok(md) => Some(md),
        Err(e) => {
            warn!("Error fetching roadmap from roadmap.sh: {:#}", e);
            None
        }
    }
}

async fn try_fetch(client: &reqwest::Client, base_url: &str, skill: &str) -> Result<String> {
    for slug in candidate_slugs(skill) {
        let url = format!("{}/{}", base_url, slug);
        let resp = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        if resp.status() != reqwest::StatusCode::OK {
            continue;
        }

        let html = resp.text().await.with_context(|| format!("Reading {}", url))?;
        info!(%url, "Found roadmap page");
        return Ok(render_page(&html, skill, &url));
    }

    Ok(format!(
        "Could not find a dedicated roadmap for '{}' on roadmap.sh. Try checking [their main page]({}).",
        skill, base_url
    ))
}

/// Turn a roadmap page into a Markdown bullet list, or a bare link when no
/// items can be found.
fn render_page(html: &str, skill: &str, url: &str) -> String {
    let items = parse_items(html);
    if items.is_empty() {
        return format!("Found a roadmap page for {} on roadmap.sh. [View it here]({})", skill, url);
    }

    let mut md = format!("### Roadmap.sh Roadmap for {}:\n\n", skill);
    for (title, description) in &items {
        md.push_str(&format!("- **{}**: {}\n", title, description));
    }
    md.push_str(&format!("\n[View Full Roadmap on roadmap.sh]({})\n", url));
    md
}

fn parse_items(html: &str) -> Vec<(String, String)> {
    let doc = Html::parse_document(html);
    let Some(container) = CONTAINER_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|sel| doc.select(&sel).next())
    else {
        return Vec::new();
    };

    let (Ok(title_sel), Ok(desc_sel)) = (Selector::parse(TITLE_SELECTOR), Selector::parse(DESCRIPTION_SELECTOR))
    else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for sel in ITEM_SELECTORS.iter().filter_map(|s| Selector::parse(s).ok()) {
        for item in container.select(&sel) {
            let title = first_text(item, &title_sel);
            if title.is_empty() {
                continue;
            }
            items.push((title, first_text(item, &desc_sel)));
        }
    }
    items
}

fn first_text(el: ElementRef<'_>, sel: &Selector) -> String {
    el.select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

// ── Tests ──
