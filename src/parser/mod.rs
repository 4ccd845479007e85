pub mod blocks;
pub mod extract;
pub mod sections;

#[cfg(test)]
pub(crate) mod testing;

use serde::ser::{Serialize, Serializer};
use tracing::{info, warn};

use crate::levels::LevelNames;
use crate::verify::LinkVerifier;
use extract::LevelContent;

/// Extraction result: level name → content, in level order. Levels that were
/// never found in the text are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPath {
    levels: Vec<(String, LevelContent)>,
}

impl ExtractedPath {
    pub fn get(&self, level: &str) -> Option<&LevelContent> {
        self.levels.iter().find(|(name, _)| name == level).map(|(_, c)| c)
    }

    pub fn contains(&self, level: &str) -> bool {
        self.get(level).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LevelContent)> {
        self.levels.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Serialize for ExtractedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Three-pass pipeline: text → blocks → level sections → extracted fields.
///
/// Resource URLs are verified one after another through `verifier`.
pub async fn extract<V: LinkVerifier>(text: &str, levels: &LevelNames, verifier: &V) -> ExtractedPath {
    let blocks = blocks::classify_lines(text);
    let sections = sections::split_levels(text, &blocks, levels);

    let mut path = ExtractedPath::default();
    for section in &sections {
        let content = extract::extract_level(section, verifier).await;
        path.levels.push((section.level.clone(), content));
    }

    for missing in levels.iter().filter(|l| !path.contains(l)) {
        warn!(level = missing, "Level not found in model output");
    }
    info!(
        levels = path.len(),
        resources = path.iter().map(|(_, c)| c.resources.len()).sum::<usize>(),
        "Extraction finished"
    );

    path
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::level_names;
    use testing::StubVerifier;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.md", name)).unwrap()
    }

    #[tokio::test]
    async fn python_three_levels() {
        let levels = level_names("Python");
        let path = extract(&fixture("python"), &levels, &StubVerifier::all_live()).await;
        assert_eq!(path.len(), 3);
        for name in levels.iter() {
            let c = path.get(name).unwrap();
            assert!(!c.explanation.is_empty(), "{} explanation empty", name);
            assert!(!c.estimated_time.is_empty(), "{} time empty", name);
            assert!(!c.resources.is_empty(), "{} resources empty", name);
            assert!(!c.explanation.contains('*'));
        }

        let basics = path.get("Syntax & Basics").unwrap();
        assert_eq!(basics.estimated_time, "2-4 weeks (5-7 hours/week)");
        assert_eq!(basics.resources[0].kind, "YouTube Video");
        assert_eq!(basics.resources[0].name, "Python for Beginners");
        assert_eq!(basics.resources[0].url, "https://www.youtube.com/watch?v=rfscVS0vtbw");
    }

    #[tokio::test]
    async fn dead_links_filtered() {
        let levels = level_names("Python");
        let v = StubVerifier::live(&[
            "https://www.youtube.com/watch?v=rfscVS0vtbw",
            "https://docs.python.org/3/tutorial/",
        ]);
        let path = extract(&fixture("python"), &levels, &v).await;
        let basics = path.get("Syntax & Basics").unwrap();
        let urls: Vec<_> = basics.resources.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.youtube.com/watch?v=rfscVS0vtbw", "https://docs.python.org/3/tutorial/"]
        );
        assert!(path.get("Advanced Frameworks").unwrap().resources.is_empty());
    }

    #[tokio::test]
    async fn missing_level() {
        let levels = level_names("Guitar");
        let path = extract(&fixture("guitar_missing_level"), &levels, &StubVerifier::all_live()).await;
        assert_eq!(path.len(), 2);
        assert!(path.contains("Fundamentals"));
        assert!(!path.contains("Technique"));
        assert!(path.contains("Performance"));
        assert_eq!(path.get("Fundamentals").unwrap().resources.len(), 1);
    }

    #[tokio::test]
    async fn title_heading_does_not_leak_into_level() {
        let levels = level_names("Python");
        let text = "# Python Path: Syntax & Basics to Advanced Frameworks\n\
                    **Estimated Time:** about 6 months overall\n\n\
                    ### Syntax & Basics\n\
                    - **Explanation:** Variables.\n\
                    - **Estimated Time:** 2 weeks\n\
                    - **Resources:**\n\
                    📚 Docs: Tutorial (https://docs.python.org/3/tutorial/) - Official.\n";
        let path = extract(text, &levels, &StubVerifier::all_live()).await;
        let basics = path.get("Syntax & Basics").unwrap();
        assert_eq!(basics.estimated_time, "2 weeks");
        assert_eq!(basics.explanation, "Variables.");
        assert!(!path.contains("Advanced Frameworks"));
    }

    #[tokio::test]
    async fn resources_continue_past_sub_heading() {
        let levels = level_names("Guitar");
        let text = "### Fundamentals\n\
                    - **Explanation:** Chords.\n\
                    - **Estimated Time:** 1 month\n\
                    - **Resources:**\n\
                    ### Free picks\n\
                    ▶️ Video: Intro (https://e.com/1) - d\n\
                    📚 Docs: Tut (https://e.com/2) - d\n";
        let path = extract(text, &levels, &StubVerifier::all_live()).await;
        let names: Vec<_> = path
            .get("Fundamentals")
            .unwrap()
            .resources
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Intro", "Tut"]);
    }

    #[tokio::test]
    async fn no_heading_markers() {
        let levels = level_names("Watercolor painting");
        let path = extract(&fixture("painting_no_headings"), &levels, &StubVerifier::all_live()).await;
        assert_eq!(path.len(), 3);
        let color = path.get("Color Theory").unwrap();
        assert_eq!(color.estimated_time, "3 weeks");
        assert_eq!(color.resources.len(), 1);
        assert_eq!(color.resources[0].kind, "Interactive Tool");
    }

    #[tokio::test]
    async fn idempotent() {
        let levels = level_names("Python");
        let text = fixture("python");
        let a = extract(&text, &levels, &StubVerifier::all_live()).await;
        let b = extract(&text, &levels, &StubVerifier::all_live()).await;
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[tokio::test]
    async fn garbage_in_nothing_out() {
        let levels = level_names("Python");
        let v = StubVerifier::all_live();
        let path = extract("I'm sorry, I can't help with that.", &levels, &v).await;
        assert!(path.is_empty());
        assert!(v.calls().is_empty());
    }

    #[tokio::test]
    async fn json_is_ordered_map() {
        let levels = level_names("Guitar");
        let path = extract(&fixture("guitar_missing_level"), &levels, &StubVerifier::all_live()).await;
        let json = serde_json::to_string(&path).unwrap();
        let fundamentals = json.find("\"Fundamentals\"").unwrap();
        let performance = json.find("\"Performance\"").unwrap();
        assert!(fundamentals < performance);
        assert!(json.contains("\"type\":"));
    }
}
