use std::fmt;

/// The three ordered learning stages for one skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelNames([String; 3]);

struct Domain {
    keywords: &'static [&'static str],
    levels: [&'static str; 3],
}

const DOMAINS: &[Domain] = &[
    Domain {
        keywords: &[
            "coding", "programming", "python", "java", "javascript", "software",
            "web development", "data science",
        ],
        levels: ["Syntax & Basics", "Object-Oriented Programming", "Advanced Frameworks"],
    },
    Domain {
        keywords: &["music", "guitar", "piano", "singing", "violin"],
        levels: ["Fundamentals", "Technique", "Performance"],
    },
    Domain {
        keywords: &["art", "drawing", "painting", "sculpture", "design"],
        levels: ["Sketching & Form", "Color Theory", "Advanced Techniques"],
    },
    Domain {
        keywords: &["writing", "creative writing", "blogging", "journalism"],
        levels: ["Grammar and Style", "Storytelling Techniques", "Publishing Strategies"],
    },
    Domain {
        keywords: &["language", "spanish", "french", "german", "english"],
        levels: ["Conversational Basics", "Fluency & Grammar", "Native-Level Proficiency"],
    },
];

const DEFAULT_LEVELS: [&str; 3] = ["Foundation", "Core", "Mastery"];

/// Keyword lookup; first matching domain wins.
pub fn level_names(skill: &str) -> LevelNames {
    let lower = skill.to_lowercase();
    let levels = DOMAINS
        .iter()
        .find(|d| d.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|d| d.levels)
        .unwrap_or(DEFAULT_LEVELS);
    LevelNames::new(levels.map(String::from))
}

impl LevelNames {
    pub fn new(names: [String; 3]) -> Self {
        Self(names)
    }

    pub fn basic(&self) -> &str {
        &self.0[0]
    }

    pub fn intermediate(&self) -> &str {
        &self.0[1]
    }

    pub fn advanced(&self) -> &str {
        &self.0[2]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Appended to the generation prompt so the model reuses the exact names.
    pub fn prompt_suffix(&self) -> String {
        format!(" (Levels: {})", self)
    }
}

impl fmt::Display for LevelNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0[0], self.0[1], self.0[2])
    }
}

// ── Tests ──
