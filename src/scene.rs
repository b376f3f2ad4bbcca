//! Prompt classification into procedural scene categories
//!
//! Free-text prompts are mapped to a fixed set of scene categories by an
//! ordered table of keyword rules. The table is walked top to bottom and the
//! first matching rule wins; classification is deterministic and has no side
//! effects.

use serde::{Deserialize, Serialize};

/// Scene categories for procedural background synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneCategory {
    /// Warm horizon over water (requires a sunset AND a beach keyword)
    SunsetBeach,
    /// Warm dusk/dawn gradient
    Sunset,
    /// Daylight sky or open water
    SkyWater,
    /// Night sky with star speckling
    NightSpace,
    /// Soft two-color pastel drift (fallback when no keyword matches)
    Pastel,
}

impl std::fmt::Display for SceneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SunsetBeach => write!(f, "sunset-beach"),
            Self::Sunset => write!(f, "sunset"),
            Self::SkyWater => write!(f, "sky-water"),
            Self::NightSpace => write!(f, "night-space"),
            Self::Pastel => write!(f, "pastel"),
        }
    }
}

const SUNSET_KEYWORDS: &[&str] = &["sunset", "sunrise"];
const BEACH_KEYWORDS: &[&str] = &["beach", "ocean"];
const DUSK_KEYWORDS: &[&str] = &["sunset", "sunrise", "dusk", "dawn"];
const WATER_KEYWORDS: &[&str] = &["sky", "blue", "ocean", "sea", "water"];
const NIGHT_KEYWORDS: &[&str] = &["night", "dark", "space", "stars", "galaxy"];

fn contains_any(prompt: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| prompt.contains(keyword))
}

fn is_sunset_beach(prompt: &str) -> bool {
    contains_any(prompt, SUNSET_KEYWORDS) && contains_any(prompt, BEACH_KEYWORDS)
}

fn is_sunset(prompt: &str) -> bool {
    contains_any(prompt, DUSK_KEYWORDS)
}

fn is_sky_water(prompt: &str) -> bool {
    contains_any(prompt, WATER_KEYWORDS)
}

fn is_night_space(prompt: &str) -> bool {
    contains_any(prompt, NIGHT_KEYWORDS)
}

/// One entry in the ordered classification table
struct SceneRule {
    matches: fn(&str) -> bool,
    category: SceneCategory,
}

/// Evaluation order is significant: the compound sunset-beach rule is checked
/// first, and sky/water keywords outrank night/space keywords.
const RULES: &[SceneRule] = &[
    SceneRule {
        matches: is_sunset_beach,
        category: SceneCategory::SunsetBeach,
    },
    SceneRule {
        matches: is_sunset,
        category: SceneCategory::Sunset,
    },
    SceneRule {
        matches: is_sky_water,
        category: SceneCategory::SkyWater,
    },
    SceneRule {
        matches: is_night_space,
        category: SceneCategory::NightSpace,
    },
];

/// Keyword-based prompt classifier
pub struct SceneClassifier;

impl SceneClassifier {
    /// Classify a free-text prompt into a scene category
    ///
    /// Matching is case-insensitive substring search; an empty prompt (or one
    /// with no recognized keyword) falls through to [`SceneCategory::Pastel`].
    #[must_use]
    pub fn classify(prompt: &str) -> SceneCategory {
        let prompt = prompt.to_lowercase();
        for rule in RULES {
            if (rule.matches)(&prompt) {
                return rule.category;
            }
        }
        SceneCategory::Pastel
    }
}
