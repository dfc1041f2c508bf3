//! Classification and difficulty enums.
//!
//! `Difficulty` serializes as `snake_case`. `TopicType` serializes as the
//! title used in the catalog's type column (`"Intro"`, `"Graphing"`, ...).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;
use crate::text::title_case;

// ---------------------------------------------------------------------------
// TopicType
// ---------------------------------------------------------------------------

/// Worksheet classification, as written in the catalog's type column.
///
/// Titles outside the known set are kept verbatim in `Other` so a catalog can
/// introduce a new classification without being mislabelled.
///
/// Equality, hashing and ordering all go through [`as_str`](Self::as_str), so
/// `Other("Intro")` and `Intro` are the same type everywhere.
#[derive(Debug, Clone)]
pub enum TopicType {
    Intro,
    Graphing,
    Solving,
    Expansion,
    Review,
    Identifying,
    Introduction,
    Other(String),
}

impl TopicType {
    /// Parse an exact catalog title. Surrounding whitespace is ignored; case
    /// is not.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        match title.trim() {
            "Intro" => Self::Intro,
            "Graphing" => Self::Graphing,
            "Solving" => Self::Solving,
            "Expansion" => Self::Expansion,
            "Review" => Self::Review,
            "Identifying" => Self::Identifying,
            "Introduction" => Self::Introduction,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse user-supplied filter text: trimmed and title-cased before the
    /// exact comparison, so `" graphing"` selects `Graphing`.
    #[must_use]
    pub fn from_filter(input: &str) -> Self {
        Self::from_title(&title_case(input.trim()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Intro => "Intro",
            Self::Graphing => "Graphing",
            Self::Solving => "Solving",
            Self::Expansion => "Expansion",
            Self::Review => "Review",
            Self::Identifying => "Identifying",
            Self::Introduction => "Introduction",
            Self::Other(title) => title,
        }
    }
}

impl From<&str> for TopicType {
    fn from(title: &str) -> Self {
        Self::from_title(title)
    }
}

impl PartialEq for TopicType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TopicType {}

impl Hash for TopicType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for TopicType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for TopicType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TopicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TopicType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TopicType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let title = String::deserialize(deserializer)?;
        Ok(Self::from_title(&title))
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty level requested from a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Challenge,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Challenge];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Challenge => "challenge",
        }
    }

    /// Capitalised label for titles (`"Easy"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Challenge => "Challenge",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidDifficulty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("intro", TopicType::Intro)]
    #[case(" Graphing ", TopicType::Graphing)]
    #[case("SOLVING", TopicType::Solving)]
    #[case("word problems", TopicType::Other("Word Problems".to_string()))]
    fn filter_text_is_trimmed_and_title_cased(#[case] input: &str, #[case] expected: TopicType) {
        assert_eq!(TopicType::from_filter(input), expected);
    }

    #[test]
    fn catalog_titles_are_case_sensitive() {
        assert_eq!(TopicType::from_title("Intro"), TopicType::Intro);
        assert_eq!(
            TopicType::from_title("intro"),
            TopicType::Other("intro".to_string())
        );
    }

    #[test]
    fn unknown_types_keep_their_title() {
        let custom = TopicType::from_title("Practice");
        assert_eq!(custom.as_str(), "Practice");
        assert_eq!(custom.to_string(), "Practice");
    }

    #[test]
    fn topic_type_serializes_as_title() {
        let json = serde_json::to_string(&TopicType::Graphing).unwrap();
        assert_eq!(json, "\"Graphing\"");
        let back: TopicType = serde_json::from_str("\"Review\"").unwrap();
        assert_eq!(back, TopicType::Review);
    }

    #[test]
    fn topic_types_sort_by_title() {
        let mut types = vec![
            TopicType::Review,
            TopicType::Other("Algebra Tiles".to_string()),
            TopicType::Graphing,
        ];
        types.sort();
        assert_eq!(
            types,
            vec![
                TopicType::Other("Algebra Tiles".to_string()),
                TopicType::Graphing,
                TopicType::Review,
            ]
        );
    }

    #[test]
    fn spelled_out_known_title_is_the_known_type() {
        use std::collections::{BTreeSet, HashSet};

        let spelled = TopicType::Other("Intro".to_string());
        assert_eq!(spelled, TopicType::Intro);
        assert_eq!(spelled.cmp(&TopicType::Intro), Ordering::Equal);

        let hashed: HashSet<TopicType> = [spelled.clone(), TopicType::Intro].into_iter().collect();
        let ordered: BTreeSet<TopicType> = [spelled, TopicType::Intro].into_iter().collect();
        assert_eq!(hashed.len(), 1);
        assert_eq!(ordered.len(), 1);
    }

    #[test]
    fn difficulty_label_is_capitalised() {
        assert_eq!(Difficulty::Challenge.label(), "Challenge");
    }

    #[rstest]
    #[case("easy", Difficulty::Easy)]
    #[case("Medium", Difficulty::Medium)]
    #[case(" HARD ", Difficulty::Hard)]
    #[case("challenge", Difficulty::Challenge)]
    fn difficulty_parses_case_insensitively(#[case] input: &str, #[case] expected: Difficulty) {
        assert_eq!(input.parse::<Difficulty>().unwrap(), expected);
    }

    #[test]
    fn difficulty_rejects_unknown_levels() {
        assert_eq!(
            "extreme".parse::<Difficulty>(),
            Err(CoreError::InvalidDifficulty("extreme".to_string()))
        );
    }

    #[test]
    fn difficulty_serializes_snake_case() {
        let json = serde_json::to_string(&Difficulty::Challenge).unwrap();
        assert_eq!(json, "\"challenge\"");
    }
}
