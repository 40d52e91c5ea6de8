use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A skill name normalized at ingestion.
///
/// Equality, ordering and hashing use the normalized key (whitespace runs
/// collapsed, lowercased), so `" Rust  Async"` and `"rust async"` are the same
/// skill. The first-seen spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SkillName {
    display: String,
    key: String,
}

impl SkillName {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let display = raw.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        let key = display.to_lowercase();
        Self { display, key }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty()
    }
}

impl PartialEq for SkillName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SkillName {}

impl Hash for SkillName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for SkillName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SkillName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl From<String> for SkillName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for SkillName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<SkillName> for String {
    fn from(skill: SkillName) -> Self {
        skill.display
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "expert" => Ok(SkillLevel::Expert),
            other => Err(format!(
                "unknown skill level '{}' (expected beginner, intermediate or expert)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_compare_case_and_whitespace_insensitively() {
        assert_eq!(SkillName::new("  Python "), SkillName::new("PYTHON"));
        assert_eq!(SkillName::new("rust\t async"), SkillName::new("Rust Async"));
        assert_ne!(SkillName::new("Rust"), SkillName::new("Rust Async"));

        let set: HashSet<SkillName> = ["Guitar", "guitar ", "GUITAR"]
            .into_iter()
            .map(SkillName::new)
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display_keeps_first_spelling() {
        let skill = SkillName::new("  Machine   Learning ");
        assert_eq!(skill.as_str(), "Machine Learning");
        assert_eq!(skill.key(), "machine learning");
        assert!(SkillName::new(" \t ").is_blank());
    }

    #[test]
    fn test_serde_uses_display_string() {
        let skill: SkillName = serde_json::from_str("\" Spanish \"").unwrap();
        assert_eq!(skill.as_str(), "Spanish");
        assert_eq!(serde_json::to_string(&skill).unwrap(), "\"Spanish\"");
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("Expert".parse::<SkillLevel>().unwrap(), SkillLevel::Expert);
        assert_eq!(SkillLevel::default(), SkillLevel::Intermediate);
        assert!("guru".parse::<SkillLevel>().is_err());
    }
}
