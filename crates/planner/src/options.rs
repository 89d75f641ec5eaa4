use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_MAX_RELATION_DEPTH: usize = 8;

/// What happens to filter entries that do not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Drop the entry and keep going.
    #[default]
    Silent,
    /// Reject the request with a [`crate::PlanError`].
    Strict,
}

impl FromStr for FieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(FieldPolicy::Silent),
            "strict" => Ok(FieldPolicy::Strict),
            other => Err(format!("Unknown field policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Plain `LIKE`; case sensitivity follows the column collation.
    #[default]
    Default,
    CaseInsensitive,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(SearchMode::Default),
            "case_insensitive" | "insensitive" => Ok(SearchMode::CaseInsensitive),
            other => Err(format!("Unknown search mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub policy: FieldPolicy,
    pub search_mode: SearchMode,
    pub max_relation_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            policy: FieldPolicy::Silent,
            search_mode: SearchMode::Default,
            max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self {
            policy: FieldPolicy::Strict,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_and_mode() {
        assert_eq!("Strict".parse::<FieldPolicy>(), Ok(FieldPolicy::Strict));
        assert_eq!(" silent ".parse::<FieldPolicy>(), Ok(FieldPolicy::Silent));
        assert!("loose".parse::<FieldPolicy>().is_err());

        assert_eq!(
            "case_insensitive".parse::<SearchMode>(),
            Ok(SearchMode::CaseInsensitive)
        );
        assert_eq!("default".parse::<SearchMode>(), Ok(SearchMode::Default));
        assert!("fuzzy".parse::<SearchMode>().is_err());
    }
}
