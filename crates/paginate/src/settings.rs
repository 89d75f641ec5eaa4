//! Pagination settings, loadable from serde sources or the environment.
//!
//! | variable | field |
//! |---|---|
//! | `PAGINATE_DEFAULT_PAGE_SIZE` | `default_page_size` |
//! | `PAGINATE_MAX_PAGE_SIZE` | `max_page_size` (`none` or `0` disables the clamp) |
//! | `PAGINATE_POLICY` | `policy` (`silent`, `strict`) |
//! | `PAGINATE_SEARCH_MODE` | `search_mode` (`default`, `case_insensitive`) |
//! | `PAGINATE_MAX_RELATION_DEPTH` | `max_relation_depth` |
//! | `PAGINATE_AUTO_JOIN` | `auto_join` |

use crate::error::SettingsError;
use model::pagination::request::DEFAULT_PAGE_SIZE;
use planner::{
    CompileOptions, FieldPolicy, SearchMode, options::DEFAULT_MAX_RELATION_DEPTH,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_DEFAULT_PAGE_SIZE: &str = "PAGINATE_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "PAGINATE_MAX_PAGE_SIZE";
pub const ENV_POLICY: &str = "PAGINATE_POLICY";
pub const ENV_SEARCH_MODE: &str = "PAGINATE_SEARCH_MODE";
pub const ENV_MAX_RELATION_DEPTH: &str = "PAGINATE_MAX_RELATION_DEPTH";
pub const ENV_AUTO_JOIN: &str = "PAGINATE_AUTO_JOIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginateSettings {
    /// Page size used when the request carries none (or a non-positive one).
    pub default_page_size: u64,
    /// Upper bound for the requested page size.
    pub max_page_size: Option<u64>,
    pub policy: FieldPolicy,
    pub search_mode: SearchMode,
    pub max_relation_depth: usize,
    /// Join relations referenced by filters, search or sort automatically.
    pub auto_join: bool,
}

impl Default for PaginateSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE as u64,
            max_page_size: None,
            policy: FieldPolicy::Silent,
            search_mode: SearchMode::Default,
            max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
            auto_join: true,
        }
    }
}

impl PaginateSettings {
    /// Defaults overlaid with the `PAGINATE_*` process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_vars(std::env::vars())
    }

    /// Defaults overlaid with `PAGINATE_*` entries from `vars`. Other keys are
    /// ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();

        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                ENV_DEFAULT_PAGE_SIZE => {
                    settings.default_page_size = parse_positive(key, value)?;
                }
                ENV_MAX_PAGE_SIZE => {
                    settings.max_page_size = match value.to_ascii_lowercase().as_str() {
                        "" | "none" | "0" => None,
                        _ => Some(parse_positive(key, value)?),
                    };
                }
                ENV_POLICY => settings.policy = parse(key, value)?,
                ENV_SEARCH_MODE => settings.search_mode = parse(key, value)?,
                ENV_MAX_RELATION_DEPTH => settings.max_relation_depth = parse(key, value)?,
                ENV_AUTO_JOIN => settings.auto_join = parse_bool(key, value)?,
                _ => {}
            }
        }

        Ok(settings)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            policy: self.policy,
            search_mode: self.search_mode,
            max_relation_depth: self.max_relation_depth,
        }
    }
}

fn invalid(key: &str, value: &str, reason: impl ToString) -> SettingsError {
    SettingsError::InvalidVar {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.parse::<T>().map_err(|e| invalid(key, value, e))
}

fn parse_positive(key: &str, value: &str) -> Result<u64, SettingsError> {
    match parse::<u64>(key, value)? {
        0 => Err(invalid(key, value, "must be at least 1")),
        n => Ok(n),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PaginateSettings::default();
        assert_eq!(settings.default_page_size, 10);
        assert_eq!(settings.max_page_size, None);
        assert_eq!(settings.policy, FieldPolicy::Silent);
        assert_eq!(settings.max_relation_depth, 8);
        assert!(settings.auto_join);
    }

    #[test]
    fn test_from_vars_overlays_defaults() {
        let settings = PaginateSettings::from_vars([
            ("PAGINATE_DEFAULT_PAGE_SIZE", "25"),
            ("PAGINATE_MAX_PAGE_SIZE", "100"),
            ("PAGINATE_POLICY", "strict"),
            ("PAGINATE_SEARCH_MODE", "case_insensitive"),
            ("PAGINATE_AUTO_JOIN", "off"),
            ("HOME", "/root"),
        ])
        .unwrap();

        assert_eq!(settings.default_page_size, 25);
        assert_eq!(settings.max_page_size, Some(100));
        assert_eq!(settings.policy, FieldPolicy::Strict);
        assert_eq!(settings.search_mode, SearchMode::CaseInsensitive);
        assert_eq!(settings.max_relation_depth, 8);
        assert!(!settings.auto_join);
        assert_eq!(settings.compile_options().policy, FieldPolicy::Strict);
    }

    #[test]
    fn test_from_vars_rejects_malformed_values() {
        let err = PaginateSettings::from_vars([("PAGINATE_DEFAULT_PAGE_SIZE", "ten")]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidVar { ref key, .. } if key == ENV_DEFAULT_PAGE_SIZE
        ));

        assert!(PaginateSettings::from_vars([("PAGINATE_DEFAULT_PAGE_SIZE", "0")]).is_err());
        assert!(PaginateSettings::from_vars([("PAGINATE_POLICY", "lenient")]).is_err());
        assert!(PaginateSettings::from_vars([("PAGINATE_AUTO_JOIN", "maybe")]).is_err());
    }

    #[test]
    fn test_max_page_size_can_be_disabled() {
        let settings = PaginateSettings::from_vars([("PAGINATE_MAX_PAGE_SIZE", "none")]).unwrap();
        assert_eq!(settings.max_page_size, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: PaginateSettings =
            serde_json::from_str(r#"{"max_page_size":50,"policy":"strict"}"#).unwrap();
        assert_eq!(settings.max_page_size, Some(50));
        assert_eq!(settings.policy, FieldPolicy::Strict);
        assert_eq!(settings.default_page_size, 10);
    }
}
