//! Host configuration, read from the environment

use crate::{DomainMatcher, JaccardMatcher, OverlapMatcher};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tsubaki_core::AddonError;

/// Directory scanned for addon manifests
pub const ADDONS_PATH_VAR: &str = "TSUBAKI_ADDONS_PATH";
/// Scoring policy: `overlap` or `jaccard`
pub const MATCHER_VAR: &str = "TSUBAKI_MATCHER";

pub const DEFAULT_ADDONS_PATH: &str = "./Addons";

/// Which `DomainMatcher` the registry uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatcherKind {
    #[default]
    Overlap,
    Jaccard,
}

impl MatcherKind {
    pub fn build(self) -> Box<dyn DomainMatcher> {
        match self {
            MatcherKind::Overlap => Box::new(OverlapMatcher),
            MatcherKind::Jaccard => Box::new(JaccardMatcher),
        }
    }
}

impl FromStr for MatcherKind {
    type Err = AddonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overlap" => Ok(MatcherKind::Overlap),
            "jaccard" => Ok(MatcherKind::Jaccard),
            _ => Err(AddonError::config(MATCHER_VAR, s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub addons_path: PathBuf,
    pub matcher: MatcherKind,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            addons_path: PathBuf::from(DEFAULT_ADDONS_PATH),
            matcher: MatcherKind::default(),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, AddonError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AddonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(path) = get(ADDONS_PATH_VAR) {
            config.addons_path = PathBuf::from(path);
        }
        if let Some(matcher) = get(MATCHER_VAR) {
            config.matcher = matcher.parse()?;
        }
        Ok(config)
    }

    pub fn with_addons_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.addons_path = path.into();
        self
    }

    pub fn with_matcher(mut self, matcher: MatcherKind) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn matcher(&self) -> Box<dyn DomainMatcher> {
        self.matcher.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.addons_path, PathBuf::from("./Addons"));
        assert_eq!(config.matcher().name(), "overlap");
    }

    #[test]
    fn test_overrides() {
        let config = HostConfig::from_lookup(lookup(&[
            (ADDONS_PATH_VAR, "/opt/addons"),
            (MATCHER_VAR, " Jaccard "),
        ]))
        .unwrap();
        assert_eq!(config.addons_path, PathBuf::from("/opt/addons"));
        assert_eq!(config.matcher, MatcherKind::Jaccard);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = HostConfig::from_lookup(lookup(&[(ADDONS_PATH_VAR, "  "), (MATCHER_VAR, "")])).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_unknown_matcher_is_config_error() {
        let err = HostConfig::from_lookup(lookup(&[(MATCHER_VAR, "cosine")])).unwrap_err();
        assert_eq!(err.code(), tsubaki_core::codes::CONFIG_ERROR);
        assert!(err.to_string().contains("cosine"));
    }
}
