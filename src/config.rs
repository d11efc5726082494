// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a YAML or JSON file
//! (`Config::load`), then `DAY_MEMORY_*` environment variables
//! (`Config::apply_env`). The CLI applies its own flags last.
//!
//! ```yaml
//! data_dir: ./locales
//! current_year: 2023
//! cache_policy: strict
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Latest year `Translator::translate` accepts unless configured otherwise.
pub const CURRENT_YEAR: i64 = 2023;

pub const DEFAULT_DATA_DIR: &str = "locales";

pub const DATA_DIR_ENV: &str = "DAY_MEMORY_DATA_DIR";
pub const CURRENT_YEAR_ENV: &str = "DAY_MEMORY_CURRENT_YEAR";
pub const CACHE_POLICY_ENV: &str = "DAY_MEMORY_CACHE_POLICY";

/// What to do with a snapshot that exists but cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Report `LocaleDataCorrupt`.
    #[default]
    Strict,
    /// Log a warning and load the canonical source instead.
    Lenient,
}

impl CachePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(CachePolicy::Strict),
            "lenient" | "fallback" => Some(CachePolicy::Lenient),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Strict => "strict",
            CachePolicy::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `ll-RR.txt` and `ll-RR.snap` files.
    pub data_dir: PathBuf,
    /// Latest accepted year; there is no lower bound.
    pub current_year: i64,
    pub cache_policy: CachePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            current_year: CURRENT_YEAR,
            cache_policy: CachePolicy::Strict,
        }
    }
}

impl Config {
    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Read a YAML (`.yaml`/`.yml`) or JSON file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str::<Config>(&raw)
                .with_context(|| format!("parsing {}", path.display())),
            _ => serde_json::from_str::<Config>(&raw)
                .with_context(|| format!("parsing {}", path.display())),
        }
    }

    /// Apply `DAY_MEMORY_*` variables on top of the current values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(year) = lookup(CURRENT_YEAR_ENV).filter(|v| !v.trim().is_empty()) {
            self.current_year = year
                .trim()
                .parse()
                .with_context(|| format!("parsing {}='{}'", CURRENT_YEAR_ENV, year))?;
        }
        if let Some(policy) = lookup(CACHE_POLICY_ENV).filter(|v| !v.trim().is_empty()) {
            self.cache_policy = CachePolicy::parse(&policy).ok_or_else(|| {
                anyhow!(
                    "{}='{}' (expected strict or lenient)",
                    CACHE_POLICY_ENV,
                    policy
                )
            })?;
        }
        Ok(())
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_current_year(mut self, year: i64) -> Self {
        self.current_year = year;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("locales"));
        assert_eq!(config.current_year, 2023);
        assert_eq!(config.cache_policy, CachePolicy::Strict);
    }

    #[test]
    fn policy_parsing() {
        assert_eq!(CachePolicy::parse("Strict"), Some(CachePolicy::Strict));
        assert_eq!(CachePolicy::parse(" lenient "), Some(CachePolicy::Lenient));
        assert_eq!(CachePolicy::parse("fallback"), Some(CachePolicy::Lenient));
        assert_eq!(CachePolicy::parse("sometimes"), None);
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_ENV, "/srv/locales"),
            (CURRENT_YEAR_ENV, "2030"),
            (CACHE_POLICY_ENV, "lenient"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config
            .apply_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/locales"));
        assert_eq!(config.current_year, 2030);
        assert_eq!(config.cache_policy, CachePolicy::Lenient);
    }

    #[test]
    fn bad_env_values_are_errors() {
        let mut config = Config::default();
        let err = config
            .apply_vars(|key| (key == CURRENT_YEAR_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(CURRENT_YEAR_ENV));

        let err = config
            .apply_vars(|key| (key == CACHE_POLICY_ENV).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("strict or lenient"));
    }

    #[test]
    fn loads_yaml_and_json_with_defaults() {
        let dir = TempDir::new().expect("tempdir should create");

        let yaml = dir.path().join("day-memory.yaml");
        fs::write(&yaml, "data_dir: /data\ncache_policy: lenient\n").unwrap();
        let config = Config::load(&yaml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.cache_policy, CachePolicy::Lenient);
        assert_eq!(config.current_year, CURRENT_YEAR);

        let json = dir.path().join("day-memory.json");
        fs::write(&json, r#"{"current_year": 1999}"#).unwrap();
        let config = Config::load(&json).unwrap();
        assert_eq!(config.current_year, 1999);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));

        assert!(Config::load(&dir.path().join("absent.yaml")).is_err());
    }
}
