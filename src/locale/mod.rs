// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale codes of the form `ll-RR`.
//!
//! Only the shape is checked: two lowercase ASCII letters, a dash, two
//! uppercase ASCII letters. Whether `xx-QQ` names a real language or region
//! is not our concern; a locale exists when its data files do.

use crate::error::{Result, TranslateError};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([a-z]{2})-([A-Z]{2})$").expect("code pattern compiles"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode {
    language: String,
    region: String,
}

impl LocaleCode {
    /// Parse an exact `ll-RR` code.
    ///
    /// No trimming and no case folding: `"en-Us"`, `" en-US"` and
    /// `"en-USS"` are all rejected.
    ///
    /// # Examples
    /// ```
    /// use day_memory::locale::LocaleCode;
    /// let code = LocaleCode::parse("te-IN").unwrap();
    /// assert_eq!(code.language(), "te");
    /// assert_eq!(code.region(), "IN");
    /// assert!(LocaleCode::parse("Es-BO").is_err());
    /// ```
    pub fn parse(code: &str) -> Result<Self> {
        let caps = code_pattern()
            .captures(code)
            .ok_or_else(|| TranslateError::InvalidLocaleCode(code.to_string()))?;
        Ok(Self {
            language: caps[1].to_string(),
            region: caps[2].to_string(),
        })
    }

    /// ISO 639-1 style language part (lowercase).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// ISO 3166 style region part (uppercase).
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl FromStr for LocaleCode {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.language, self.region)
    }
}
