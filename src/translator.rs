// SPDX-License-Identifier: PMPL-1.0-or-later

//! The date translator.
//!
//! A [`Translator`] is bound to one locale. Construction parses the locale
//! code and loads its data: the snapshot (`ll-RR.snap`) when one exists,
//! otherwise the canonical source (`ll-RR.txt`). After that the loaded data
//! never changes; [`Translator::translate`] only reads it.

use crate::config::{CachePolicy, Config};
use crate::error::{Result, TranslateError};
use crate::locale::LocaleCode;
use crate::storage::{self, SourceKind};
use crate::types::LocaleData;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where a translator's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    Text,
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadSource::Snapshot => write!(f, "snapshot"),
            LoadSource::Text => write!(f, "text source"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translator {
    code: LocaleCode,
    config: Config,
    translation: LocaleData,
    source: LoadSource,
}

impl Translator {
    /// Build a translator for `code` with the default configuration.
    pub fn new(code: &str) -> Result<Self> {
        Self::with_config(code, Config::default())
    }

    pub fn with_config(code: &str, config: Config) -> Result<Self> {
        let code = LocaleCode::parse(code)?;
        let (translation, source) = load_locale_data(&code, &config)?;
        Ok(Self {
            code,
            config,
            translation,
            source,
        })
    }

    pub fn locale(&self) -> &LocaleCode {
        &self.code
    }

    pub fn language_code(&self) -> &str {
        self.code.language()
    }

    pub fn region_code(&self) -> &str {
        self.code.region()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The loaded month names, day names and sentence template.
    pub fn translation(&self) -> &LocaleData {
        &self.translation
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn text_path(&self) -> PathBuf {
        storage::locale_path(&self.config.data_dir, &self.code, SourceKind::Text)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        storage::locale_path(&self.config.data_dir, &self.code, SourceKind::Snapshot)
    }

    /// Render a date as a sentence in this locale.
    ///
    /// `month` is 1-based (1 = January), `day` is 1-based (31 = the 31st).
    /// Years may be negative (BCE) and have no lower bound, but may not be
    /// later than the configured current year. The calendar itself is not
    /// checked: February 31 is accepted.
    ///
    /// Bounds are checked as `0..=12` and `0..=31`. A month or day of `0`
    /// therefore passes the bounds check and is then rejected by the name
    /// lookup with [`TranslateError::NameIndexOutOfRange`].
    pub fn translate(&self, month: i32, day: i32, year: i64) -> Result<String> {
        if !(0..=12).contains(&month) || !(0..=31).contains(&day) || year > self.config.current_year
        {
            return Err(TranslateError::InvalidDateArgument {
                month,
                day,
                year,
                current_year: self.config.current_year,
            });
        }
        let day_name = self.translation.day(i64::from(day) - 1)?;
        let month_name = self.translation.month(i64::from(month) - 1)?;
        Ok(self.translation.render(day_name, month_name, year))
    }

    /// Persist the loaded data as this locale's snapshot.
    ///
    /// Never called implicitly. Replaces an existing snapshot and returns
    /// the path written.
    pub fn write_snapshot(&self) -> Result<PathBuf> {
        let path = self.snapshot_path();
        storage::write_snapshot(&path, &self.code, &self.translation)?;
        info!(locale = %self.code, path = %path.display(), "snapshot written");
        Ok(path)
    }
}

/// Load `code`'s data, preferring the snapshot.
///
/// A missing snapshot falls back to the canonical source. A snapshot that
/// exists but cannot be decoded is an error under [`CachePolicy::Strict`]
/// and falls back under [`CachePolicy::Lenient`].
pub fn load_locale_data(code: &LocaleCode, config: &Config) -> Result<(LocaleData, LoadSource)> {
    match load_from_snapshot(code, config) {
        Ok(Some(data)) => {
            debug!(locale = %code, "loaded snapshot");
            return Ok((data, LoadSource::Snapshot));
        }
        Ok(None) => {
            info!(locale = %code, "no snapshot, reading text source");
        }
        Err(err) if config.cache_policy == CachePolicy::Lenient => {
            warn!(locale = %code, error = %err, "ignoring unusable snapshot");
        }
        Err(err) => return Err(err),
    }

    let data = load_from_text(code, config)?;
    Ok((data, LoadSource::Text))
}

/// Load `code`'s canonical source.
pub fn load_from_text(code: &LocaleCode, config: &Config) -> Result<LocaleData> {
    let path = storage::locale_path(&config.data_dir, code, SourceKind::Text);
    storage::read_text_source(&path, code)
}

/// Load `code`'s snapshot; `Ok(None)` when there is none.
pub fn load_from_snapshot(code: &LocaleCode, config: &Config) -> Result<Option<LocaleData>> {
    let path = storage::locale_path(&config.data_dir, code, SourceKind::Snapshot);
    Ok(storage::read_snapshot(&path, code)?.map(|snapshot| snapshot.data))
}
