// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for day-memory

use crate::error::{NameTable, Result, TranslateError};
use crate::template::{SentenceTemplate, TemplateArg};

/// Number of month names in a locale.
pub const MONTH_COUNT: usize = 12;

/// Number of day names in a locale (1st through 31st).
pub const DAY_COUNT: usize = 31;

/// Month names, day names and the sentence template of one locale.
///
/// Built once by a loader and never mutated afterwards. The array lengths
/// are part of the type; the loaders reject empty names before building one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleData {
    months: [String; MONTH_COUNT],
    days: [String; DAY_COUNT],
    sentence: SentenceTemplate,
}

impl LocaleData {
    pub fn new(
        months: [String; MONTH_COUNT],
        days: [String; DAY_COUNT],
        sentence: SentenceTemplate,
    ) -> Self {
        debug_assert!(months.iter().all(|m| !m.is_empty()), "empty month name");
        debug_assert!(days.iter().all(|d| !d.is_empty()), "empty day name");
        Self {
            months,
            days,
            sentence,
        }
    }

    pub fn months(&self) -> &[String; MONTH_COUNT] {
        &self.months
    }

    pub fn days(&self) -> &[String; DAY_COUNT] {
        &self.days
    }

    pub fn sentence(&self) -> &SentenceTemplate {
        &self.sentence
    }

    /// Month name for a zero-based index (0 = January).
    pub fn month(&self, index: i64) -> Result<&str> {
        lookup(&self.months, NameTable::Months, index)
    }

    /// Day name for a zero-based index (30 = the 31st).
    pub fn day(&self, index: i64) -> Result<&str> {
        lookup(&self.days, NameTable::Days, index)
    }

    /// Render the sentence for already-resolved names.
    pub fn render(&self, day_name: &str, month_name: &str, year: i64) -> String {
        self.sentence.render(&[
            TemplateArg::Text(day_name),
            TemplateArg::Text(month_name),
            TemplateArg::Integer(year),
        ])
    }
}

fn lookup(table: &[String], kind: NameTable, index: i64) -> Result<&str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i))
        .map(String::as_str)
        .ok_or(TranslateError::NameIndexOutOfRange { table: kind, index })
}
