// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for locale loading and date rendering.
//!
//! Library operations return [`TranslateError`]. The only failure that is
//! recovered internally is a missing snapshot, which falls back to the
//! canonical text source.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which name table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTable {
    Months,
    Days,
}

impl std::fmt::Display for NameTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameTable::Months => write!(f, "months"),
            NameTable::Days => write!(f, "days"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid locale code '{0}' (expected ll-RR, e.g. en-US)")]
    InvalidLocaleCode(String),

    #[error("no locale data for {locale} (looked for {})", .path.display())]
    LocaleDataNotFound { locale: String, path: PathBuf },

    #[error("{}:{line}: {reason}", .path.display())]
    LocaleDataFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("error reading {}", .path.display())]
    LocaleDataRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt snapshot {}: {reason}", .path.display())]
    LocaleDataCorrupt { path: PathBuf, reason: String },

    #[error(
        "invalid date arguments month={month} day={day} year={year} \
         (month 0-12, day 0-31, year <= {current_year})"
    )]
    InvalidDateArgument {
        month: i32,
        day: i32,
        year: i64,
        current_year: i64,
    },

    #[error("index {index} is outside the {table} table")]
    NameIndexOutOfRange { table: NameTable, index: i64 },

    #[error("error writing snapshot {}", .path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
