// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale data directory layout and inventory.
//!
//! Every locale `ll-RR` owns up to two files in the data directory:
//! `ll-RR.txt` (canonical source) and `ll-RR.snap` (snapshot).

pub mod snapshot;
pub mod text;

use crate::locale::LocaleCode;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use snapshot::{read_snapshot, write_snapshot, Snapshot};
pub use text::{read_text_source, render_text_source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Snapshot,
}

impl SourceKind {
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Text => "txt",
            SourceKind::Snapshot => "snap",
        }
    }

    pub fn from_extension(value: &str) -> Option<Self> {
        match value {
            "txt" => Some(SourceKind::Text),
            "snap" => Some(SourceKind::Snapshot),
            _ => None,
        }
    }
}

/// Path of the `kind` file for `code` inside `dir`.
pub fn locale_path(dir: &Path, code: &LocaleCode, kind: SourceKind) -> PathBuf {
    dir.join(format!("{}.{}", code, kind.extension()))
}

/// Files present for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleEntry {
    pub code: LocaleCode,
    pub text: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
}

/// Result of scanning a data directory.
#[derive(Debug, Default)]
pub struct Inventory {
    pub locales: Vec<LocaleEntry>,
    /// Files that are not `ll-RR.txt` or `ll-RR.snap`.
    pub unrecognised: Vec<PathBuf>,
}

/// Scan the top level of `dir`. Subdirectories are not visited.
pub fn scan(dir: &Path) -> Result<Inventory> {
    if !dir.is_dir() {
        return Err(anyhow!("locale data directory not found: {}", dir.display()));
    }

    let mut locales: BTreeMap<LocaleCode, LocaleEntry> = BTreeMap::new();
    let mut unrecognised = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        match classify(&path) {
            Some((code, kind)) => {
                let slot = locales.entry(code.clone()).or_insert_with(|| LocaleEntry {
                    code,
                    text: None,
                    snapshot: None,
                });
                match kind {
                    SourceKind::Text => slot.text = Some(path),
                    SourceKind::Snapshot => slot.snapshot = Some(path),
                }
            }
            None => unrecognised.push(path),
        }
    }

    Ok(Inventory {
        locales: locales.into_values().collect(),
        unrecognised,
    })
}

/// Locales with at least one data file in `dir`, sorted by code.
pub fn available_locales(dir: &Path) -> Result<Vec<LocaleEntry>> {
    Ok(scan(dir)?.locales)
}

fn classify(path: &Path) -> Option<(LocaleCode, SourceKind)> {
    let kind = SourceKind::from_extension(path.extension()?.to_str()?)?;
    let code = LocaleCode::parse(path.file_stem()?.to_str()?).ok()?;
    Some((code, kind))
}
