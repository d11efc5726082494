// SPDX-License-Identifier: PMPL-1.0-or-later

//! Self-diagnostics for a locale data directory.

use crate::config::{Config, DATA_DIR_ENV};
use crate::storage::{self, LocaleEntry};
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::env;
use std::path::Path;

pub fn run_self_diagnostics(config: &Config) -> Result<()> {
    println!("day-memory self-diagnostics");

    let checks = collect(config);
    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

/// Run every check without printing.
pub fn collect(config: &Config) -> Vec<Diagnostic> {
    let mut checks = vec![
        Diagnostic::ok(
            "version",
            format!("day-memory {}", env!("CARGO_PKG_VERSION")),
        ),
        Diagnostic::ok(
            "settings",
            format!(
                "current year {}, cache policy {}",
                config.current_year,
                config.cache_policy.as_str()
            ),
        ),
        check_override(DATA_DIR_ENV),
    ];

    let dir = &config.data_dir;
    if !dir.is_dir() {
        checks.push(missing_directory(dir));
        return checks;
    }

    match storage::scan(dir) {
        Ok(inventory) => {
            checks.push(Diagnostic::ok(
                "data directory",
                format!("{} ({} locales)", dir.display(), inventory.locales.len()),
            ));
            if inventory.locales.is_empty() {
                checks.push(Diagnostic::warning(
                    "locales",
                    format!("no ll-RR.txt files in {}", dir.display()),
                ));
            }
            for entry in &inventory.locales {
                checks.push(check_locale(entry));
            }
            for path in &inventory.unrecognised {
                checks.push(Diagnostic::warning(
                    "stray file",
                    format!("{} is not ll-RR.txt or ll-RR.snap", path.display()),
                ));
            }
        }
        Err(err) => checks.push(Diagnostic::error("data directory", err.to_string())),
    }

    checks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> colored::ColoredString {
        match self {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub label: String,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    fn new(label: impl Into<String>, level: Level, detail: String) -> Self {
        Self {
            label: label.into(),
            level,
            detail,
        }
    }

    fn ok(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

fn missing_directory(path: &Path) -> Diagnostic {
    if path.exists() {
        Diagnostic::error(
            "data directory",
            format!("{} exists but is not a directory", path.display()),
        )
    } else {
        Diagnostic::error(
            "data directory",
            format!(
                "{} missing (create it or set {})",
                path.display(),
                DATA_DIR_ENV
            ),
        )
    }
}

fn check_locale(entry: &LocaleEntry) -> Diagnostic {
    let label = entry.code.to_string();
    let code = &entry.code;

    let text = match &entry.text {
        Some(path) => match storage::read_text_source(path, code) {
            Ok(data) => Some(data),
            Err(err) => return Diagnostic::error(label, err.to_string()),
        },
        None => None,
    };

    let snapshot = match &entry.snapshot {
        Some(path) => match storage::read_snapshot(path, code) {
            Ok(snapshot) => snapshot,
            Err(err) => return Diagnostic::error(label, err.to_string()),
        },
        None => None,
    };

    match (text, snapshot) {
        (Some(_), None) => Diagnostic::ok(label, "text source ok, no snapshot".to_string()),
        (None, Some(snapshot)) => Diagnostic::warning(
            label,
            format!(
                "snapshot only (exported {}), canonical source missing",
                snapshot.exported_at
            ),
        ),
        (Some(data), Some(snapshot)) if data == snapshot.data => Diagnostic::ok(
            label,
            format!("text source ok, snapshot current ({})", snapshot.exported_at),
        ),
        (Some(_), Some(snapshot)) => Diagnostic::warning(
            label,
            format!(
                "snapshot from {} differs from text source (rewrite with `day-memory snapshot {}`)",
                snapshot.exported_at, entry.code
            ),
        ),
        (None, None) => Diagnostic::error(label, "no data files".to_string()),
    }
}

fn check_override(env_key: &str) -> Diagnostic {
    match env::var(env_key) {
        Ok(value) if !value.trim().is_empty() => {
            Diagnostic::ok("data dir override", format!("{}={}", env_key, value))
        }
        _ => Diagnostic::ok("data dir override", format!("not set ({})", env_key)),
    }
}
