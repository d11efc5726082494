// SPDX-License-Identifier: PMPL-1.0-or-later

//! Versioned locale snapshots.
//!
//! A snapshot is a pre-parsed copy of a canonical source stored as a
//! self-describing JSON record:
//!
//! ```json
//! {
//!   "schema": "day-memory.locale-snapshot",
//!   "version": 1,
//!   "locale": "en-US",
//!   "exported_at": "2023-04-01T12:00:00+00:00",
//!   "checksum": "<sha256 of the payload>",
//!   "payload": { "months": [...], "days": [...], "sentence": "%1$s %2$s %3$d" }
//! }
//! ```
//!
//! The header is checked before the payload is decoded, so a snapshot from
//! an incompatible release is refused instead of being misread.

use crate::error::{Result, TranslateError};
use crate::locale::LocaleCode;
use crate::template::SentenceTemplate;
use crate::types::{LocaleData, DAY_COUNT, MONTH_COUNT};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

pub const SNAPSHOT_SCHEMA: &str = "day-memory.locale-snapshot";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotHeader {
    schema: String,
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct SnapshotPayload {
    months: Vec<String>,
    days: Vec<String>,
    sentence: String,
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    schema: String,
    version: u32,
    locale: String,
    exported_at: String,
    checksum: String,
    payload: SnapshotPayload,
}

/// A decoded snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub locale: String,
    pub exported_at: String,
    pub data: LocaleData,
}

impl SnapshotPayload {
    fn from_data(data: &LocaleData) -> Self {
        Self {
            months: data.months().to_vec(),
            days: data.days().to_vec(),
            sentence: data.sentence().as_str().to_string(),
        }
    }

    fn checksum(&self) -> serde_json::Result<String> {
        let encoded = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&encoded)))
    }

    fn into_data(self) -> std::result::Result<LocaleData, String> {
        let months = into_names::<MONTH_COUNT>(self.months, "month")?;
        let days = into_names::<DAY_COUNT>(self.days, "day")?;
        let sentence = SentenceTemplate::sentence(&self.sentence)
            .map_err(|err| format!("invalid sentence template: {}", err))?;
        Ok(LocaleData::new(months, days, sentence))
    }
}

fn into_names<const N: usize>(
    names: Vec<String>,
    what: &str,
) -> std::result::Result<[String; N], String> {
    if let Some(pos) = names.iter().position(|name| name.trim().is_empty()) {
        return Err(format!("{} name {} is empty", what, pos + 1));
    }
    let found = names.len();
    names
        .try_into()
        .map_err(|_| format!("expected {} {} names, found {}", N, what, found))
}

/// Encode `data` as a snapshot for `code`.
pub fn encode_snapshot(code: &LocaleCode, data: &LocaleData) -> serde_json::Result<String> {
    let payload = SnapshotPayload::from_data(data);
    let record = SnapshotRecord {
        schema: SNAPSHOT_SCHEMA.to_string(),
        version: SNAPSHOT_VERSION,
        locale: code.to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        checksum: payload.checksum()?,
        payload,
    };
    serde_json::to_string_pretty(&record)
}

/// Decode a snapshot, checking that it belongs to `expected`.
///
/// The error string describes why the snapshot was refused.
pub fn decode_snapshot(raw: &[u8], expected: &LocaleCode) -> std::result::Result<Snapshot, String> {
    let header: SnapshotHeader =
        serde_json::from_slice(raw).map_err(|err| format!("unreadable header: {}", err))?;
    if header.schema != SNAPSHOT_SCHEMA {
        return Err(format!("unsupported schema '{}'", header.schema));
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(format!(
            "unsupported version {} (expected {})",
            header.version, SNAPSHOT_VERSION
        ));
    }

    let record: SnapshotRecord =
        serde_json::from_slice(raw).map_err(|err| format!("malformed record: {}", err))?;
    if record.locale != expected.to_string() {
        return Err(format!(
            "snapshot belongs to '{}', not '{}'",
            record.locale, expected
        ));
    }
    let checksum = record
        .payload
        .checksum()
        .map_err(|err| format!("cannot encode payload: {}", err))?;
    if !checksum.eq_ignore_ascii_case(&record.checksum) {
        return Err("checksum mismatch".to_string());
    }

    Ok(Snapshot {
        locale: record.locale,
        exported_at: record.exported_at,
        data: record.payload.into_data()?,
    })
}

/// Read the snapshot at `path`.
///
/// `Ok(None)` means there is no snapshot file. Anything else that stops the
/// snapshot from being used is [`TranslateError::LocaleDataCorrupt`].
pub fn read_snapshot(path: &Path, code: &LocaleCode) -> Result<Option<Snapshot>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(TranslateError::LocaleDataCorrupt {
                path: path.to_path_buf(),
                reason: format!("unreadable: {}", err),
            })
        }
    };
    decode_snapshot(&raw, code)
        .map(Some)
        .map_err(|reason| TranslateError::LocaleDataCorrupt {
            path: path.to_path_buf(),
            reason,
        })
}

/// Write a snapshot of `data` to `path`, replacing any existing file.
///
/// The record is written to a sibling temporary file first and renamed into
/// place, so readers never observe a half-written snapshot.
pub fn write_snapshot(path: &Path, code: &LocaleCode, data: &LocaleData) -> Result<()> {
    let write_error = |source: io::Error| TranslateError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let encoded = encode_snapshot(code, data).map_err(|err| write_error(err.into()))?;
    replace_file(&path.with_extension("snap.tmp"), path, encoded.as_bytes()).map_err(write_error)
}

/// Write `contents` to `staging`, then rename it over `path`. The staging
/// file is removed whenever either step fails.
fn replace_file(staging: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let result = fs::write(staging, contents).and_then(|()| fs::rename(staging, path));
    if result.is_err() {
        let _ = fs::remove_file(staging);
    }
    result
}
