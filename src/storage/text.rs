// SPDX-License-Identifier: PMPL-1.0-or-later

//! Canonical line-oriented locale source.
//!
//! ```text
//! line  1..=12   month names, January first
//! line 13..=43   day names, the 1st first
//! line 44        sentence template
//! ```
//!
//! Parsing is purely positional. Lines after the 44th are ignored.

use crate::error::{Result, TranslateError};
use crate::locale::LocaleCode;
use crate::template::SentenceTemplate;
use crate::types::{LocaleData, DAY_COUNT, MONTH_COUNT};
use std::fs;
use std::io;
use std::path::Path;

/// Number of meaningful lines in a canonical source.
pub const LINE_COUNT: usize = MONTH_COUNT + DAY_COUNT + 1;

/// Read and parse the canonical source at `path`.
///
/// A missing file is reported as [`TranslateError::LocaleDataNotFound`] so
/// the caller sees the same error whichever source was tried last.
pub fn read_text_source(path: &Path, code: &LocaleCode) -> Result<LocaleData> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(TranslateError::LocaleDataNotFound {
                locale: code.to_string(),
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(TranslateError::LocaleDataRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw = String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        TranslateError::LocaleDataFormat {
            path: path.to_path_buf(),
            line,
            reason: "not valid UTF-8".to_string(),
        }
    })?;

    parse_text_source(&raw, path)
}

/// Parse canonical source text. `path` is only used in error messages.
pub fn parse_text_source(raw: &str, path: &Path) -> Result<LocaleData> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let format_error = |line: usize, reason: String| TranslateError::LocaleDataFormat {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = raw.lines();
    let mut fields = Vec::with_capacity(LINE_COUNT);
    for line_no in 1..=LINE_COUNT {
        let Some(line) = lines.next() else {
            return Err(format_error(
                line_no,
                format!(
                    "unexpected end of file: expected {} lines, found {} (missing {})",
                    LINE_COUNT,
                    line_no - 1,
                    describe_line(line_no)
                ),
            ));
        };
        if line.trim().is_empty() {
            return Err(format_error(
                line_no,
                format!("blank line where {} was expected", describe_line(line_no)),
            ));
        }
        fields.push(line.to_string());
    }

    let sentence = fields.pop().unwrap_or_default();
    let sentence = SentenceTemplate::sentence(&sentence)
        .map_err(|err| format_error(LINE_COUNT, format!("invalid sentence template: {}", err)))?;

    let mut names = fields.into_iter();
    let months: [String; MONTH_COUNT] = std::array::from_fn(|_| names.next().unwrap_or_default());
    let days: [String; DAY_COUNT] = std::array::from_fn(|_| names.next().unwrap_or_default());

    Ok(LocaleData::new(months, days, sentence))
}

fn describe_line(line_no: usize) -> String {
    match line_no {
        n if n <= MONTH_COUNT => format!("month name {} of {}", n, MONTH_COUNT),
        n if n <= MONTH_COUNT + DAY_COUNT => {
            format!("day name {} of {}", n - MONTH_COUNT, DAY_COUNT)
        }
        _ => "the sentence template".to_string(),
    }
}

/// Render `data` back into canonical source form.
pub fn render_text_source(data: &LocaleData) -> String {
    let mut out = String::new();
    for name in data.months().iter().chain(data.days().iter()) {
        out.push_str(name);
        out.push('\n');
    }
    out.push_str(data.sentence().as_str());
    out.push('\n');
    out
}
