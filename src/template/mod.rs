// SPDX-License-Identifier: PMPL-1.0-or-later

//! Numbered-placeholder sentence templates.
//!
//! Templates use explicit argument indices in the printf style understood by
//! most locale formatters:
//!
//! | Token    | Meaning                                     |
//! |----------|---------------------------------------------|
//! | `%1$s`   | argument 1 rendered as text                 |
//! | `%3$d`   | argument 3 rendered as a decimal integer    |
//! | `%%`     | a literal `%`                               |
//! | `%n`     | a line break                                |
//!
//! Because every placeholder names its argument, a locale can put the
//! day, month and year in whatever order its grammar needs while the caller
//! always supplies the arguments in one fixed order.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;
use thiserror::Error;

/// Argument 1 of a date sentence: the day name.
pub const DAY_ARG: usize = 1;
/// Argument 2 of a date sentence: the month name.
pub const MONTH_ARG: usize = 2;
/// Argument 3 of a date sentence: the year.
pub const YEAR_ARG: usize = 3;

/// Argument signature every date sentence is rendered against.
pub const SENTENCE_SIGNATURE: [ArgKind; 3] = [ArgKind::Text, ArgKind::Text, ArgKind::Integer];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateArg<'a> {
    Text(&'a str),
    Integer(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Arg { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("dangling '%' at byte {offset}")]
    Dangling { offset: usize },

    #[error("unnumbered conversion '%{conversion}' at byte {offset} (use %<n>${conversion})")]
    Unnumbered { conversion: char, offset: usize },

    #[error("placeholder %{index}$ at byte {offset} is outside 1..={arity}")]
    IndexOutOfRange {
        index: usize,
        offset: usize,
        arity: usize,
    },

    #[error("unsupported conversion '%{index}${conversion}' at byte {offset}")]
    UnsupportedConversion {
        index: usize,
        conversion: char,
        offset: usize,
    },

    #[error("'%{index}$d' at byte {offset} needs an integer argument")]
    NotAnInteger { index: usize, offset: usize },
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)%(?:([0-9]+)\$)?(.)?").expect("token pattern compiles"))
}

/// A parsed template, checked against the argument signature it will be
/// rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTemplate {
    raw: String,
    segments: Vec<Segment>,
    arity: usize,
}

impl SentenceTemplate {
    /// Parse `raw` for rendering with arguments shaped like `signature`.
    pub fn parse(raw: &str, signature: &[ArgKind]) -> Result<Self, TemplateError> {
        if raw.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut cursor = 0;

        for caps in token_pattern().captures_iter(raw) {
            let Some(whole) = caps.get(0) else { continue };
            let offset = whole.start();
            literal.push_str(&raw[cursor..offset]);
            cursor = whole.end();

            let conversion = caps.get(2).and_then(|m| m.as_str().chars().next());
            let Some(index) = caps.get(1) else {
                match conversion {
                    Some('%') => literal.push('%'),
                    Some('n') => literal.push('\n'),
                    Some(other) => {
                        return Err(TemplateError::Unnumbered {
                            conversion: other,
                            offset,
                        })
                    }
                    None => return Err(TemplateError::Dangling { offset }),
                }
                continue;
            };

            let index = index.as_str().parse::<usize>().unwrap_or(usize::MAX);
            if index == 0 || index > signature.len() {
                return Err(TemplateError::IndexOutOfRange {
                    index,
                    offset,
                    arity: signature.len(),
                });
            }
            match conversion {
                Some('s') => {}
                Some('d') if signature[index - 1] == ArgKind::Integer => {}
                Some('d') => return Err(TemplateError::NotAnInteger { index, offset }),
                Some(other) => {
                    return Err(TemplateError::UnsupportedConversion {
                        index,
                        conversion: other,
                        offset,
                    })
                }
                None => return Err(TemplateError::Dangling { offset }),
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Arg { index });
        }

        literal.push_str(&raw[cursor..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            arity: signature.len(),
        })
    }

    /// Parse a date sentence (day name, month name, year).
    pub fn sentence(raw: &str) -> Result<Self, TemplateError> {
        Self::parse(raw, &SENTENCE_SIGNATURE)
    }

    /// The template text exactly as it was authored.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Indices referenced by the template, in the order they appear.
    pub fn placeholders(&self) -> Vec<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Arg { index } => Some(*index),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `args` (argument 1 first) into the template.
    ///
    /// Placeholders pick their argument by number, so the output order is
    /// decided entirely by the template. Only [`LocaleData::render`] calls
    /// this, always with the full date signature.
    ///
    /// [`LocaleData::render`]: crate::types::LocaleData::render
    pub(crate) fn render(&self, args: &[TemplateArg<'_>]) -> String {
        debug_assert_eq!(args.len(), self.arity, "argument count must match signature");
        let mut out = String::with_capacity(self.raw.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                // `%d` is only accepted on integer slots at parse time, so
                // both conversions print an argument the same way here.
                Segment::Arg { index } => match args.get(index - 1) {
                    Some(TemplateArg::Text(text)) => out.push_str(text),
                    Some(TemplateArg::Integer(value)) => {
                        let _ = write!(out, "{}", value);
                    }
                    None => {}
                },
            }
        }
        out
    }
}

impl std::fmt::Display for SentenceTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
