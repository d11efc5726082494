// SPDX-License-Identifier: PMPL-1.0-or-later

//! day-memory — calendar dates as localized sentences.
//!
//! A [`Translator`] is bound to one `ll-RR` locale. It loads that locale's
//! month names, day names and sentence template from a data directory and
//! renders `(month, day, year)` triples, BCE years included.
//!
//! DATA SOURCES:
//! 1. **Snapshot** (`ll-RR.snap`): versioned, checksummed JSON. Loaded first
//!    when present.
//! 2. **Canonical source** (`ll-RR.txt`): 12 month lines, 31 day lines and
//!    one template line. Loaded when no snapshot exists.
//!
//! Templates number their placeholders (`%1$s` day, `%2$s` month, `%3$d`
//! year), so each locale orders the sentence its own way.
//!
//! ```no_run
//! use day_memory::Translator;
//!
//! let translator = Translator::new("en-US")?;
//! assert_eq!(translator.translate(1, 1, 2003)?, "1st January 2003");
//! # Ok::<(), day_memory::TranslateError>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod locale;
pub mod logging;
pub mod storage;
pub mod template;
pub mod translator;
pub mod types;

pub use config::{CachePolicy, Config, CURRENT_YEAR};
pub use error::{NameTable, TranslateError};
pub use locale::LocaleCode;
pub use translator::{LoadSource, Translator};
pub use types::LocaleData;
