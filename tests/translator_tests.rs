// SPDX-License-Identifier: PMPL-1.0-or-later

//! Integration tests against the bundled locales

use day_memory::{CachePolicy, Config, LoadSource, TranslateError, Translator, CURRENT_YEAR};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bundled_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("locales")
}

fn bundled(code: &str) -> Translator {
    Translator::with_config(code, Config::default().with_data_dir(bundled_dir()))
        .unwrap_or_else(|err| panic!("{} should load: {}", code, err))
}

/// Copy the bundled text sources into a scratch directory so tests can
/// write snapshots without touching the repository.
fn scratch_copy(codes: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("tempdir should create");
    for code in codes {
        let name = format!("{}.txt", code);
        fs::copy(bundled_dir().join(&name), dir.path().join(&name)).expect("fixture should copy");
    }
    dir
}

#[test]
fn test_bundled_locales_render_sample_dates() {
    let cases = [
        ("en-US", "1st January 2003", "31st December -1000"),
        (
            "es-BO",
            "primero de enero de 2003",
            "treinta y uno de diciembre de -1000",
        ),
        (
            "el-GR",
            "Η 1η Ιανουαρίου του 2003",
            "Η 31η Δεκεμβρίου του -1000",
        ),
        ("hu-HU", "2003. január 1.", "-1000. december 31."),
    ];
    for (code, first, last) in cases {
        let t = bundled(code);
        assert_eq!(t.translate(1, 1, 2003).unwrap(), first);
        assert_eq!(t.translate(12, 31, -1000).unwrap(), last);
    }
}

#[test]
fn test_malformed_codes_are_rejected() {
    for code in ["", "en-Us", "Es-BO", "ess-BO", "en-USS", "es US"] {
        match Translator::with_config(code, Config::default().with_data_dir(bundled_dir())) {
            Err(TranslateError::InvalidLocaleCode(echo)) => assert_eq!(echo, code),
            Err(other) => panic!("{:?} gave the wrong error: {}", code, other),
            Ok(_) => panic!("{:?} should be rejected", code),
        }
    }
}

#[test]
fn test_well_formed_code_without_data_is_not_found() {
    let result = Translator::with_config("zz-ZZ", Config::default().with_data_dir(bundled_dir()));
    assert!(matches!(
        result,
        Err(TranslateError::LocaleDataNotFound { .. })
    ));
}

#[test]
fn test_boundaries() {
    let t = bundled("en-US");
    assert_eq!(
        t.translate(12, 31, CURRENT_YEAR).unwrap(),
        format!("31st December {}", CURRENT_YEAR)
    );
    for (month, day, year) in [(1, 1, CURRENT_YEAR + 1), (13, 1, 2000), (1, 32, 2000)] {
        assert!(matches!(
            t.translate(month, day, year),
            Err(TranslateError::InvalidDateArgument { .. })
        ));
    }
    assert!(matches!(
        t.translate(0, 0, 2000),
        Err(TranslateError::NameIndexOutOfRange { .. })
    ));
}

#[test]
fn test_rendering_is_idempotent() {
    let t = bundled("hu-HU");
    let first = t.translate(7, 14, 1789).unwrap();
    let second = t.translate(7, 14, 1789).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "1789. július 14.");
}

#[test]
fn test_bce_years_appear_verbatim() {
    let t = bundled("en-US");
    let rendered = t.translate(3, 15, -44).unwrap();
    assert_eq!(rendered, "15th March -44");
    assert!(t.translate(6, 1, -1_000_000).unwrap().contains("-1000000"));
}

#[test]
fn test_snapshot_round_trip_matches_text_source() {
    let dir = scratch_copy(&["es-BO"]);
    let config = Config::default().with_data_dir(dir.path());

    let from_text = Translator::with_config("es-BO", config.clone()).unwrap();
    assert_eq!(from_text.source(), LoadSource::Text);
    let path = from_text.write_snapshot().unwrap();
    assert_eq!(path, dir.path().join("es-BO.snap"));

    let from_snapshot = Translator::with_config("es-BO", config).unwrap();
    assert_eq!(from_snapshot.source(), LoadSource::Snapshot);
    assert_eq!(
        from_snapshot.translation().months(),
        from_text.translation().months()
    );
    assert_eq!(
        from_snapshot.translation().days(),
        from_text.translation().days()
    );
    assert_eq!(
        from_snapshot.translation().sentence().as_str(),
        from_text.translation().sentence().as_str()
    );
    assert_eq!(
        from_snapshot.translate(1, 1, 2003).unwrap(),
        from_text.translate(1, 1, 2003).unwrap()
    );
}

#[test]
fn test_snapshot_alone_is_enough() {
    let dir = scratch_copy(&["el-GR"]);
    let config = Config::default().with_data_dir(dir.path());
    Translator::with_config("el-GR", config.clone())
        .unwrap()
        .write_snapshot()
        .unwrap();
    fs::remove_file(dir.path().join("el-GR.txt")).unwrap();

    let t = Translator::with_config("el-GR", config).unwrap();
    assert_eq!(t.source(), LoadSource::Snapshot);
    assert_eq!(t.translate(1, 1, 2003).unwrap(), "Η 1η Ιανουαρίου του 2003");
}

#[test]
fn test_snapshot_is_not_written_implicitly() {
    let dir = scratch_copy(&["en-US"]);
    let t = Translator::with_config("en-US", Config::default().with_data_dir(dir.path())).unwrap();
    t.translate(1, 1, 2003).unwrap();
    assert!(!t.snapshot_path().exists());
}

#[test]
fn test_corrupt_snapshot_policies() {
    let dir = scratch_copy(&["en-US"]);
    let config = Config::default().with_data_dir(dir.path());
    Translator::with_config("en-US", config.clone())
        .unwrap()
        .write_snapshot()
        .unwrap();

    let snap = dir.path().join("en-US.snap");
    let raw = fs::read_to_string(&snap).unwrap();
    fs::write(&snap, raw.replace("\"version\": 1", "\"version\": 99")).unwrap();

    match Translator::with_config("en-US", config.clone()) {
        Err(TranslateError::LocaleDataCorrupt { reason, .. }) => {
            assert!(reason.contains("unsupported version 99"), "{}", reason)
        }
        other => panic!("expected corrupt snapshot, got {:?}", other.map(|_| ())),
    }

    let lenient =
        Translator::with_config("en-US", config.with_cache_policy(CachePolicy::Lenient)).unwrap();
    assert_eq!(lenient.source(), LoadSource::Text);
    assert_eq!(lenient.translate(1, 1, 2003).unwrap(), "1st January 2003");
}

#[test]
fn test_truncated_text_source_is_a_format_error() {
    let dir = TempDir::new().expect("tempdir should create");
    let full = fs::read_to_string(bundled_dir().join("en-US.txt")).unwrap();
    let truncated: String = full.lines().take(43).map(|l| format!("{}\n", l)).collect();
    fs::write(dir.path().join("en-US.txt"), truncated).unwrap();

    match Translator::with_config("en-US", Config::default().with_data_dir(dir.path())) {
        Err(TranslateError::LocaleDataFormat { line, .. }) => assert_eq!(line, 44),
        other => panic!("expected format error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_snapshot_write_failure_is_reported() {
    let dir = scratch_copy(&["en-US"]);
    let t = Translator::with_config("en-US", Config::default().with_data_dir(dir.path())).unwrap();
    fs::create_dir_all(t.snapshot_path()).unwrap();
    assert!(matches!(
        t.write_snapshot(),
        Err(TranslateError::SnapshotWrite { .. })
    ));
}
