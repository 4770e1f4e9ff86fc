#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use ledger_core::{
    config::Config,
    core::{FixedClock, LedgerSession},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Instant every test session treats as "now".
pub fn test_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap())
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Creates a config pointing at a fresh temporary data directory.
pub fn temp_config() -> Config {
    let temp = TempDir::new().expect("create temp dir");
    let data_dir = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    Config {
        data_dir: Some(data_dir),
        ..Config::default()
    }
}

/// Opens a file-backed session over `config`'s data directory.
pub fn open_session(config: &Config) -> LedgerSession {
    let store = JsonFileStore::new(config.resolve_data_dir()).expect("create json store");
    LedgerSession::open(Box::new(store), config, Arc::new(test_clock())).expect("open session")
}
