// Shared helpers for integration tests. Each test file pulls this in with
// `#[path = "../common/mod.rs"] mod common;` and uses what it needs.
#![allow(dead_code)]

use ctclient::registry::StaticRegistry;
use ctclient::types::ReaderInfo;

pub const SAMPLE_ATR: [u8; 6] = [0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F];

/// APDU: SELECT by AID, no Le
pub fn select_apdu() -> Vec<u8> {
    vec![
        0x00, 0xA4, 0x04, 0x00, 0x07, 0xA0, 0x00, 0x00, 0x00, 0x03, 0x10, 0x10,
    ]
}

/// RESET reply carrying `atr`
pub fn atr_reply(atr: &[u8]) -> Vec<u8> {
    let mut out = vec![0x03, atr.len() as u8];
    out.extend_from_slice(atr);
    out
}

/// Single reader with `slots` empty slots
pub fn one_reader(slots: usize) -> StaticRegistry {
    StaticRegistry::new(vec![
        ReaderInfo::new("Test Reader 00 00", vec![0; slots]).unwrap(),
    ])
}

/// Fresh scratch directory below the system temp dir.
pub fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("ctclient-it-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Route `log` output to the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
