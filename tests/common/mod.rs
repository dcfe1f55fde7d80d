use std::path::{Path, PathBuf};

use budget_tracker::{storage::JsonFileStore, LedgerController};
use tempfile::TempDir;

/// Temporary data directory plus the store file path inside it. Keep the
/// `TempDir` alive for as long as the test uses the path.
pub fn temp_store_path() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("storage.json");
    (temp, path)
}

pub fn open_controller(path: &Path) -> LedgerController {
    let store = JsonFileStore::new(path).expect("create json store");
    LedgerController::open(Box::new(store))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
