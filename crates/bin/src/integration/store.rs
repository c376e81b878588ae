//! Store location and opening.
//!
//! The SQLite database lives in a platform-specific data directory unless
//! `--db` points elsewhere.

use intrinsic::data::{Result, SqliteStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default data directory path.
///
/// Uses platform-specific data directories:
/// - Linux: `~/.local/share/intrinsic/`
/// - macOS: `~/Library/Application Support/intrinsic/`
/// - Windows: `%APPDATA%\intrinsic\`
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("intrinsic")
}

/// Get the default database path.
pub(crate) fn default_db_path() -> PathBuf {
    default_data_dir().join("intrinsic.db")
}

/// Resolve the database path from an optional override.
pub(crate) fn db_path(db: Option<&Path>) -> PathBuf {
    db.map_or_else(default_db_path, Path::to_path_buf)
}

/// Open the store, creating the directory if needed.
pub(crate) fn open_store(db: Option<&Path>) -> Result<SqliteStore> {
    let path = db_path(db);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!(path = %path.display(), "opening store");
    SqliteStore::new(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_override() {
        let custom = Path::new("/tmp/custom.db");
        assert_eq!(db_path(Some(custom)), custom);
        assert!(db_path(None).ends_with("intrinsic/intrinsic.db"));
    }
}
