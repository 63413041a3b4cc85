use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::{
    config,
    types::{AppStateRecord, BookId, Bookmark, Cursor},
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no config directory available")]
    NoConfigDir,
}

const STATE_FILE: &str = "state.json";

pub fn config_dir() -> Option<PathBuf> {
    config::config_root()
}

fn read_records(path: &Path) -> Vec<AppStateRecord> {
    fs::read(path)
        .ok()
        .and_then(|d| serde_json::from_slice(&d).ok())
        .unwrap_or_default()
}

fn same_book(a: &BookId, b: &BookId) -> bool {
    a.id == b.id || a.path == b.path
}

pub fn load_state(book: &BookId) -> Option<AppStateRecord> {
    load_state_from(&config_dir()?, book)
}

pub fn load_state_from(dir: &Path, book: &BookId) -> Option<AppStateRecord> {
    read_records(&dir.join(STATE_FILE))
        .into_iter()
        .find(|r| same_book(&r.book, book))
}

pub fn save_state(record: &AppStateRecord) -> Result<(), StateError> {
    let dir = config_dir().ok_or(StateError::NoConfigDir)?;
    save_state_to(&dir, record)
}

pub fn save_state_to(dir: &Path, record: &AppStateRecord) -> Result<(), StateError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(STATE_FILE);
    let mut records = read_records(&path);
    if let Some(existing) = records.iter_mut().find(|r| same_book(&r.book, &record.book)) {
        *existing = record.clone();
    } else {
        records.push(record.clone());
    }
    let s = serde_json::to_string_pretty(&records)?;
    fs::write(&path, s)?;
    debug!(path = %path.display(), books = records.len(), "saved reading state");
    Ok(())
}

/// Records a bookmark at `location`. Returns `false` when an identical one
/// (same location and visibility) already exists.
pub fn add_bookmark(record: &mut AppStateRecord, location: Cursor, visible: bool) -> bool {
    if record
        .bookmarks
        .iter()
        .any(|b| b.location == location && b.visible == visible)
    {
        return false;
    }
    record.bookmarks.push(Bookmark {
        location,
        visible,
        created_at: Utc::now().to_rfc3339(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentFormat;

    fn book(id: &str, path: &str) -> BookId {
        BookId {
            id: id.to_string(),
            path: path.to_string(),
            title: None,
            format: DocumentFormat::Text,
        }
    }

    #[test]
    fn add_bookmark_skips_duplicates() {
        let mut record = AppStateRecord::new(book("a", "/a"));
        assert!(add_bookmark(&mut record, Cursor::new(1, 2), false));
        assert!(!add_bookmark(&mut record, Cursor::new(1, 2), false));
        assert!(add_bookmark(&mut record, Cursor::new(1, 2), true));
        assert_eq!(record.bookmarks.len(), 2);
        assert!(!record.bookmarks[0].visible);
    }

    #[test]
    fn missing_state_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_state_from(dir.path(), &book("a", "/a")).is_none());
    }

    #[test]
    fn cursors_without_grapheme_offset_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let raw = r#"[{"book":{"id":"a","path":"/a","title":null,"format":"text"},
            "last_location":{"paragraph":3,"word":1},"bookmarks":[]}]"#;
        fs::write(dir.path().join(STATE_FILE), raw).unwrap();
        let record = load_state_from(dir.path(), &book("a", "/a")).unwrap();
        assert_eq!(record.last_location, Cursor::new(3, 1));
    }
}
