//! Flat-file persistence for the entry sequence.
//!
//! The persisted form is a pretty-printed JSON array of entries, file order =
//! conversational order, so saved conversations diff cleanly. Loading parses
//! the whole file before any state changes hands; a failed load leaves the
//! caller's history exactly as it was.

use std::path::Path;

use thiserror::Error;

use memoravel_types::Entry;

use crate::atomic_write::atomic_write;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history file is not a valid entry sequence: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn save_entries(path: &Path, entries: &[Entry]) -> Result<(), PersistError> {
    let mut bytes = serde_json::to_vec_pretty(entries)?;
    bytes.push(b'\n');
    atomic_write(path, &bytes)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "saved history");
    Ok(())
}

pub(crate) fn load_entries(path: &Path) -> Result<Vec<Entry>, PersistError> {
    let text = std::fs::read_to_string(path)?;
    let entries = serde_json::from_str(&text)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use memoravel_types::Entry;
    use serde_json::json;

    use super::{PersistError, load_entries, save_entries};

    #[test]
    fn save_then_load_preserves_order_and_extensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        let entries = vec![
            Entry::text("system", "You are terse."),
            Entry::text("user", "hello"),
            Entry::new("assistant").with_extension("tool_calls", json!([{"id": "call_1"}])),
        ];

        save_entries(&path, &entries).expect("save");
        let loaded = load_entries(&path).expect("load");

        assert_eq!(loaded, entries);
    }

    #[test]
    fn persisted_form_is_a_readable_json_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        save_entries(&path, &[Entry::text("user", "hi")]).expect("save");

        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.starts_with('['));
        assert!(text.contains("\"role\": \"user\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_entries(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, PersistError::Io(_)));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{\"role\": \"user\"").expect("write corrupt");

        let err = load_entries(&path).expect_err("corrupt file");
        assert!(matches!(err, PersistError::Parse(_)));
    }
}
