//! Atomic file write helper.
//!
//! Uses a temp file + rename pattern. On Windows, rename-over-existing fails,
//! so a backup-and-restore fallback avoids data loss when overwriting.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if path.exists() {
            // Windows fallback: backup and restore.
            let backup = path.with_extension("bak");
            let _ = std::fs::remove_file(&backup);
            std::fs::rename(path, &backup)?;

            if let Err(persist_err) = err.file.persist(path) {
                let _ = std::fs::rename(&backup, path);
                return Err(persist_err.error);
            }
            if let Err(e) = std::fs::remove_file(&backup) {
                tracing::warn!(
                    path = %backup.display(),
                    "Failed to remove .bak after atomic write: {e}"
                );
            }
        } else {
            return Err(err.error);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::atomic_write;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        atomic_write(&path, b"[]").expect("write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "[]");
    }

    #[test]
    fn overwrites_existing_and_cleans_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        atomic_write(&path, b"one").expect("write one");
        atomic_write(&path, b"two").expect("write two");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "two");
        assert!(!path.with_extension("bak").exists());
    }
}
