use super::{has_note_ext, normalize_ext, NoteStore};
use crate::error::{Result, VaultError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

pub const DEFAULT_FILE_EXT: &str = ".md";

/// Note store over a directory on local disk.
pub struct FsStore {
    root: PathBuf,
    file_ext: String,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        self.file_ext = normalize_ext(ext);
        self
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(VaultError::Io)?;
        }
        Ok(())
    }
}

impl NoteStore for FsStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let mut notes = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            // `path().is_file()` follows symlinks; `file_type()` would not.
            if entry.path().is_file() && has_note_ext(entry.path(), &self.file_ext) {
                notes.push(entry.into_path());
            }
        }
        tracing::debug!(root = %self.root.display(), count = notes.len(), "listed note files");
        Ok(notes)
    }

    fn read_note(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(VaultError::Io)
    }

    fn write_note(&self, path: &Path, content: &str) -> Result<()> {
        let dir = path.parent().unwrap_or(&self.root);
        self.ensure_dir(dir)?;

        // Atomic write: temp file in the same directory, then rename over the target.
        let tmp_path = dir.join(format!(".note-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(VaultError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(VaultError::Io(e));
        }

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote note");
        Ok(())
    }

    fn delete_note(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(VaultError::Io)?;
        tracing::debug!(path = %path.display(), "deleted note");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn modified(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.modified().ok().map(DateTime::<Utc>::from)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Io(e)),
        }
    }
}
