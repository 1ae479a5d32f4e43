use super::{has_note_ext, normalize_ext, NoteStore};
use crate::error::{Result, VaultError};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

pub const MEM_ROOT: &str = "/vault";

#[derive(Clone)]
struct FileEntry {
    text: String,
    mtime: DateTime<Utc>,
}

/// In-memory note store for testing.
///
/// Uses `RefCell` for interior mutability since the vault is single-threaded;
/// the `NoteStore` trait takes `&self` everywhere. Directories are implied by
/// the files beneath them, plus any created explicitly with [`MemStore::add_dir`].
pub struct MemStore {
    root: PathBuf,
    file_ext: String,
    files: RefCell<BTreeMap<PathBuf, FileEntry>>,
    dirs: RefCell<Vec<PathBuf>>,
    root_exists: bool,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::with_root(MEM_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_ext: ".md".to_string(),
            files: RefCell::new(BTreeMap::new()),
            dirs: RefCell::new(Vec::new()),
            root_exists: true,
            simulate_write_error: RefCell::new(false),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        self.file_ext = normalize_ext(ext);
        self
    }

    /// Test helper: a store whose root directory does not exist.
    pub fn without_root(mut self) -> Self {
        self.root_exists = false;
        self
    }

    /// Test helper: place a file at `relative` under the root, bypassing the
    /// write path.
    pub fn add_file(&self, relative: impl AsRef<Path>, text: &str) -> PathBuf {
        let path = self.root.join(relative);
        self.files.borrow_mut().insert(
            path.clone(),
            FileEntry {
                text: text.to_string(),
                mtime: Utc::now(),
            },
        );
        path
    }

    /// Test helper: register an (empty) directory under the root.
    pub fn add_dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.root.join(relative);
        self.dirs.borrow_mut().push(path.clone());
        path
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper: set mtime directly.
    /// Returns true if the entry existed and was updated.
    pub fn set_mtime(&self, path: &Path, mtime: DateTime<Utc>) -> bool {
        let mut files = self.files.borrow_mut();
        if let Some(entry) = files.get_mut(path) {
            entry.mtime = mtime;
            true
        } else {
            false
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }

    fn not_found(path: &Path) -> VaultError {
        VaultError::Io(IoError::new(
            ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        ))
    }
}

impl NoteStore for MemStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let files = self.files.borrow();
        Ok(files
            .keys()
            .filter(|path| path.starts_with(&self.root) && has_note_ext(path, &self.file_ext))
            .cloned()
            .collect())
    }

    fn read_note(&self, path: &Path) -> Result<String> {
        let files = self.files.borrow();
        files
            .get(path)
            .map(|entry| entry.text.clone())
            .ok_or_else(|| Self::not_found(path))
    }

    fn write_note(&self, path: &Path, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        let mut files = self.files.borrow_mut();
        files.insert(
            path.to_path_buf(),
            FileEntry {
                text: content.to_string(),
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    fn delete_note(&self, path: &Path) -> Result<()> {
        let mut files = self.files.borrow_mut();
        files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.root_exists && (self.files.borrow().contains_key(path) || self.is_dir(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        if !self.root_exists {
            return false;
        }
        path == self.root
            || self.dirs.borrow().iter().any(|dir| dir.starts_with(path))
            || self
                .files
                .borrow()
                .keys()
                .any(|file| file != path && file.starts_with(path))
    }

    fn modified(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        Ok(self.files.borrow().get(path).map(|entry| entry.mtime))
    }
}
